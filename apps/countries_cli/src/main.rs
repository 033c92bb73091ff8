use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_countries, load_country, load_settings, GraphQlCountryClient, Settings};
use list_controller::{ComparisonPair, ListConfig, ListController, ListView, ToggleOutcome};
use shared::domain::{Country, CountryCode};
use shared::fetch::FetchState;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "countries", about = "Query the countries GraphQL API from the terminal")]
struct Cli {
    /// GraphQL endpoint of the countries API.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Settings file; defaults to ./countries.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the (optionally filtered) country list.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Select two countries and print them side by side.
    Compare { first: String, second: String },
    /// Print the details of one country.
    Show { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint.as_deref() {
        settings.set_endpoint(endpoint)?;
    }
    if let Command::List {
        page_size: Some(page_size),
        ..
    } = &cli.command
    {
        settings.page_size = *page_size;
    }
    settings.validate()?;
    let client = GraphQlCountryClient::from_settings(&settings)?;

    match cli.command {
        Command::List { search, page, .. } => {
            let mut list = loaded_list(&client, &settings).await?;
            if let Some(search) = search {
                list.set_search_text(search);
            }
            list.set_page(page);
            print!("{}", render_page(&list.view()));
        }
        Command::Compare { first, second } => {
            let codes = [parse_code(&first)?, parse_code(&second)?];
            let mut list = loaded_list(&client, &settings).await?;
            print!("{}", compare_codes(&mut list, &codes));
        }
        Command::Show { code } => {
            let code = parse_code(&code)?;
            match load_country(&client, &code).await {
                FetchState::Ready(country) => print!("{}", render_country(&country)),
                FetchState::Failed(reason) => bail!("{reason}"),
                FetchState::Loading => bail!("country {code} did not finish loading"),
            }
        }
    }
    Ok(())
}

fn parse_code(raw: &str) -> Result<CountryCode> {
    CountryCode::parse(raw).with_context(|| format!("'{raw}' is not a country code"))
}

async fn loaded_list(client: &GraphQlCountryClient, settings: &Settings) -> Result<ListController> {
    let config = ListConfig::with_page_size(settings.page_size)
        .context("page size must be greater than zero")?;
    let mut list = ListController::new(config);
    list.set_source(load_countries(client).await);
    if let Some(reason) = list.source().failure() {
        bail!("failed to load countries: {reason}");
    }
    Ok(list)
}

/// Selects both codes and renders the pair, or says why it is incomplete.
fn compare_codes(list: &mut ListController, codes: &[CountryCode; 2]) -> String {
    for code in codes {
        if list.toggle_select(code) != ToggleOutcome::Added {
            tracing::warn!(code = %code, "code was not added to the selection");
        }
    }
    if let Some(pair) = list.comparison_pair(list.countries()) {
        return render_comparison(pair);
    }

    tracing::debug!(
        selected = list.state().selection().len(),
        "comparison incomplete"
    );
    let missing: Vec<&str> = codes
        .iter()
        .filter(|code| !list.countries().iter().any(|c| &c.code == *code))
        .map(CountryCode::as_str)
        .collect();
    if missing.is_empty() {
        "incomplete: pick two different countries\n".to_string()
    } else {
        format!("incomplete: unknown code(s) {}\n", missing.join(", "))
    }
}

fn render_page(view: &ListView<'_>) -> String {
    let mut out = String::new();
    if view.page.is_empty() {
        let _ = writeln!(out, "No countries match '{}'.", view.search_text);
    }
    for country in &view.page {
        let marker = if view.selected.contains(&country.code) {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = writeln!(
            out,
            "{marker} {:<3} {} {}",
            country.code.as_str(),
            country.emoji,
            country.name
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} matching)",
        view.current_page,
        view.total_pages,
        view.filtered.len()
    );
    out
}

fn render_comparison(pair: ComparisonPair<'_>) -> String {
    let ComparisonPair { first, second } = pair;
    let rows = [
        (
            "Country",
            format!("{} {}", first.emoji, first.name),
            format!("{} {}", second.emoji, second.name),
        ),
        (
            "Capital",
            first.capital_label().to_string(),
            second.capital_label().to_string(),
        ),
        (
            "Currency",
            first.currency_label().to_string(),
            second.currency_label().to_string(),
        ),
        ("Languages", first.language_names(), second.language_names()),
    ];
    let width = rows
        .iter()
        .map(|(_, left, _)| left.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Country Comparison\n");
    for (label, left, right) in rows {
        let pad = width - left.chars().count();
        let _ = writeln!(out, "{label:<10} {left}{:pad$}  VS  {right}", "");
    }
    out
}

fn render_country(country: &Country) -> String {
    let mut out = format!("{} {}\n", country.emoji, country.name);
    let _ = writeln!(out, "Capital:   {}", country.capital_label());
    let _ = writeln!(out, "Currency:  {}", country.currency_label());
    let _ = writeln!(out, "Languages: {}", country.language_names());
    out
}
