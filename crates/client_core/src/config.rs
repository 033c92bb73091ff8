//! Client settings: defaults, then an optional TOML file, then environment overrides.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://countries.trevorblades.com/";
pub const DEFAULT_SETTINGS_FILE: &str = "countries.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub graphql_endpoint: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            page_size: 10,
            request_timeout_secs: 15,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn set_endpoint(&mut self, raw: &str) -> anyhow::Result<()> {
        self.graphql_endpoint = parse_endpoint(raw)?.to_string();
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        parse_endpoint(&self.graphql_endpoint)?;
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    graphql_endpoint: Option<String>,
    page_size: Option<usize>,
    request_timeout_secs: Option<u64>,
}

/// Loads settings from `path`, or from `countries.toml` in the working directory when it exists.
/// An explicit path that cannot be read is an error; a missing default file is not.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

/// [`load_settings`] with the environment supplied by `lookup`.
pub fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings file");
    }

    apply_env_overrides(&mut settings, lookup)?;
    settings.validate()?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.graphql_endpoint {
        settings.set_endpoint(&v)?;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    Ok(())
}

/// Unparseable numbers are ignored; an unparseable endpoint is not.
fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("COUNTRIES_GRAPHQL_URL") {
        settings.set_endpoint(&v)?;
    }
    if let Some(v) = lookup("APP__GRAPHQL_ENDPOINT") {
        settings.set_endpoint(&v)?;
    }

    if let Some(v) = lookup("APP__PAGE_SIZE") {
        if let Ok(parsed) = v.trim().parse::<usize>() {
            settings.page_size = parsed;
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    Ok(())
}

fn parse_endpoint(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid GraphQL endpoint '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("GraphQL endpoint '{raw}' must use http or https");
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
