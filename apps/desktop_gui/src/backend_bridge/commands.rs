//! Backend commands queued from UI to backend worker.

use shared::domain::CountryCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCountries,
    FetchCountryDetail { code: CountryCode },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCountries => "fetch_countries",
            BackendCommand::FetchCountryDetail { .. } => "fetch_country_detail",
        }
    }
}
