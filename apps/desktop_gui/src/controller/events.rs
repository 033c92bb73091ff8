//! UI/backend events and error modeling for the desktop GUI controller.

use shared::domain::{Country, CountryCode};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    CountriesLoaded(Vec<Country>),
    CountriesFailed(UiError),
    CountryDetailLoaded(Country),
    CountryDetailFailed { code: CountryCode, error: UiError },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Api,
    NotFound,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchCountries,
    FetchDetail,
    General,
}

/// One human line for the single error display of a failed fetch.
pub fn classify_fetch_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Backend worker startup failure; verify the configured endpoint and relaunch.".to_string()
    } else if lower.contains("timed out") || lower.contains("operation timed out") {
        "Countries API did not answer in time; check your network.".to_string()
    } else if lower.contains("error sending request")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("failed to connect")
    {
        "Countries API unreachable; check your network connection.".to_string()
    } else if lower.contains("not found") {
        "That country does not exist in the countries API.".to_string()
    } else {
        format!("Error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("graphql error")
            || message_lower.contains("returned 4")
            || message_lower.contains("returned 5")
            || message_lower.contains("carried no data")
        {
            UiErrorCategory::Api
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("error sending request")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn summary(&self) -> String {
        classify_fetch_failure(&self.message)
    }
}
