use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a country as returned by the remote API (ISO 3166-1 alpha-2).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(pub String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalizes user input (`" us "` becomes `"US"`).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: CountryCode,
    pub name: String,
    pub emoji: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl Country {
    pub fn language_names(&self) -> String {
        self.languages
            .iter()
            .map(|language| language.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn capital_label(&self) -> &str {
        self.capital.as_deref().unwrap_or("n/a")
    }

    pub fn currency_label(&self) -> &str {
        self.currency.as_deref().unwrap_or("n/a")
    }
}
