use reqwest::StatusCode;
use shared::{domain::CountryCode, error::ApiException};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid GraphQL endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to countries API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("countries API returned {status}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    GraphQl(#[from] ApiException),
    #[error("{operation} response carried no data")]
    MissingData { operation: &'static str },
    #[error("country {0} not found")]
    NotFound(CountryCode),
}

impl ClientError {
    /// Display text followed by every `source()` in the chain, for one-line UI reporting.
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !out.contains(&text) {
                out.push_str(": ");
                out.push_str(&text);
            }
            source = err.source();
        }
        out
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
