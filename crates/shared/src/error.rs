use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the `errors` array of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }
}

#[derive(Debug, Error)]
#[error("graphql error: {}", summarize(.errors))]
pub struct ApiException {
    pub errors: Vec<GraphQlError>,
}

impl ApiException {
    pub fn new(errors: Vec<GraphQlError>) -> Self {
        Self { errors }
    }
}

fn summarize(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "unspecified".to_string();
    }
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
