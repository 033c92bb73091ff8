use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Country, CountryCode},
    error::{ApiException, GraphQlError},
    fetch::FetchState,
    protocol::{
        countries_request, country_request, CountriesData, CountryData, GraphQlRequest,
        GraphQlResponse, COUNTRIES_OPERATION, COUNTRY_OPERATION,
    },
};
use tracing::{info, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_settings, Settings};
pub use error::ClientError;

/// Longest slice of a non-2xx body kept on [`ClientError::Status`].
const MAX_ERROR_BODY_LEN: usize = 512;

#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, ClientError>;
    async fn country(&self, code: &CountryCode) -> Result<Country, ClientError>;
}

pub struct GraphQlCountryClient {
    http: Client,
    endpoint: Url,
}

impl GraphQlCountryClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let endpoint =
            Url::parse(&settings.graphql_endpoint).map_err(|source| ClientError::InvalidEndpoint {
                endpoint: settings.graphql_endpoint.clone(),
                source,
            })?;
        Self::with_timeout(endpoint, settings.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<V, T>(&self, request: &GraphQlRequest<'_, V>) -> Result<Option<T>, ClientError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // GraphQL servers commonly answer validation failures with 400 plus an `errors` array.
            if let Some(errors) = graphql_errors_in(&body) {
                return Err(ApiException::new(errors).into());
            }
            return Err(ClientError::Status {
                status,
                body: truncate_body(body),
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        Ok(envelope.into_result()?)
    }
}

#[async_trait]
impl CountrySource for GraphQlCountryClient {
    async fn list_countries(&self) -> Result<Vec<Country>, ClientError> {
        info!(endpoint = %self.endpoint, "fetching countries");
        let data: CountriesData = self
            .execute(&countries_request())
            .await?
            .ok_or(ClientError::MissingData {
                operation: COUNTRIES_OPERATION,
            })?;
        info!(count = data.countries.len(), "countries fetched");
        Ok(data.countries)
    }

    async fn country(&self, code: &CountryCode) -> Result<Country, ClientError> {
        info!(code = %code, "fetching country details");
        let data: CountryData = self
            .execute(&country_request(code))
            .await?
            .ok_or(ClientError::MissingData {
                operation: COUNTRY_OPERATION,
            })?;
        data.country
            .ok_or_else(|| ClientError::NotFound(code.clone()))
    }
}

/// Runs the list query and folds the outcome into the tri-state the views consume.
pub async fn load_countries(source: &dyn CountrySource) -> FetchState<Arc<[Country]>> {
    match source.list_countries().await {
        Ok(countries) => FetchState::Ready(countries.into()),
        Err(err) => {
            warn!("countries fetch failed: {}", err.describe());
            FetchState::Failed(err.describe())
        }
    }
}

pub async fn load_country(source: &dyn CountrySource, code: &CountryCode) -> FetchState<Country> {
    match source.country(code).await {
        Ok(country) => FetchState::Ready(country),
        Err(err) if err.is_not_found() => {
            info!(code = %code, "country does not exist");
            FetchState::Failed(err.describe())
        }
        Err(err) => {
            warn!(code = %code, "country fetch failed: {}", err.describe());
            FetchState::Failed(err.describe())
        }
    }
}

fn graphql_errors_in(body: &str) -> Option<Vec<GraphQlError>> {
    let envelope: GraphQlResponse<serde_json::Value> = serde_json::from_str(body).ok()?;
    if envelope.errors.is_empty() {
        None
    } else {
        Some(envelope.errors)
    }
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_LEN {
        let mut cut = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
