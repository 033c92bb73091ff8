use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::{Country, CountryCode},
    error::{ApiException, GraphQlError},
};

pub const COUNTRIES_OPERATION: &str = "GetCountries";
pub const COUNTRY_OPERATION: &str = "GetCountry";

pub const COUNTRIES_QUERY: &str = r#"query GetCountries {
  countries {
    code
    name
    emoji
    capital
    currency
    languages {
      name
    }
  }
}"#;

pub const COUNTRY_QUERY: &str = r#"query GetCountry($code: ID!) {
  country(code: $code) {
    code
    name
    emoji
    capital
    currency
    languages {
      name
    }
  }
}"#;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
    pub operation_name: &'a str,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryVariables {
    pub code: CountryCode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct GraphQlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Errors win over partial data, so a response with both is reported as a failure.
    pub fn into_result(self) -> Result<Option<T>, ApiException> {
        if !self.errors.is_empty() {
            return Err(ApiException::new(self.errors));
        }
        Ok(self.data)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesData {
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryData {
    pub country: Option<Country>,
}

pub fn countries_request() -> GraphQlRequest<'static, NoVariables> {
    GraphQlRequest {
        query: COUNTRIES_QUERY,
        variables: NoVariables {},
        operation_name: COUNTRIES_OPERATION,
    }
}

pub fn country_request(code: &CountryCode) -> GraphQlRequest<'static, CountryVariables> {
    GraphQlRequest {
        query: COUNTRY_QUERY,
        variables: CountryVariables { code: code.clone() },
        operation_name: COUNTRY_OPERATION,
    }
}
