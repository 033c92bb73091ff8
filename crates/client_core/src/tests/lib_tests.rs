use super::*;
use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct FakeGraphQlState {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn handle_graphql(
    State(state): State<FakeGraphQlState>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().await.push(request);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (state.status, Json(state.body.clone()))
}

async fn spawn_graphql_server_with(
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
) -> Result<(Url, Arc<Mutex<Vec<Value>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = FakeGraphQlState {
        status,
        body,
        delay,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/", post(handle_graphql))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}/"))?, requests))
}

async fn spawn_graphql_server(body: Value) -> Result<(Url, Arc<Mutex<Vec<Value>>>)> {
    spawn_graphql_server_with(StatusCode::OK, body, None).await
}

fn countries_body() -> Value {
    json!({
        "data": {
            "countries": [
                {
                    "code": "US",
                    "name": "United States",
                    "emoji": "🇺🇸",
                    "capital": "Washington D.C.",
                    "currency": "USD,USN,USS",
                    "languages": [{ "name": "English" }]
                },
                {
                    "code": "AQ",
                    "name": "Antarctica",
                    "emoji": "🇦🇶",
                    "capital": null,
                    "currency": null,
                    "languages": []
                }
            ]
        }
    })
}

#[tokio::test]
async fn lists_countries_from_graphql_response() {
    let (endpoint, requests) = spawn_graphql_server(countries_body())
        .await
        .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let countries = client.list_countries().await.expect("list countries");
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].code, CountryCode::from("US"));
    assert_eq!(countries[0].language_names(), "English");
    assert_eq!(countries[1].capital, None);

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["operationName"], "GetCountries");
    assert!(requests[0]["query"]
        .as_str()
        .expect("query string")
        .contains("languages"));
}

#[tokio::test]
async fn fetches_single_country_with_code_variable() {
    let (endpoint, requests) = spawn_graphql_server(json!({
        "data": {
            "country": {
                "code": "BR",
                "name": "Brazil",
                "emoji": "🇧🇷",
                "capital": "Brasília",
                "currency": "BRL",
                "languages": [{ "name": "Portuguese" }]
            }
        }
    }))
    .await
    .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let country = client
        .country(&CountryCode::from("BR"))
        .await
        .expect("country");
    assert_eq!(country.name, "Brazil");
    assert_eq!(country.capital_label(), "Brasília");

    let requests = requests.lock().await;
    assert_eq!(requests[0]["operationName"], "GetCountry");
    assert_eq!(requests[0]["variables"], json!({ "code": "BR" }));
}

#[tokio::test]
async fn null_country_maps_to_not_found() {
    let (endpoint, _) = spawn_graphql_server(json!({ "data": { "country": null } }))
        .await
        .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let err = client
        .country(&CountryCode::from("ZZ"))
        .await
        .expect_err("unknown code");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "country ZZ not found");
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let (endpoint, _) = spawn_graphql_server(json!({
        "data": null,
        "errors": [{ "message": "Cannot query field \"population\" on type \"Country\"." }]
    }))
    .await
    .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let err = client.list_countries().await.expect_err("graphql error");
    assert!(matches!(err, ClientError::GraphQl(_)));
    assert!(err.to_string().contains("Cannot query field"));
}

#[tokio::test]
async fn bad_request_with_errors_body_is_reported_as_graphql_error() {
    let (endpoint, _) = spawn_graphql_server_with(
        StatusCode::BAD_REQUEST,
        json!({ "errors": [{ "message": "Syntax Error: Unexpected Name \"quer\"." }] }),
        None,
    )
    .await
    .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let err = client.list_countries().await.expect_err("400");
    assert!(matches!(err, ClientError::GraphQl(_)));
}

#[tokio::test]
async fn server_error_without_graphql_body_keeps_status() {
    let (endpoint, _) = spawn_graphql_server_with(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "message": "maintenance" }),
        None,
    )
    .await
    .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let err = client.list_countries().await.expect_err("503");
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert!(body.contains("maintenance"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_data_is_an_error() {
    let (endpoint, _) = spawn_graphql_server(json!({}))
        .await
        .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);

    let err = client.list_countries().await.expect_err("no data");
    assert!(matches!(
        err,
        ClientError::MissingData {
            operation: "GetCountries"
        }
    ));
}

#[tokio::test]
async fn slow_server_hits_request_timeout() {
    let (endpoint, _) = spawn_graphql_server_with(
        StatusCode::OK,
        countries_body(),
        Some(Duration::from_secs(2)),
    )
    .await
    .expect("spawn server");
    let client = GraphQlCountryClient::with_timeout(endpoint, Duration::from_millis(100))
        .expect("build client");

    let err = client.list_countries().await.expect_err("timeout");
    match err {
        ClientError::Http(inner) => assert!(inner.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn load_countries_folds_into_fetch_state() {
    let (endpoint, _) = spawn_graphql_server(countries_body())
        .await
        .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);
    let state = load_countries(&client).await;
    assert_eq!(state.ready().map(|countries| countries.len()), Some(2));

    let unreachable = GraphQlCountryClient::with_timeout(
        Url::parse("http://127.0.0.1:9/").expect("url"),
        Duration::from_secs(2),
    )
    .expect("build client");
    let state = load_countries(&unreachable).await;
    let reason = state.failure().expect("failed state");
    assert!(reason.starts_with("request to countries API failed"));
}

#[tokio::test]
async fn load_country_reports_unknown_code_as_failure() {
    let (endpoint, _) = spawn_graphql_server(json!({ "data": { "country": null } }))
        .await
        .expect("spawn server");
    let client = GraphQlCountryClient::new(endpoint);
    let state = load_country(&client, &CountryCode::from("ZZ")).await;
    assert_eq!(state.failure(), Some("country ZZ not found"));
}

#[test]
fn from_settings_rejects_invalid_endpoint() {
    let settings = Settings {
        graphql_endpoint: "::not-a-url::".to_string(),
        ..Settings::default()
    };
    let err = GraphQlCountryClient::from_settings(&settings)
        .err()
        .expect("invalid endpoint");
    assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    assert!(err.describe().contains("::not-a-url::"));
}

#[test]
fn truncates_long_bodies_on_char_boundaries() {
    let body = "é".repeat(MAX_ERROR_BODY_LEN);
    let truncated = truncate_body(body);
    assert!(truncated.len() <= MAX_ERROR_BODY_LEN);
    assert!(truncated.chars().all(|c| c == 'é'));
}
