use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_point_at_public_countries_api() {
    let settings = Settings::default();
    assert_eq!(settings.graphql_endpoint, "https://countries.trevorblades.com/");
    assert_eq!(settings.page_size, 10);
    assert_eq!(settings.request_timeout(), Duration::from_secs(15));
    settings.validate().expect("defaults are valid");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
graphql_endpoint = "http://127.0.0.1:4000/graphql"
page_size = 25
"#,
    )
    .expect("apply file");
    assert_eq!(settings.graphql_endpoint, "http://127.0.0.1:4000/graphql");
    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn env_overrides_win_over_file_and_ignore_bad_numbers() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "page_size = 25\nrequest_timeout_secs = 3").expect("apply file");
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("COUNTRIES_GRAPHQL_URL", "http://localhost:8080"),
            ("APP__PAGE_SIZE", " 5 "),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
        ]),
    )
    .expect("apply env");
    assert_eq!(settings.graphql_endpoint, "http://localhost:8080/");
    assert_eq!(settings.page_size, 5);
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn app_prefixed_endpoint_beats_legacy_name() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("COUNTRIES_GRAPHQL_URL", "http://legacy.example"),
            ("APP__GRAPHQL_ENDPOINT", "https://graph.example/api"),
        ]),
    )
    .expect("apply env");
    assert_eq!(settings.graphql_endpoint, "https://graph.example/api");
}

#[test]
fn rejects_non_http_endpoints_and_zero_page_size() {
    let mut settings = Settings::default();
    assert!(settings.set_endpoint("ftp://countries.example").is_err());
    assert!(settings.set_endpoint("not a url").is_err());

    settings.page_size = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn unknown_keys_in_file_are_tolerated_but_bad_types_are_not() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "theme = \"dark\"").expect("unknown key");
    assert!(apply_file(&mut settings, "page_size = \"ten\"").is_err());
}

#[test]
fn explicit_settings_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("countries_missing_{suffix}.toml"));
    let err =
        load_settings_with(Some(&missing), env_from(&[])).expect_err("missing explicit file");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn loads_explicit_settings_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("countries_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("countries.toml");
    fs::write(&path, "request_timeout_secs = 7\n").expect("write settings");

    let settings = load_settings_with(Some(&path), env_from(&[])).expect("load settings");
    assert_eq!(settings.request_timeout_secs, 7);

    let settings = load_settings_with(
        Some(&path),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "9"), ("APP__PAGE_SIZE", "4")]),
    )
    .expect("load settings with env");
    assert_eq!(settings.request_timeout_secs, 9);
    assert_eq!(settings.page_size, 4);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
