use std::time::Duration;

use docdelta::presentation::config::AzureOpenAiSettings;
use docdelta::presentation::{Environment, Settings, request_body_limit};

#[test]
fn given_default_settings_when_reading_limits_then_match_documented_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.max_upload_bytes(), 16 * 1024 * 1024);
    assert_eq!(settings.azure_openai.request_timeout(), Duration::from_secs(300));
    assert_eq!(settings.azure_openai.generation().max_tokens, 4000);
    assert_eq!(settings.profile().organisation, "ActiZ");
}

#[test]
fn given_blank_key_when_reading_credentials_then_treats_backend_as_unconfigured() {
    let azure = AzureOpenAiSettings {
        endpoint: Some("https://example.openai.azure.com".to_string()),
        api_key: Some("   ".to_string()),
        ..AzureOpenAiSettings::default()
    };

    assert!(azure.credentials().is_none());
    assert_eq!(azure.api_key_length(), 0);
}

#[test]
fn given_endpoint_and_key_when_reading_credentials_then_returns_them() {
    let azure = AzureOpenAiSettings {
        endpoint: Some("https://example.openai.azure.com".to_string()),
        api_key: Some("secret".to_string()),
        ..AzureOpenAiSettings::default()
    };

    let credentials = azure.credentials().unwrap();

    assert_eq!(credentials.api_key, "secret");
    assert_eq!(credentials.deployment, "gpt-4");
}

#[test]
fn given_settings_debug_output_when_formatting_then_hides_api_key() {
    let azure = AzureOpenAiSettings {
        api_key: Some("super-secret-key".to_string()),
        ..AzureOpenAiSettings::default()
    };

    assert!(!format!("{azure:?}").contains("super-secret-key"));
}

#[test]
fn given_debug_flag_when_building_tracing_config_then_forces_debug_level() {
    let settings = Settings {
        debug: true,
        ..Settings::default()
    };

    let tracing = settings.tracing(Environment::Test);

    assert_eq!(tracing.level, "debug");
    assert_eq!(tracing.environment, "test");
}

#[test]
fn given_upload_limit_when_sizing_request_body_then_allows_two_files_and_overhead() {
    assert_eq!(request_body_limit(16 * 1024 * 1024), 33 * 1024 * 1024);
}
