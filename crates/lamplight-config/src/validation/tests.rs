//! Tests for the full validation pipeline.

use super::*;
use crate::schema::LamplightConfig;

#[test]
fn default_config_validates() {
    let config = LamplightConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_model_id() {
    let mut config = LamplightConfig::default();
    config.provider.model_id = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.model_id"));
}

#[test]
fn catches_model_id_with_spaces() {
    let mut config = LamplightConfig::default();
    config.provider.model_id = "llama 3".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("unsupported characters"));
}

#[test]
fn accepts_namespaced_model_id() {
    let mut config = LamplightConfig::default();
    config.provider.model_id = "library/qwen2.5:7b-instruct".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_host_without_scheme() {
    let mut config = LamplightConfig::default();
    config.provider.host = "localhost:11434".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.host"));
}

#[test]
fn catches_zero_timeout() {
    let mut config = LamplightConfig::default();
    config.provider.request_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.request_timeout_secs"));
}

#[test]
fn catches_too_many_retries() {
    let mut config = LamplightConfig::default();
    config.provider.max_retries = 9;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.max_retries"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = LamplightConfig::default();
    config.generation.temperature = Some(3.5);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.temperature"));
}

#[test]
fn unset_generation_options_are_fine() {
    let mut config = LamplightConfig::default();
    config.generation.temperature = None;
    config.generation.top_p = None;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_max_tokens() {
    let mut config = LamplightConfig::default();
    config.generation.max_tokens = Some(0);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.max_tokens"));
}

#[test]
fn catches_unbounded_tool_rounds() {
    let mut config = LamplightConfig::default();
    config.session.max_tool_rounds = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.max_tool_rounds"));
}

#[test]
fn catches_blank_system_prompt() {
    let mut config = LamplightConfig::default();
    config.session.system_prompt = Some("   ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.system_prompt"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = LamplightConfig::default();
    config.provider.host = "ftp://example".into();
    config.generation.top_p = Some(1.5);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.host"));
    assert!(err.contains("generation.top_p"));
    assert!(err.contains("; "));
}
