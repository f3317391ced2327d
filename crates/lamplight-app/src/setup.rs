//! Turns the loaded config into a client, a tool registry and a session.

use std::sync::Arc;
use std::time::Duration;

use lamplight_ai::{
    AiError, FunctionChoice, GenerationOptions, LightsPlugin, OllamaClient, OllamaConfig,
    RetryPolicy, ServiceRegistry, Session, ToolError, ToolRegistry,
};
use lamplight_common::ConfigError;
use lamplight_config::schema::FunctionChoiceConfig;
use lamplight_config::{validation, LamplightConfig};
use tracing::info;

use crate::cli::Args;

/// Apply `--model` / `--host` on top of file and environment values, then
/// validate the merged result.
pub fn apply_cli_overrides(config: &mut LamplightConfig, args: &Args) -> Result<(), ConfigError> {
    if let Some(ref model) = args.model {
        config.provider.model_id = model.trim().to_string();
    }
    if let Some(ref host) = args.host {
        config.provider.host = host.trim().to_string();
    }
    validation::validate(config)
}

/// Log filter directive: the flag wins over the config file.
pub fn log_directive(args: &Args, config: &LamplightConfig) -> String {
    args.log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string())
}

/// Directive used before the config file has been read.
pub fn bootstrap_log_directive(args: &Args) -> String {
    log_directive(args, &LamplightConfig::default())
}

/// Register the Ollama client under the configured service id.
pub fn build_services(config: &LamplightConfig) -> Result<ServiceRegistry, AiError> {
    let provider = &config.provider;
    let client = OllamaClient::new(
        OllamaConfig::new(&provider.host, &provider.model_id)
            .with_request_timeout(Duration::from_secs(provider.request_timeout_secs.into()))
            .with_connect_timeout(Duration::from_secs(provider.connect_timeout_secs.into())),
    )?;
    info!(service = %provider.service_id, model = %provider.model_id, host = %provider.host, "Completion service ready");

    let mut services = ServiceRegistry::new();
    services.register(provider.service_id.clone(), Arc::new(client));
    Ok(services)
}

/// The lights tools, unless disabled by config or flag.
pub fn build_tools(config: &LamplightConfig, enabled: bool) -> Result<Option<Arc<ToolRegistry>>, ToolError> {
    if !(enabled && config.plugins.lights) {
        return Ok(None);
    }
    let mut registry = ToolRegistry::new();
    LightsPlugin::default().register(&mut registry)?;
    Ok(Some(Arc::new(registry)))
}

pub fn build_session(config: &LamplightConfig, tools: Option<Arc<ToolRegistry>>) -> Session {
    let provider = &config.provider;
    let mut session = Session::new(&provider.service_id)
        .with_options(generation_options(config))
        .with_function_choice(function_choice(config.session.function_choice))
        .with_max_tool_rounds(config.session.max_tool_rounds)
        .with_request_timeout(Duration::from_secs(provider.request_timeout_secs.into()))
        .with_retry(RetryPolicy {
            max_retries: provider.max_retries,
            backoff: Duration::from_millis(provider.retry_backoff_ms.into()),
        });
    if let Some(ref prompt) = config.session.system_prompt {
        session = session.with_system_prompt(prompt.clone());
    }
    if let Some(tools) = tools {
        session = session.with_tools(tools);
    }
    session
}

pub fn generation_options(config: &LamplightConfig) -> GenerationOptions {
    GenerationOptions {
        temperature: config.generation.temperature,
        max_tokens: config.generation.max_tokens,
        top_p: config.generation.top_p,
    }
}

fn function_choice(choice: FunctionChoiceConfig) -> FunctionChoice {
    match choice {
        FunctionChoiceConfig::Auto => FunctionChoice::Auto,
        FunctionChoiceConfig::None => FunctionChoice::None,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["lamplight"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = LamplightConfig::default();
        apply_cli_overrides(&mut config, &args(&["--model", "mistral:7b", "--host", "http://gpu:11434"]))
            .unwrap();
        assert_eq!(config.provider.model_id, "mistral:7b");
        assert_eq!(config.provider.host, "http://gpu:11434");
    }

    #[test]
    fn cli_flag_repairs_bad_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nhost = \"localhost:11434\"\n").unwrap();
        let flags = args(&["--host", "http://localhost:11434/"]);

        let mut config = lamplight_config::load_unvalidated(Some(&path)).unwrap();
        apply_cli_overrides(&mut config, &flags).unwrap();
        assert_eq!(config.provider.host, "http://localhost:11434/");
    }

    #[test]
    fn bad_file_value_without_flag_still_fails() {
        let mut config = LamplightConfig::default();
        config.provider.host = "localhost:11434".into();
        let err = apply_cli_overrides(&mut config, &args(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn bad_cli_override_is_rejected() {
        let mut config = LamplightConfig::default();
        let err = apply_cli_overrides(&mut config, &args(&["--host", "gpu:11434"])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn log_flag_beats_config() {
        let config = LamplightConfig::default();
        assert_eq!(log_directive(&args(&["--log-level", "trace"]), &config), "trace");
        assert_eq!(log_directive(&args(&[]), &config), config.logging.level.directive());
    }

    #[test]
    fn bootstrap_directive_uses_flag_or_default_level() {
        assert_eq!(bootstrap_log_directive(&args(&["--log-level", "debug"])), "debug");
        assert_eq!(
            bootstrap_log_directive(&args(&[])),
            LamplightConfig::default().logging.level.directive()
        );
    }

    #[test]
    fn service_registered_under_configured_id() {
        let mut config = LamplightConfig::default();
        config.provider.service_id = "my-service-id".into();
        let services = build_services(&config).unwrap();
        assert!(services.get("my-service-id").is_ok());
        assert_eq!(services.default_service(), Some("my-service-id"));
    }

    #[test]
    fn tools_follow_config_and_flag() {
        let mut config = LamplightConfig::default();
        assert_eq!(build_tools(&config, true).unwrap().map(|r| r.len()), Some(2));
        assert!(build_tools(&config, false).unwrap().is_none());
        config.plugins.lights = false;
        assert!(build_tools(&config, true).unwrap().is_none());
    }

    #[test]
    fn generation_settings_carry_over() {
        let mut config = LamplightConfig::default();
        config.generation.temperature = Some(0.3);
        config.generation.max_tokens = Some(128);
        let options = generation_options(&config);
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(128));
        assert_eq!(options.top_p, None);
        assert_eq!(function_choice(FunctionChoiceConfig::None), FunctionChoice::None);
    }
}
