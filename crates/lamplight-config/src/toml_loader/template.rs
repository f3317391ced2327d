//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Lamplight Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# LAMPLIGHT_MODEL_ID and LAMPLIGHT_HOST override the provider section.

[provider]
# model_id = "llama3.2:latest"
# host = "http://localhost:11434/"
# service_id = "ollama"
# request_timeout_secs = 120   # 1-3600
# connect_timeout_secs = 10    # 1-3600
# max_retries = 1              # 0-5, timed-out requests only
# retry_backoff_ms = 500

[generation]
# temperature = 0.7            # 0.0-2.0
# max_tokens = 512
# top_p = 0.9                  # 0.0-1.0

[session]
# system_prompt = "You are a helpful assistant"
# max_tool_rounds = 5          # 1-20
# function_choice = "auto"     # auto, none

[plugins]
# lights = true

[logging]
# level = "warn"               # trace, debug, info, warn, error
"##
    .to_string()
}
