//! Provider section validation: model id, host URL, timeouts, retries.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::LamplightConfig;

use super::helpers::validate_range;

/// Model tags look like `llama3.2:latest` or `library/qwen2.5:7b`.
static MODEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._:/\-]+$").unwrap());

pub(crate) fn validate_provider(errors: &mut Vec<String>, config: &LamplightConfig) {
    let provider = &config.provider;

    if provider.model_id.is_empty() {
        errors.push("provider.model_id must not be empty".into());
    } else if !MODEL_ID_RE.is_match(&provider.model_id) {
        errors.push(format!(
            "provider.model_id = {:?} contains unsupported characters",
            provider.model_id
        ));
    }

    if !(provider.host.starts_with("http://") || provider.host.starts_with("https://")) {
        errors.push(format!(
            "provider.host = {:?} must start with http:// or https://",
            provider.host
        ));
    }

    if provider.service_id.trim().is_empty() {
        errors.push("provider.service_id must not be empty".into());
    }

    validate_range(
        errors,
        "provider.request_timeout_secs",
        provider.request_timeout_secs,
        1,
        3600,
    );
    validate_range(
        errors,
        "provider.connect_timeout_secs",
        provider.connect_timeout_secs,
        1,
        3600,
    );
    validate_range(errors, "provider.max_retries", provider.max_retries, 0, 5);
}
