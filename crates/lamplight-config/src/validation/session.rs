//! Validation for the generation and session sections.

use crate::schema::LamplightConfig;

use super::helpers::{validate_optional_range_f64, validate_range};

pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &LamplightConfig) {
    validate_optional_range_f64(
        errors,
        "generation.temperature",
        config.generation.temperature,
        0.0,
        2.0,
    );
    validate_optional_range_f64(errors, "generation.top_p", config.generation.top_p, 0.0, 1.0);
    if config.generation.max_tokens == Some(0) {
        errors.push("generation.max_tokens must be greater than 0".into());
    }
}

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &LamplightConfig) {
    validate_range(
        errors,
        "session.max_tool_rounds",
        config.session.max_tool_rounds,
        1,
        20,
    );
    if let Some(prompt) = &config.session.system_prompt {
        if prompt.trim().is_empty() {
            errors.push("session.system_prompt must not be blank when set".into());
        }
    }
}
