//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod provider;
mod session;

#[cfg(test)]
mod tests;

use crate::schema::LamplightConfig;
use lamplight_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LamplightConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    provider::validate_provider(&mut errors, config);
    session::validate_generation(&mut errors, config);
    session::validate_session(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
