//! Lamplight configuration system.
//!
//! TOML-based configuration with environment overrides and full
//! validation. All sections use sensible defaults so partial configs
//! work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lamplight_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.provider.model_id);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, HOST_VAR, MODEL_ID_VAR};
pub use schema::LamplightConfig;

use std::path::Path;

use lamplight_common::ConfigError;

/// Load and validate config from `path`, or from the platform default
/// path when `None`.
///
/// The default file is created with a commented template if missing; an
/// explicit path must exist. Environment overrides are applied before the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> Result<LamplightConfig, ConfigError> {
    let config = load_unvalidated(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Like [`load_config`], but returns the merged file and environment
/// values without validating them. Callers layering further overrides on
/// top must run [`validation::validate`] themselves.
pub fn load_unvalidated(path: Option<&Path>) -> Result<LamplightConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Serialize a config to a pretty-printed TOML string.
pub fn config_to_toml(config: &LamplightConfig) -> String {
    toml::to_string_pretty(config)
        .unwrap_or_else(|e| format!("# failed to serialize config: {e}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_tool_rounds = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.session.max_tool_rounds, 3);
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_tool_rounds = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_unvalidated_keeps_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nhost = \"localhost:11434\"\n").unwrap();

        let config = load_unvalidated(Some(&path)).unwrap();
        assert_eq!(config.provider.host, "localhost:11434");
        assert!(validation::validate(&config).is_err());
    }

    #[test]
    fn load_config_missing_explicit_path_is_an_error() {
        let err = load_config(Some(Path::new("/tmp/lamplight_missing/config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn config_to_toml_round_trips() {
        let config = LamplightConfig::default();
        let text = config_to_toml(&config);
        assert!(text.contains("[provider]"));
        let back: LamplightConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.provider.model_id, config.provider.model_id);
    }
}
