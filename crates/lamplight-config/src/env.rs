//! Environment variable overrides for the provider section.

use tracing::info;

use crate::schema::LamplightConfig;

/// Overrides `provider.model_id`.
pub const MODEL_ID_VAR: &str = "LAMPLIGHT_MODEL_ID";
/// Overrides `provider.host`.
pub const HOST_VAR: &str = "LAMPLIGHT_HOST";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut LamplightConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using `lookup` to resolve variable names.
///
/// Empty values are ignored so an exported-but-blank variable does not
/// wipe out the file setting.
pub fn apply_overrides_from(
    config: &mut LamplightConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(model_id) = lookup(MODEL_ID_VAR).filter(|v| !v.trim().is_empty()) {
        info!("{MODEL_ID_VAR} overrides provider.model_id");
        config.provider.model_id = model_id.trim().to_string();
    }
    if let Some(host) = lookup(HOST_VAR).filter(|v| !v.trim().is_empty()) {
        info!("{HOST_VAR} overrides provider.host");
        config.provider.host = host.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_model_and_host() {
        let mut config = LamplightConfig::default();
        apply_overrides_from(
            &mut config,
            lookup_in(&[
                (MODEL_ID_VAR, "phi3:mini"),
                (HOST_VAR, "http://gpu-box:11434"),
            ]),
        );
        assert_eq!(config.provider.model_id, "phi3:mini");
        assert_eq!(config.provider.host, "http://gpu-box:11434");
    }

    #[test]
    fn missing_vars_leave_config_alone() {
        let mut config = LamplightConfig::default();
        apply_overrides_from(&mut config, lookup_in(&[]));
        assert_eq!(config.provider.model_id, "llama3.2:latest");
        assert_eq!(config.provider.host, "http://localhost:11434/");
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut config = LamplightConfig::default();
        apply_overrides_from(&mut config, lookup_in(&[(MODEL_ID_VAR, "  ")]));
        assert_eq!(config.provider.model_id, "llama3.2:latest");
    }
}
