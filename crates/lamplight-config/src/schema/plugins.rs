use serde::{Deserialize, Serialize};

/// Built-in plugins exposed to the model as tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    pub lights: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self { lights: true }
    }
}
