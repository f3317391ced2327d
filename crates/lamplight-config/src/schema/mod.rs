//! Configuration schema types for Lamplight.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults of a stock local Ollama install.

mod generation;
mod logging;
mod plugins;
mod provider;
mod session;

pub use generation::*;
pub use logging::*;
pub use plugins::*;
pub use provider::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Lamplight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LamplightConfig {
    pub provider: ProviderConfig,
    pub generation: GenerationConfig,
    pub session: SessionConfig,
    pub plugins: PluginsConfig,
    pub logging: LoggingConfig,
}
