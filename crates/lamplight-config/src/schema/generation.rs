//! Sampling options forwarded to the model.

use serde::{Deserialize, Serialize};

/// Generation options. Unset fields are left to the model's own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: Option<f64>,
    /// Upper bound on generated tokens (Ollama `num_predict`).
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
}
