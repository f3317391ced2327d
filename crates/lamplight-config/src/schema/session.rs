//! Chat session behaviour.

use serde::{Deserialize, Serialize};

/// Whether the model may call registered tools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum FunctionChoiceConfig {
    #[default]
    Auto,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prepended to every request as a system message.
    pub system_prompt: Option<String>,
    /// Tool-call round trips allowed per user turn (valid range: 1-20).
    pub max_tool_rounds: u32,
    pub function_choice: FunctionChoiceConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_tool_rounds: 5,
            function_choice: FunctionChoiceConfig::Auto,
        }
    }
}
