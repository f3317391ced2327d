//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber` filter directive covering the workspace crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "lamplight=trace,lamplight_ai=trace,lamplight_config=trace",
            LogLevel::Debug => "lamplight=debug,lamplight_ai=debug,lamplight_config=debug",
            LogLevel::Info => "lamplight=info,lamplight_ai=info,lamplight_config=info",
            LogLevel::Warn => "lamplight=warn,lamplight_ai=warn,lamplight_config=warn",
            LogLevel::Error => "lamplight=error,lamplight_ai=error,lamplight_config=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_quiet() {
        assert_eq!(LoggingConfig::default().level, LogLevel::Warn);
    }

    #[test]
    fn directive_names_every_crate() {
        let d = LogLevel::Debug.directive();
        assert!(d.contains("lamplight=debug"));
        assert!(d.contains("lamplight_ai=debug"));
        assert!(d.contains("lamplight_config=debug"));
    }
}
