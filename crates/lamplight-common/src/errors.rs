use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Top-level error for the `lamplight` binary.
#[derive(Debug, thiserror::Error)]
pub enum LamplightError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("provider.host must start with http://".into());
        assert_eq!(
            err.to_string(),
            "config validation error: provider.host must start with http://"
        );
    }

    #[test]
    fn lamplight_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: LamplightError = config_err.into();
        assert!(matches!(err, LamplightError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn lamplight_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: LamplightError = io_err.into();
        assert!(matches!(err, LamplightError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn lamplight_error_ai_display() {
        let err = LamplightError::Ai("model unavailable".into());
        assert_eq!(err.to_string(), "ai error: model unavailable");
    }
}
