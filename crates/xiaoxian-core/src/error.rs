use thiserror::Error;

/// Top-level error type for the Xiaoxian core.
///
/// Session and resolver operations are total and never produce this error;
/// it covers the ambient concerns around them (configuration files and
/// serialisation of view snapshots).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XiaoxianError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for XiaoxianError {
    fn from(err: toml::de::Error) -> Self {
        XiaoxianError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for XiaoxianError {
    fn from(err: toml::ser::Error) -> Self {
        XiaoxianError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for XiaoxianError {
    fn from(err: serde_json::Error) -> Self {
        XiaoxianError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Xiaoxian operations.
pub type Result<T> = std::result::Result<T, XiaoxianError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = XiaoxianError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = XiaoxianError::Serialization("bad json".to_string());
        assert_eq!(err.to_string(), "Serialization error: bad json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: XiaoxianError = io_err.into();
        assert!(matches!(err, XiaoxianError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is {{ not toml").unwrap_err();
        let err: XiaoxianError = toml_err.into();
        assert!(matches!(err, XiaoxianError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: XiaoxianError = json_err.into();
        assert!(matches!(err, XiaoxianError::Serialization(_)));
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", XiaoxianError::Config("x".into()));
        assert!(dbg.contains("Config"));
    }
}
