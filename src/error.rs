//! Error types for the wprdc host crate.

/// Top-level error type for configuration loading and search invocation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The search engine rejected the request.
    #[error(transparent)]
    Search(#[from] wprdc_search::SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = AppError::Config("at least one source must be configured".into());
        assert_eq!(
            err.to_string(),
            "config error: at least one source must be configured"
        );
    }

    #[test]
    fn search_errors_display_transparently() {
        let err = AppError::from(wprdc_search::SearchError::EmptyQuery);
        assert_eq!(err.to_string(), "query must not be empty");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
