use thiserror::Error;

/// Failures raised by a browser session
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out after {timeout_ms}ms waiting for '{selector}'")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("element not found: '{selector}'")]
    ElementNotFound { selector: String },

    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<std::sync::Arc<playwright::Error>> for DriverError {
    fn from(err: std::sync::Arc<playwright::Error>) -> Self {
        DriverError::Protocol(err.to_string())
    }
}

pub type DriverResult<T> = Result<T, DriverError>;
