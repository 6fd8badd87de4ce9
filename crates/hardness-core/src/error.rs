use std::fmt;

/// Core error types for the hardness assistant
#[derive(Debug)]
pub enum HardnessError {
    /// Configuration-related errors (missing stage, missing environment)
    Config(ConfigError),

    /// Network transport errors (timeout, connection failure)
    Transport(TransportError),

    /// Non-success responses from a reasoning endpoint
    Api(ApiError),

    /// Feedback store persistence errors
    Persistence(PersistenceError),
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
    /// Requested stage is not present in the stage catalog
    UnknownStage(String),

    /// Required environment variable is not set
    MissingEnvironment(String),

    /// Invalid configuration value
    InvalidValue {
        parameter: String,
        value: String,
        expected: String,
    },
}

/// Network and HTTP transport errors
#[derive(Debug)]
pub enum TransportError {
    /// Request exceeded the per-call timeout
    Timeout(String),

    /// Connection-level failure (DNS, refused, reset)
    Connection(String),

    /// Response body could not be decoded
    InvalidResponse(String),
}

/// Non-200 response from a reasoning endpoint. The caller displays the
/// status and snippet verbatim and does not retry.
#[derive(Debug)]
pub struct ApiError {
    pub status: u16,
    pub body_snippet: String,
}

/// Feedback store persistence errors
#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem write failed
    WriteFailed { path: String, message: String },

    /// Filesystem read failed
    ReadFailed { path: String, message: String },

    /// Stored data could not be parsed
    Corrupt(String),
}

impl fmt::Display for HardnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardnessError::Config(e) => write!(f, "Configuration error: {}", e),
            HardnessError::Transport(e) => write!(f, "Transport error: {}", e),
            HardnessError::Api(e) => write!(f, "API error: {}", e),
            HardnessError::Persistence(e) => write!(f, "Persistence error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownStage(name) => {
                write!(f, "no stage named '{}' in the stage catalog", name)
            }
            ConfigError::MissingEnvironment(var) => {
                write!(f, "required environment variable {} is not set", var)
            }
            ConfigError::InvalidValue {
                parameter,
                value,
                expected,
            } => write!(
                f,
                "invalid value '{}' for {}: expected {}",
                value, parameter, expected
            ),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout(msg) => write!(f, "request timed out: {}", msg),
            TransportError::Connection(msg) => write!(f, "connection failed: {}", msg),
            TransportError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} - {}", self.status, self.body_snippet)
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::WriteFailed { path, message } => {
                write!(f, "could not write {}: {}", path, message)
            }
            PersistenceError::ReadFailed { path, message } => {
                write!(f, "could not read {}: {}", path, message)
            }
            PersistenceError::Corrupt(msg) => write!(f, "stored feedback is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for HardnessError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for TransportError {}
impl std::error::Error for ApiError {}
impl std::error::Error for PersistenceError {}

impl From<ConfigError> for HardnessError {
    fn from(e: ConfigError) -> Self {
        HardnessError::Config(e)
    }
}

impl From<TransportError> for HardnessError {
    fn from(e: TransportError) -> Self {
        HardnessError::Transport(e)
    }
}

impl From<ApiError> for HardnessError {
    fn from(e: ApiError) -> Self {
        HardnessError::Api(e)
    }
}

impl From<PersistenceError> for HardnessError {
    fn from(e: PersistenceError) -> Self {
        HardnessError::Persistence(e)
    }
}

/// Result type alias for hardness operations
pub type HardnessResult<T> = Result<T, HardnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = HardnessError::Api(ApiError {
            status: 502,
            body_snippet: "upstream unavailable".to_string(),
        });
        assert_eq!(err.to_string(), "API error: HTTP 502 - upstream unavailable");
    }

    #[test]
    fn test_persistence_error_display() {
        let err = HardnessError::Persistence(PersistenceError::ReadFailed {
            path: "feedback.csv".to_string(),
            message: "Not a directory".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Persistence error: could not read feedback.csv: Not a directory"
        );
    }
}
