//! Errors crossing the collaborator boundary.

use thiserror::Error;

/// Fetching candidates failed. Fatal to the roll session, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Request failed to send or the connection dropped
    #[error("Request error: {0}")]
    Request(String),
    /// Server answered with an error status
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// The filter left nothing to roll
    #[error("No restaurants match the filter")]
    NoMatches,
}

impl ServiceError {
    /// Text shown in place of the result label.
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}

/// A best-effort counter increment failed. Logged, never surfaced or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Counter update failed: {0}")]
pub struct CounterUpdateError(pub String);

impl From<ServiceError> for CounterUpdateError {
    fn from(err: ServiceError) -> Self {
        Self(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_show_the_backend_message() {
        let err = ServiceError::Server {
            status: 500,
            message: "database is down".into(),
        };
        assert_eq!(err.display_message(), "database is down");
    }

    #[test]
    fn counter_errors_wrap_service_errors() {
        let err: CounterUpdateError = ServiceError::Request("timed out".into()).into();
        assert_eq!(err.to_string(), "Counter update failed: Request error: timed out");
    }
}
