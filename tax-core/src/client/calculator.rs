use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CalculationRequest, CalculationResponse, HealthStatus};

/// Shown whenever a failure carries no message from the service itself.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to calculate tax";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// The service answered with a non-success status. The message is the
    /// service's own `message` field, or the generic fallback.
    #[error("{0}")]
    Service(String),

    /// No response was received at all.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success status arrived with a body that is not a valid response.
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CalculationError {
    /// Text to put in front of the user for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Service(message) if !message.is_empty() => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Remote tax calculation. One request, one response: implementations do not
/// retry and do not time out.
#[async_trait]
pub trait TaxCalculator: Send + Sync {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError>;

    async fn health(&self) -> Result<HealthStatus, CalculationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_shown_verbatim() {
        let err = CalculationError::Service("Invalid ZIP code".to_string());
        assert_eq!(err.user_message(), "Invalid ZIP code");
        assert_eq!(err.to_string(), "Invalid ZIP code");
    }

    #[test]
    fn other_failures_fall_back_to_generic_message() {
        let cases = [
            CalculationError::Service(String::new()),
            CalculationError::Transport("connection refused".to_string()),
            CalculationError::Decode("expected value".to_string()),
            CalculationError::Configuration("bad url".to_string()),
        ];

        for err in cases {
            assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE, "{err:?}");
        }
    }
}
