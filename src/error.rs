use thiserror::Error;

/// Main error type for the agent service
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    ToolExecution(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid function call: {0}")]
    InvalidFunctionCall(String),

    /// Upstream answered but had nothing for the query
    #[error("{0}")]
    NoData(String),

    #[error("No response received from AI")]
    EmptyResponse,

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Maximum iterations exceeded: {0}")]
    MaxIterations(usize),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::Validation(_) | AgentError::RateLimit { .. } | AgentError::Timeout(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::Config(_) => "CONFIG_ERROR",
            AgentError::Serialization(_) => "SERIALIZATION_ERROR",
            AgentError::Validation(_) => "VALIDATION_ERROR",
            AgentError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            AgentError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            AgentError::InvalidFunctionCall(_) => "INVALID_FUNCTION_CALL",
            AgentError::NoData(_) => "NO_DATA",
            AgentError::EmptyResponse => "EMPTY_RESPONSE",
            AgentError::Timeout(_) => "TIMEOUT_ERROR",
            AgentError::MaxIterations(_) => "MAX_ITERATIONS_EXCEEDED",
            AgentError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            AgentError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_message_is_passed_through_verbatim() {
        let err = AgentError::NoData("No stock price data found for ticker: ZZZZ".to_string());
        assert_eq!(err.to_string(), "No stock price data found for ticker: ZZZZ");
        assert_eq!(err.error_code(), "NO_DATA");
        assert!(!err.is_retryable());
    }

    #[test]
    fn empty_response_message() {
        assert_eq!(
            AgentError::EmptyResponse.to_string(),
            "No response received from AI"
        );
    }

    #[test]
    fn rate_limit_is_retryable() {
        let payload = AgentError::RateLimit { retry_after: 2 }.to_error_payload();
        assert_eq!(payload["error"]["code"], "RATE_LIMIT_ERROR");
        assert_eq!(payload["error"]["retryable"], true);
    }
}
