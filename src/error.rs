use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid data request inputs: {0}")]
    InvalidInput(String),

    #[error("Feed request failed: {0}")]
    FetchFailed(String),

    #[error("Feed rejected request with status {status}: {body}")]
    FetchRejected { status: u16, body: String },

    #[error("Feed response is missing a price message")]
    MissingOrEmptyMessage { message: String },

    #[error("Malformed feed response: {0}")]
    MalformedResponse(String),

    #[error("Price message is not an unsigned integer: {message}")]
    NumericConversion { message: String },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Timed out after {seconds}s waiting for data request {dr_id}")]
    AwaitTimeout { dr_id: String, seconds: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RankError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        RankError::ApiError(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RankError::ConfigError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        RankError::Internal(msg.into())
    }

    /// Text reported through the error outcome channel for a failed execution.
    pub fn outcome_message(&self) -> String {
        match self {
            RankError::FetchFailed(_)
            | RankError::FetchRejected { .. }
            | RankError::NetworkError(_) => {
                "Error while fetching price feed".to_string()
            }
            RankError::MissingOrEmptyMessage { message } => {
                format!("Error while parsing price data: {}", message)
            }
            RankError::MalformedResponse(_) | RankError::SerializationError(_) => {
                "Error while parsing price data: malformed response body".to_string()
            }
            RankError::NumericConversion { message } => {
                format!("Error while converting price data: {}", message)
            }
            RankError::InvalidInput(reason) => format!("Invalid data request inputs: {}", reason),
            other => other.to_string(),
        }
    }
}
