use serde::{Deserialize, Serialize};

/// Terminal result of one execution. Exactly one is reported per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bytes", rename_all = "snake_case")]
pub enum Outcome {
    Success(Vec<u8>),
    Error(Vec<u8>),
}

impl Outcome {
    pub fn error_message(message: impl Into<String>) -> Self {
        Outcome::Error(message.into().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Outcome::Success(bytes) | Outcome::Error(bytes) => bytes,
        }
    }

    /// Process exit code the host expects for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success(_) => 0,
            Outcome::Error(_) => 1,
        }
    }
}

/// Raw reply from the price feed, before any validation.
#[derive(Debug, Clone)]
pub struct FeedReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FeedReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// API models

#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub message: Option<String>,
}
