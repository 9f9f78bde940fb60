//! Contract for the remote collaborator that owns all records.
//!
//! The client moves `serde_json::Value` at the wire level; typed decoding
//! happens at the domain boundary via [`decode`].

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Failure modes of a single remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status, with the raw body text preserved.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Exactly a 404 status. Any other failure of a lookup is transient.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { status: 409, .. })
    }

    /// Extract a server-provided `message` from a conflict body.
    ///
    /// The body may carry leading non-JSON text, so parsing starts at the
    /// first `{`. Anything unparseable yields the caller's fallback.
    pub fn conflict_message(&self, fallback: &str) -> String {
        if let ApiError::Status { body, .. } = self {
            if let Some(start) = body.find('{') {
                if let Ok(details) = serde_json::from_str::<Value>(&body[start..]) {
                    if let Some(message) = details.get("message").and_then(Value::as_str) {
                        return message.to_string();
                    }
                }
            }
        }
        fallback.to_string()
    }
}

/// The four operations the core issues against the remote API.
///
/// Implementations must resolve empty success bodies to
/// `{"success": true}` so callers can treat every success uniformly.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value, ApiError>;
    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError>;
    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError>;
    async fn remove(&self, path: &str) -> Result<Value, ApiError>;
}

/// Decode a wire value into a typed record.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}
