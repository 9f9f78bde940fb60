use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use super::{ApiClient, ApiError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Live HTTP implementation of [`ApiClient`] against a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// `base_url` should include the API prefix, e.g.
    /// `http://localhost:8080/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url).timeout(REQUEST_TIMEOUT);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(json!({ "success": true }));
        }

        serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn fetch(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn remove(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}
