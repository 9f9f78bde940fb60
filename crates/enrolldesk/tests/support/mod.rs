#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use enrolldesk::{ApiClient, ApiError};

/// One canned response for a (method, path) pair.
pub enum Reply {
    Json(Value),
    Error(u16, &'static str),
    Transport(&'static str),
}

struct Stub {
    reply: Reply,
    delay: Option<Duration>,
}

/// In-memory [`ApiClient`] with per-endpoint reply queues and a full call
/// log. Replies are consumed in FIFO order; an endpoint with no stub left
/// fails the call with a transport error naming it.
#[derive(Default)]
pub struct MockApi {
    stubs: Mutex<HashMap<(String, String), VecDeque<Stub>>>,
    calls: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, method: &str, path: &str, reply: Reply) {
        self.stub_inner(method, path, reply, None);
    }

    /// Stub whose reply only arrives after `delay` of (test) time.
    pub fn stub_delayed(&self, method: &str, path: &str, delay: Duration, reply: Reply) {
        self.stub_inner(method, path, reply, Some(delay));
    }

    fn stub_inner(&self, method: &str, path: &str, reply: Reply, delay: Option<Duration>) {
        self.stubs
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(Stub { reply, delay });
    }

    /// Every call made so far, in order, as (method, path, body).
    pub fn calls(&self) -> Vec<(String, String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn respond(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body));

        let stub = self
            .stubs
            .lock()
            .unwrap()
            .get_mut(&(method.to_string(), path.to_string()))
            .and_then(VecDeque::pop_front);
        let Some(stub) = stub else {
            return Err(ApiError::Transport(format!("no stub for {method} {path}")));
        };

        if let Some(delay) = stub.delay {
            tokio::time::sleep(delay).await;
        }
        match stub.reply {
            Reply::Json(value) => Ok(value),
            Reply::Error(status, text) => Err(ApiError::Status {
                status,
                body: text.to_string(),
            }),
            Reply::Transport(text) => Err(ApiError::Transport(text.to_string())),
        }
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn fetch(&self, path: &str) -> Result<Value, ApiError> {
        self.respond("GET", path, None).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.respond("POST", path, Some(body)).await
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.respond("PUT", path, Some(body)).await
    }

    async fn remove(&self, path: &str) -> Result<Value, ApiError> {
        self.respond("DELETE", path, None).await
    }
}

/// A wire person record as the API returns it.
pub fn person_json(id: i64, first_name: &str, last_name: &str) -> Value {
    serde_json::json!({
        "id": id,
        "firstName": first_name,
        "lastName": last_name,
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "phone": "987654321",
        "address": "Av. Central 123",
        "documentNumber": "71234567",
        "documentType": { "id": 2, "description": "DNI" },
        "active": true,
    })
}
