//! Scripted [`ResourceApi`] for unit tests.
//!
//! Queued responses are returned in order; once the queue is empty, `List`
//! calls answer from the canned collections and every other call succeeds
//! with an empty envelope. Every call is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;

use super::types::{ApiCall, ApiError, Envelope, ResourceApi};

#[derive(Default)]
pub struct ScriptedApi {
    queue: Mutex<VecDeque<Result<Envelope, ApiError>>>,
    lists: Mutex<HashMap<&'static str, Value>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned `List` answer for `resource`.
    pub fn with_list(self, resource: &'static str, rows: Value) -> Self {
        self.set_list(resource, rows);
        self
    }

    pub fn set_list(&self, resource: &'static str, rows: Value) {
        self.lists.lock().unwrap().insert(resource, rows);
    }

    /// Queue the next response, taking priority over canned lists.
    pub fn push(&self, response: Result<Envelope, ApiError>) {
        self.queue.lock().unwrap().push_back(response);
    }

    pub fn push_ok(&self, message: &str) {
        self.push(Ok(Envelope::new(Value::Null, Some(message.to_string()))));
    }

    pub fn push_rejected(&self, message: &str) {
        self.push(Err(ApiError::Rejected { status: None, message: Some(message.to_string()) }));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self, resource: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::List { resource: r } if *r == resource))
            .count()
    }
}

#[async_trait::async_trait]
impl ResourceApi for ScriptedApi {
    async fn call(&self, call: ApiCall) -> Result<Envelope, ApiError> {
        self.calls.lock().unwrap().push(call.clone());
        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return response;
        }
        match call {
            ApiCall::List { resource } => {
                let rows = self
                    .lists
                    .lock()
                    .unwrap()
                    .get(resource)
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new()));
                Ok(Envelope::new(rows, None))
            }
            _ => Ok(Envelope::default()),
        }
    }
}
