//! Plan sources for driving widgets without a network.

use planb_runtime::{LoadError, PlanSource};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;

type FetchResult = Result<Value, LoadError>;

/// Answers every fetch immediately from a fixed table.
///
/// Unknown endpoints fail with `HTTP 404`.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    responses: HashMap<String, FetchResult>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, endpoint: impl Into<String>, payload: Value) -> Self {
        self.responses.insert(endpoint.into(), Ok(payload));
        self
    }

    pub fn with_error(mut self, endpoint: impl Into<String>, error: LoadError) -> Self {
        self.responses.insert(endpoint.into(), Err(error));
        self
    }
}

impl PlanSource for StaticSource {
    async fn fetch(&self, endpoint: &str) -> FetchResult {
        self.responses
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| Err(LoadError::Network("HTTP 404".to_string())))
    }
}

#[derive(Default)]
struct GateState {
    requests: Vec<String>,
    waiting: HashMap<String, oneshot::Sender<FetchResult>>,
    released: HashMap<String, FetchResult>,
}

/// Holds every fetch open until the test releases it.
///
/// Clones share state, so a test keeps one handle and gives the other to
/// the widget. Releasing before the fetch starts is fine: the result is
/// parked until the request arrives.
#[derive(Clone, Default)]
pub struct GatedSource {
    state: Arc<Mutex<GateState>>,
}

impl GatedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the fetch for `endpoint`.
    pub fn release(&self, endpoint: &str, result: FetchResult) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.waiting.remove(endpoint) {
            Some(tx) => {
                // Receiver is gone when the load was aborted.
                let _ = tx.send(result);
            }
            None => {
                state.released.insert(endpoint.to_string(), result);
            }
        }
    }

    /// Endpoints fetched so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

impl PlanSource for GatedSource {
    async fn fetch(&self, endpoint: &str) -> FetchResult {
        let rx = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.requests.push(endpoint.to_string());
            if let Some(result) = state.released.remove(endpoint) {
                return result;
            }
            let (tx, rx) = oneshot::channel();
            state.waiting.insert(endpoint.to_string(), tx);
            rx
        };

        rx.await
            .unwrap_or_else(|_| Err(LoadError::Network("gate dropped".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_static_source_unknown_endpoint() {
        let source = StaticSource::new().with_payload("plans.json", json!({"plans": []}));

        assert!(source.fetch("plans.json").await.is_ok());
        assert_eq!(
            source.fetch("other.json").await.unwrap_err(),
            LoadError::Network("HTTP 404".to_string())
        );
    }

    #[tokio::test]
    async fn test_gated_source_release_before_fetch() {
        let source = GatedSource::new();
        source.release("a", Ok(json!({"plans": []})));

        assert!(source.fetch("a").await.is_ok());
        assert_eq!(source.requests(), vec!["a".to_string()]);
    }
}
