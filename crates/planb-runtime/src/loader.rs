use planb_types::PlanCatalog;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::LoadError;
use crate::source::PlanSource;

/// Identifies one load request. Only the most recent token may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken {
    generation: u64,
}

impl LoadToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A finished load, resolved into a catalog
#[derive(Debug)]
pub struct LoadOutcome {
    pub token: LoadToken,
    pub result: Result<PlanCatalog, LoadError>,
}

/// Runs plan loads with last-request-wins semantics.
///
/// Starting a load aborts the in-flight task; an outcome that was already
/// queued by an older task still carries its stale token and is rejected by
/// [`PlanLoader::is_current`].
pub struct PlanLoader<S> {
    source: Arc<S>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<LoadOutcome>,
    rx: mpsc::UnboundedReceiver<LoadOutcome>,
}

impl<S: PlanSource> PlanLoader<S> {
    pub fn new(source: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Spawn a load for `endpoint`, superseding any load in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, endpoint: impl Into<String>) -> LoadToken {
        self.abort_in_flight();
        self.generation += 1;
        let token = LoadToken {
            generation: self.generation,
        };

        let endpoint = endpoint.into();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source
                .fetch(&endpoint)
                .await
                .map(|raw| planb_engine::build_catalog(&raw));
            // Receiver lives as long as the loader.
            let _ = tx.send(LoadOutcome { token, result });
        }));

        token
    }

    /// Abort the in-flight load and invalidate any queued outcome.
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        self.generation += 1;
    }

    pub fn is_current(&self, token: &LoadToken) -> bool {
        token.generation == self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Mark the current load as committed.
    pub fn finish(&mut self, token: &LoadToken) {
        if self.is_current(token) {
            self.in_flight = None;
        }
    }

    /// Wait for the next finished load, current or not.
    pub async fn next_outcome(&mut self) -> Option<LoadOutcome> {
        self.rx.recv().await
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<S> Drop for PlanLoader<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::time::Duration;

    struct DelayedSource;

    impl PlanSource for DelayedSource {
        async fn fetch(&self, endpoint: &str) -> Result<Value, LoadError> {
            if endpoint == "slow" {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            if endpoint == "broken" {
                return Err(LoadError::Network("HTTP 503".to_string()));
            }
            Ok(json!({"plans": [{"name": endpoint}]}))
        }
    }

    #[tokio::test]
    async fn test_newer_load_supersedes_older() {
        let mut loader = PlanLoader::new(DelayedSource);
        let slow = loader.start("slow");
        let fast = loader.start("fast");

        assert!(!loader.is_current(&slow));
        assert!(loader.is_current(&fast));

        let outcome = loader.next_outcome().await.unwrap();
        assert_eq!(outcome.token, fast);
        let catalog = outcome.result.unwrap();
        assert_eq!(catalog.plans[0].name, "fast");

        // The aborted load never reports back.
        let late = tokio::time::timeout(Duration::from_millis(300), loader.next_outcome()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn test_cancel_invalidates_token() {
        let mut loader = PlanLoader::new(DelayedSource);
        let token = loader.start("slow");
        assert!(loader.is_in_flight());

        loader.cancel();
        assert!(!loader.is_current(&token));
        assert!(!loader.is_in_flight());
    }

    #[tokio::test]
    async fn test_failure_is_reported_with_token() {
        let mut loader = PlanLoader::new(DelayedSource);
        let token = loader.start("broken");

        let outcome = loader.next_outcome().await.unwrap();
        assert_eq!(outcome.token, token);
        assert_eq!(
            outcome.result.unwrap_err(),
            LoadError::Network("HTTP 503".to_string())
        );
    }
}
