use reqwest::header::ACCEPT;
use serde_json::Value;
use std::future::Future;

use crate::LoadError;

/// Where plan payloads come from.
///
/// Implementations only fetch and parse; normalization happens in the loader.
pub trait PlanSource: Send + Sync + 'static {
    fn fetch(&self, endpoint: &str) -> impl Future<Output = Result<Value, LoadError>> + Send;
}

/// Fetches `http(s)://` endpoints over HTTP and reads anything else from disk
#[derive(Debug, Clone, Default)]
pub struct EndpointSource {
    client: reqwest::Client,
}

impl EndpointSource {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Network(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl PlanSource for EndpointSource {
    async fn fetch(&self, endpoint: &str) -> Result<Value, LoadError> {
        let body = if is_http(endpoint) {
            self.fetch_http(endpoint).await?
        } else {
            read_file(endpoint).await?
        };
        parse_payload(&body)
    }
}

fn is_http(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

async fn read_file(endpoint: &str) -> Result<Vec<u8>, LoadError> {
    let path = endpoint.strip_prefix("file://").unwrap_or(endpoint);
    tokio::fs::read(path)
        .await
        .map_err(|e| LoadError::Network(format!("{}: {}", path, e)))
}

/// Parse a payload body. Shape problems are left to normalization.
pub fn parse_payload(body: &[u8]) -> Result<Value, LoadError> {
    serde_json::from_slice(body).map_err(|e| LoadError::Parse(e.to_string()))
}
