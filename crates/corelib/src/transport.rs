//! Transport-agnostic RPC contract to a backend cache node, concretely
//! implemented over HTTP with `reqwest` since the wire protocol to a
//! backend node is JSON-over-HTTP POST.

use crate::error::{Error, Result};
use crate::wire::{CacheRequest, CacheResponse};
use async_trait::async_trait;
use std::time::Duration;

/// One backend call: POST `body` to `url`, decode the JSON envelope.
///
/// Implementations must fully drain and close the response body on every
/// exit path, including error paths — `reqwest` does this for
/// us once the response value is dropped.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, node_id: &str, url: &str, body: &CacheRequest) -> Result<CacheResponse>;
}

/// Default transport: `reqwest` over HTTP/HTTPS with a fixed per-call
/// timeout. A timeout is a transport failure like any other connect
/// error — it drives `MarkDead` + retry.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        HttpTransport { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, node_id: &str, url: &str, body: &CacheRequest) -> Result<CacheResponse> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| Error::Transport {
                node: node_id.to_string(),
                source,
            })?;

        resp.json::<CacheResponse>()
            .await
            .map_err(|source| Error::Decode {
                node: node_id.to_string(),
                source,
            })
    }
}
