//! Background reviver: the only path by which nodes re-enter the ring
//! after initialization.
//!
//! Every `revive_interval` seconds, snapshot the lifecycle table and probe
//! each dead node with a `ping`. On HTTP success the node is revived
//! (atomically re-inserted into the ring and cleared from the lifecycle
//! table); on failure it stays dead. Probes of distinct nodes may run
//! concurrently with each other and with dispatcher traffic — correctness
//! relies entirely on [`crate::state::RingState`]'s locking discipline,
//! not on anything in this module.

use crate::state::RingState;
use crate::transport::Transport;
use crate::wire::{CacheRequest, Verb};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct Reviver<T: Transport> {
    state: Arc<RingState>,
    transport: Arc<T>,
    protocol: &'static str,
    port: String,
    interval: Duration,
}

// Manual impl: `Reviver<T>` only ever stores `T` behind an `Arc`, so it
// should be `Clone` regardless of whether `T` itself is — `#[derive(Clone)]`
// would incorrectly add a `T: Clone` bound.
impl<T: Transport> Clone for Reviver<T> {
    fn clone(&self) -> Self {
        Reviver {
            state: self.state.clone(),
            transport: self.transport.clone(),
            protocol: self.protocol,
            port: self.port.clone(),
            interval: self.interval,
        }
    }
}

impl<T: Transport + 'static> Reviver<T> {
    pub fn new(
        state: Arc<RingState>,
        transport: Arc<T>,
        protocol: &'static str,
        port: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Reviver {
            state,
            transport,
            protocol,
            port: port.into(),
            interval,
        }
    }

    /// Runs the revive loop for process lifetime. Spawn this on the
    /// runtime and let it run alongside dispatcher traffic; there is no
    /// cleaner shutdown than dropping/aborting the task.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.tick().await; // first tick fires immediately; skip it
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One revive pass: probe every node that was dead at the start of
    /// this tick. Public so tests and a CLI "revive now" command can
    /// drive a single pass without waiting on the interval.
    pub async fn tick(&self) {
        let dead = self.state.dead_snapshot();
        if dead.is_empty() {
            return;
        }

        let mut revived = 0usize;
        for node_id in &dead {
            if self.probe(node_id).await {
                self.state.revive(node_id);
                revived += 1;
            }
        }
        info!(probed = dead.len(), revived, "revive tick complete");
    }

    async fn probe(&self, node_id: &str) -> bool {
        let url = format!("{}{}:{}{}", self.protocol, node_id, self.port, Verb::Ping.path());
        let body = CacheRequest::empty();
        match self.transport.call(node_id, &url, &body).await {
            Ok(resp) if resp.is_success() => {
                debug!(node = node_id, "revive probe succeeded");
                true
            }
            _ => {
                debug!(node = node_id, "revive probe failed, staying dead");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::ring::Ring;
    use crate::wire::CacheResponse;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::collections::HashSet;

    struct ProbeTransport {
        healthy: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl Transport for ProbeTransport {
        async fn call(&self, node_id: &str, _url: &str, _body: &CacheRequest) -> Result<CacheResponse> {
            if self.healthy.lock().contains(node_id) {
                Ok(CacheResponse {
                    status: 200,
                    message: "ok".into(),
                    gobj: Value::Null,
                })
            } else {
                Err(Error::Transport {
                    node: node_id.to_string(),
                    source: reqwest::Client::builder()
                        .user_agent("\0")
                        .build()
                        .expect_err("invalid header value"),
                })
            }
        }
    }

    #[tokio::test]
    async fn healthy_dead_node_is_revived() {
        let ring = Ring::new(1);
        let state = Arc::new(RingState::new(ring));
        state.mark_dead("node-a"); // dead without ever having been in the ring is fine for this test
        let transport = Arc::new(ProbeTransport {
            healthy: Mutex::new(HashSet::from(["node-a".to_string()])),
        });
        let reviver = Reviver::new(state.clone(), transport, "http://", "8080", Duration::from_secs(30));

        reviver.tick().await;

        assert!(!state.is_dead("node-a"));
        assert_eq!(state.lookup("any-key").unwrap().node_id, "node-a");
    }

    #[tokio::test]
    async fn unhealthy_node_remains_dead() {
        let ring = Ring::new(1);
        let state = Arc::new(RingState::new(ring));
        state.mark_dead("node-a");
        let transport = Arc::new(ProbeTransport {
            healthy: Mutex::new(HashSet::new()),
        });
        let reviver = Reviver::new(state.clone(), transport, "http://", "8080", Duration::from_secs(30));

        reviver.tick().await;

        assert!(state.is_dead("node-a"));
        assert!(state.enumerate().is_empty());
    }
}
