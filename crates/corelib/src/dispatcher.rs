//! Dispatch + retry: turns one client call into one or more backend
//! requests.
//!
//! Termination: every failure strictly shrinks the ring (`MarkDead`
//! removes the failing node's virtual points before retrying), so the
//! single-node retry loop below terminates in at most `N` iterations,
//! `N` the number of live nodes at entry. When the ring empties, lookup
//! surfaces [`Error::NoReachableNodes`] to the caller.

use crate::error::{Error, Result};
use crate::state::RingState;
use crate::transport::Transport;
use crate::wire::{CacheRequest, CacheResponse, Verb};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Dispatcher<T: Transport> {
    state: Arc<RingState>,
    transport: Arc<T>,
    protocol: &'static str,
    port: String,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(state: Arc<RingState>, transport: Arc<T>, protocol: &'static str, port: impl Into<String>) -> Self {
        Dispatcher {
            state,
            transport,
            protocol,
            port: port.into(),
        }
    }

    pub fn state(&self) -> &Arc<RingState> {
        &self.state
    }

    fn url_for(&self, node_id: &str, verb: Verb) -> String {
        format!("{}{}:{}{}", self.protocol, node_id, self.port, verb.path())
    }

    /// Atomically marks `node_id` dead: inserted into the lifecycle table
    /// and every one of its virtual points removed from the ring, in one
    /// locked step.
    fn mark_dead(&self, node_id: &str) {
        warn!(node = node_id, "marking node dead after transport failure");
        self.state.mark_dead(node_id);
    }

    /// The key-addressed dispatch primitive: `get`/`put`/`add`/`delete`
    /// all route through this with their own verb and payload.
    ///
    /// Each retry re-enters at step 1 (ring lookup) because the ring has
    /// just changed, and goes through this same code path so a second
    /// failure also marks-dead correctly.
    pub async fn dispatch(&self, verb: Verb, key: &str, body: CacheRequest) -> Result<CacheResponse> {
        loop {
            let vp = self.state.lookup(key).ok_or(Error::NoReachableNodes)?;
            debug!(verb = ?verb, node = %vp.node_id, key, "dispatching");

            let url = self.url_for(&vp.node_id, verb);
            match self.transport.call(&vp.node_id, &url, &body).await {
                Ok(resp) if resp.is_success() => return Ok(resp),
                Ok(resp) => return Err(Error::BackendError(resp.message)),
                Err(e) if e.is_retryable() => {
                    self.mark_dead(&vp.node_id);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fan-out primitive: deliver `verb` to every unique live node
    /// (`flush`/metrics/`ping`). On a node failure, mark it dead and
    /// restart the fan-out from the current ring state, skipping nodes
    /// already visited successfully. An empty ring yields `Ok(vec![])`
    /// rather than an error — there is no single node whose absence can
    /// be blamed for a fan-out.
    pub async fn fan_out(&self, verb: Verb) -> Result<Vec<(String, CacheResponse)>> {
        let mut visited = HashSet::new();
        let mut results = Vec::new();
        let body = CacheRequest::empty();

        loop {
            let nodes = self.state.unique_nodes();

            let mut failed = false;
            for node_id in nodes {
                if visited.contains(&node_id) {
                    continue;
                }
                let url = self.url_for(&node_id, verb);
                match self.transport.call(&node_id, &url, &body).await {
                    Ok(resp) if resp.is_success() => {
                        visited.insert(node_id.clone());
                        results.push((node_id, resp));
                    }
                    Ok(resp) => return Err(Error::BackendError(resp.message)),
                    Err(e) if e.is_retryable() => {
                        self.mark_dead(&node_id);
                        failed = true;
                        break; // ring changed: restart the walk below
                    }
                    Err(e) => return Err(e),
                }
            }

            if !failed {
                return Ok(results);
            }
        }
    }
}
