//! Public coordinator surface: the thin per-verb wrapper methods over the
//! dispatch/fan-out primitives: thin shells over the dispatch primitive
//! that share identical failure handling.

use crate::config::CoordinatorConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::reviver::Reviver;
use crate::ring::Ring;
use crate::state::RingState;
use crate::transport::{HttpTransport, Transport};
use crate::wire::{CacheRequest, CacheResponse, Verb};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// A metric report from one node, returned by the fan-out metrics verbs.
#[derive(Debug, Clone)]
pub struct NodeMetric {
    pub node_id: String,
    pub response: CacheResponse,
}

/// Client-side coordinator for the sharded remote cache fleet.
pub struct Coordinator<T: Transport = HttpTransport> {
    dispatcher: Dispatcher<T>,
    reviver: Reviver<T>,
}

impl Coordinator<HttpTransport> {
    /// Builds a coordinator from construction parameters, reading the
    /// cluster configuration and using the default HTTP transport.
    /// Missing/empty configuration is fatal to the caller: the caller
    /// (typically the CLI binary) should log and exit on `Err`.
    pub fn from_config(config: CoordinatorConfig) -> Result<Self> {
        let nodes = crate::config::read_node_list(config.config_path.as_deref())?;
        let ring = Ring::from_nodes(nodes, config.replicas);
        let transport = Arc::new(HttpTransport::default());
        Ok(Self::new(ring, transport, config))
    }
}

impl<T: Transport + 'static> Coordinator<T> {
    pub fn new(ring: Ring, transport: Arc<T>, config: CoordinatorConfig) -> Self {
        let state = Arc::new(RingState::new(ring));
        let protocol = if config.use_http { "http://" } else { "https://" };
        let dispatcher = Dispatcher::new(state.clone(), transport.clone(), protocol, config.port.clone());
        let reviver = Reviver::new(
            state,
            transport,
            protocol,
            config.port,
            Duration::from_secs(config.revive_interval_secs),
        );
        Coordinator { dispatcher, reviver }
    }

    /// Spawns the background reviver on the current tokio runtime. The
    /// reviver runs for process lifetime; there is no cleaner shutdown
    /// than dropping the returned handle or terminating the process
    /// process.
    pub fn spawn_reviver(&self) -> tokio::task::JoinHandle<()> {
        let reviver = self.reviver.clone();
        tokio::spawn(reviver.run())
    }

    pub fn ring_state(&self) -> &Arc<RingState> {
        self.dispatcher.state()
    }

    pub async fn get(&self, key: &str) -> Result<CacheResponse> {
        self.dispatcher
            .dispatch(Verb::Get, key, CacheRequest::keyed(key, Value::Null, -1))
            .await
    }

    pub async fn put(&self, key: &str, value: Value, ttl: i64) -> Result<CacheResponse> {
        self.dispatcher
            .dispatch(Verb::Put, key, CacheRequest::keyed(key, value, ttl))
            .await
    }

    pub async fn add(&self, key: &str, value: Value, ttl: i64) -> Result<CacheResponse> {
        self.dispatcher
            .dispatch(Verb::Add, key, CacheRequest::keyed(key, value, ttl))
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<CacheResponse> {
        self.dispatcher
            .dispatch(Verb::Delete, key, CacheRequest::keyed(key, Value::Null, -1))
            .await
    }

    /// `nodeSize(ip)` — uses `ip` directly as the ring lookup key. This
    /// does not generally route to the node owning that IP (the IP's own
    /// token is almost certainly not in its own ring neighborhood).
    /// Whether this was intended ("any node that happens to cover the
    /// IP's hash") or simply a bug is unclear; this preserves that exact
    /// observable behavior rather than "fixing" it to route by node
    /// identity.
    pub async fn node_size(&self, ip: &str) -> Result<CacheResponse> {
        self.dispatcher
            .dispatch(Verb::GetNodeSize, ip, CacheRequest::empty())
            .await
    }

    pub async fn flush(&self) -> Result<Vec<NodeMetric>> {
        self.fan_out(Verb::Flush).await
    }

    pub async fn ping(&self) -> Result<Vec<NodeMetric>> {
        self.fan_out(Verb::Ping).await
    }

    pub async fn get_sys_metrics(&self) -> Result<Vec<NodeMetric>> {
        self.fan_out(Verb::GetSysMetrics).await
    }

    pub async fn get_app_metrics(&self) -> Result<Vec<NodeMetric>> {
        self.fan_out(Verb::GetAppMetrics).await
    }

    async fn fan_out(&self, verb: Verb) -> Result<Vec<NodeMetric>> {
        let results = self.dispatcher.fan_out(verb).await?;
        Ok(results
            .into_iter()
            .map(|(node_id, response)| NodeMetric { node_id, response })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn node_size_routes_by_ip_as_key_not_by_identity() {
        // Regression test for the preserved original_source behavior:
        // node_size("1.2.3.4") looks up the ring using "1.2.3.4" as an
        // ordinary key, which may or may not land on node "1.2.3.4".
        let mut ring = Ring::new(1);
        ring.add("10.0.0.1");
        ring.add("10.0.0.2");
        let vp = ring.lookup("10.0.0.1").unwrap();
        // No assertion that vp.node_id == "10.0.0.1" — that's the point.
        assert!(vp.node_id == "10.0.0.1" || vp.node_id == "10.0.0.2");
    }

    #[tokio::test]
    async fn get_on_empty_ring_is_no_reachable_nodes() {
        let ring = Ring::new(1);
        let transport = Arc::new(crate::transport::HttpTransport::default());
        let config = CoordinatorConfig::new(None, true, "8080");
        let coordinator = Coordinator::new(ring, transport, config);

        let err = coordinator.get("any-key").await.unwrap_err();
        assert!(matches!(err, Error::NoReachableNodes));
    }
}
