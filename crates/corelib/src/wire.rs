//! Backend wire protocol: request/response JSON envelopes and the
//! verb-to-path mapping, fixed and part of the external interface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cache verb. The key-addressed verbs (`Get`/`Put`/`Add`/`Delete`) and
/// `NodeSize` dispatch to a single node; the rest fan out to every unique
/// live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Ping,
    Put,
    Get,
    Add,
    Delete,
    Flush,
    GetSysMetrics,
    GetAppMetrics,
    GetNodeSize,
}

impl Verb {
    /// The fixed path this verb is POSTed to.
    pub fn path(self) -> &'static str {
        match self {
            Verb::Ping => "/ping",
            Verb::Put => "/put",
            Verb::Get => "/get",
            Verb::Add => "/add",
            Verb::Delete => "/delete",
            Verb::Flush => "/flush",
            Verb::GetSysMetrics => "/getSysMetrics",
            Verb::GetAppMetrics => "/getAppMetrics",
            Verb::GetNodeSize => "/nodeSize",
        }
    }

    /// Whether this verb is delivered to every unique node rather than a
    /// single key-addressed one.
    pub fn is_fan_out(self) -> bool {
        matches!(
            self,
            Verb::Flush | Verb::GetSysMetrics | Verb::GetAppMetrics | Verb::Ping
        )
    }
}

/// Request body POSTed to a backend for every verb.
#[derive(Debug, Clone, Serialize)]
pub struct CacheRequest {
    pub key: String,
    pub value: Value,
    pub ttl: i64,
}

impl CacheRequest {
    /// A request carrying no key/value/ttl payload, used by fan-out verbs
    /// and `ping`.
    pub fn empty() -> Self {
        CacheRequest {
            key: String::new(),
            value: Value::Null,
            ttl: -1,
        }
    }

    pub fn keyed(key: impl Into<String>, value: Value, ttl: i64) -> Self {
        CacheRequest {
            key: key.into(),
            value,
            ttl,
        }
    }
}

/// Response body expected from every backend call.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheResponse {
    pub status: i32,
    pub message: String,
    #[serde(default)]
    pub gobj: Value,
}

impl CacheResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
