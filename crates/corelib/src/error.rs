//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the routing and dispatch subsystem.
///
/// `Transport` and `Decode` never escape [`crate::dispatcher::Dispatcher`]
/// directly — they drive `MarkDead` + retry and are only visible
/// here so the retry loop and the reviver can match on them.
#[derive(Debug, Error)]
pub enum Error {
    /// Every node has been marked dead; the ring is empty.
    #[error("all nodes marked as dead: failed to establish a connection to any servers")]
    NoReachableNodes,

    /// A reachable backend answered with a non-2xx status.
    #[error("backend returned an error response: {0}")]
    BackendError(String),

    /// Transport-level failure (connect, timeout, non-decode I/O).
    #[error("transport failure talking to {node}: {source}")]
    Transport {
        node: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body failed to deserialize into the expected envelope.
    #[error("failed to decode response from {node}: {source}")]
    Decode {
        node: String,
        #[source]
        source: reqwest::Error,
    },

    /// Configuration file could not be opened or read.
    #[error("failed to read cluster configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file was opened successfully but contained no nodes.
    #[error("cluster configuration file is empty")]
    EmptyConfig,
}

impl Error {
    /// True for failures that should trigger `MarkDead` + retry rather
    /// than being surfaced to the dispatch caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Decode { .. })
    }
}
