//! Coordinator construction parameters and cluster configuration loading.

use crate::error::{Error, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub const DEFAULT_REVIVE_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REPLICAS: usize = 1;

/// Construction parameters for a [`crate::coordinator::Coordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Path to the line-oriented node list. `None` yields an empty ring
    /// (only intended for tests).
    pub config_path: Option<PathBuf>,
    /// `true` selects `http://`, `false` selects `https://`.
    pub use_http: bool,
    pub port: String,
    pub replicas: usize,
    pub revive_interval_secs: u64,
}

impl CoordinatorConfig {
    pub fn new(config_path: Option<PathBuf>, use_http: bool, port: impl Into<String>) -> Self {
        CoordinatorConfig {
            config_path,
            use_http,
            port: port.into(),
            replicas: DEFAULT_REPLICAS,
            revive_interval_secs: DEFAULT_REVIVE_INTERVAL_SECS,
        }
    }

    pub fn protocol(&self) -> &'static str {
        if self.use_http {
            "http://"
        } else {
            "https://"
        }
    }
}

/// Reads the cluster configuration: one node_id per line, no comments, no
/// blank-line filtering beyond what the line reader yields.
///
/// An explicitly empty path (`None`) is permitted and yields an empty
/// list. Otherwise, a missing file is an I/O error and a file that opens
/// but yields zero lines is [`Error::EmptyConfig`] — both are fatal to
/// the process.
pub fn read_node_list(path: Option<&Path>) -> Result<Vec<String>> {
    let path = match path {
        None => return Ok(Vec::new()),
        Some(p) => p,
    };

    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut nodes = Vec::new();
    for line in reader.lines() {
        nodes.push(line?);
    }

    if nodes.is_empty() {
        return Err(Error::EmptyConfig);
    }
    Ok(nodes)
}
