//! Consistent-hash ring: maps a request key to the node responsible for it.
//!
//! # Token ordering is load-bearing
//!
//! Tokens are lowercase-hex CRC32-IEEE strings, compared **lexicographically
//! as strings**, never parsed back into an integer for comparison. Two
//! tokens `"95412376"` and `"af102aa1"` compare `9 < a` as strings. Do not
//! "fix" this to integer comparison — it would silently reassign every key
//! to a different node and break compatibility with an already-deployed
//! fleet.

use crate::hash;
use crate::tree::AvlTree;
use crate::vnode::VirtualPoint;
use std::collections::HashSet;

/// Owns one balanced ordered map plus the replica count used to expand a
/// node into its virtual points.
pub struct Ring {
    replicas: usize,
    points: AvlTree<String>, // token -> node_id
}

impl Ring {
    /// An empty ring with the given replica count.
    pub fn new(replicas: usize) -> Self {
        Ring {
            replicas: replicas.max(1),
            points: AvlTree::new(),
        }
    }

    /// Builds a ring from an initial node list (e.g. read from a
    /// configuration file). Idempotent per node, same as repeated `add`.
    pub fn from_nodes<I, S>(nodes: I, replicas: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ring = Self::new(replicas);
        for node in nodes {
            ring.add(&node.into());
        }
        ring
    }

    /// Inserts all `replicas` virtual points for `node_id`. Idempotent:
    /// re-adding a node whose points are already present changes nothing.
    pub fn add(&mut self, node_id: &str) {
        for i in 0..self.replicas {
            let token = hash::replica_token(node_id, i);
            self.points.insert(token, node_id.to_string());
        }
    }

    /// Removes all `replicas` virtual points belonging to `node_id`.
    pub fn delete(&mut self, node_id: &str) {
        for i in 0..self.replicas {
            let token = hash::replica_token(node_id, i);
            self.points.remove(&token);
        }
    }

    /// The virtual point responsible for `key`: the smallest token `>=
    /// hash(key)`, wrapping to the smallest token overall. `None` iff the
    /// ring is empty.
    pub fn lookup(&self, key: &str) -> Option<VirtualPoint> {
        let k = hash::token(key);
        self.points
            .ceiling(&k)
            .map(|(token, node_id)| VirtualPoint::new(token, node_id.clone()))
    }

    /// All virtual points, in ring (token) order.
    pub fn enumerate(&self) -> Vec<VirtualPoint> {
        self.points
            .entries()
            .into_iter()
            .map(|(token, node_id)| VirtualPoint::new(token, node_id.clone()))
            .collect()
    }

    /// Unique node_ids currently present in the ring, in ring order of
    /// their first (lowest-token) virtual point. Used by fan-out verbs to
    /// contact each live node exactly once regardless of replica count.
    pub fn unique_nodes(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for vp in self.enumerate() {
            if seen.insert(vp.node_id.clone()) {
                out.push(vp.node_id);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}
