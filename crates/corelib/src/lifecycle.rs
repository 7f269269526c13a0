//! Node lifecycle table: the set of currently-dead node_ids.
//!
//! A node_id present here is never present in the ring, and vice versa
//! Mutation of this table and of the ring happens under the
//! same lock (see [`crate::coordinator::Coordinator`]) so that `MarkDead`
//! and revival are atomic with respect to lookups.

use std::collections::HashSet;

#[derive(Default)]
pub struct LifecycleTable {
    dead: HashSet<String>,
}

impl LifecycleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dead(&mut self, node_id: &str) {
        self.dead.insert(node_id.to_string());
    }

    pub fn revive(&mut self, node_id: &str) {
        self.dead.remove(node_id);
    }

    pub fn is_dead(&self, node_id: &str) -> bool {
        self.dead.contains(node_id)
    }

    /// Snapshot of currently-dead node_ids, for the reviver to probe.
    pub fn snapshot(&self) -> Vec<String> {
        self.dead.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.dead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dead.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_dead_then_revive() {
        let mut t = LifecycleTable::new();
        assert!(!t.is_dead("a"));
        t.mark_dead("a");
        assert!(t.is_dead("a"));
        t.revive("a");
        assert!(!t.is_dead("a"));
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut t = LifecycleTable::new();
        t.mark_dead("a");
        t.mark_dead("b");
        let mut snap = t.snapshot();
        snap.sort();
        assert_eq!(snap, vec!["a".to_string(), "b".to_string()]);
    }
}
