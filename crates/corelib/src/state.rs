//! Shared ring + lifecycle state, guarded by a single lock.
//!
//! `MarkDead` (lifecycle-insert + ring-remove-all) must appear atomic to a
//! concurrent reviver, and readers must never observe a partially-rotated
//! tree. A single `parking_lot::RwLock` over both structures satisfies
//! this: every mutation (dispatcher failure path, reviver success path)
//! takes the writer lock and performs both the lifecycle and ring update
//! before releasing it; every read (`lookup`, `enumerate`) takes the
//! reader lock.
//!
//! Reader/writer separation is an optimization, not a requirement — a
//! plain `Mutex` would also satisfy the contract. `parking_lot` is the
//! workspace's declared concurrency primitive, so `RwLock` is used here.

use crate::lifecycle::LifecycleTable;
use crate::ring::Ring;
use crate::vnode::VirtualPoint;
use parking_lot::RwLock;

/// The ring and lifecycle table, mutated and read under one lock.
pub struct RingState {
    inner: RwLock<Inner>,
}

struct Inner {
    ring: Ring,
    dead: LifecycleTable,
}

impl RingState {
    pub fn new(ring: Ring) -> Self {
        RingState {
            inner: RwLock::new(Inner {
                ring,
                dead: LifecycleTable::new(),
            }),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<VirtualPoint> {
        self.inner.read().ring.lookup(key)
    }

    pub fn enumerate(&self) -> Vec<VirtualPoint> {
        self.inner.read().ring.enumerate()
    }

    pub fn unique_nodes(&self) -> Vec<String> {
        self.inner.read().ring.unique_nodes()
    }

    pub fn is_dead(&self, node_id: &str) -> bool {
        self.inner.read().dead.is_dead(node_id)
    }

    pub fn dead_snapshot(&self) -> Vec<String> {
        self.inner.read().dead.snapshot()
    }

    /// Atomically: insert `node_id` into the lifecycle table and remove
    /// every one of its virtual points from the ring.
    pub fn mark_dead(&self, node_id: &str) {
        let mut inner = self.inner.write();
        inner.dead.mark_dead(node_id);
        inner.ring.delete(node_id);
    }

    /// Atomically: remove `node_id` from the lifecycle table and
    /// re-insert all of its virtual points into the ring.
    pub fn revive(&self, node_id: &str) {
        let mut inner = self.inner.write();
        inner.dead.revive(node_id);
        inner.ring.add(node_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_dead_is_atomic_across_both_structures() {
        let mut ring = Ring::new(1);
        ring.add("a");
        ring.add("b");
        let state = RingState::new(ring);

        state.mark_dead("a");
        assert!(state.is_dead("a"));
        assert_eq!(state.lookup("any-key").unwrap().node_id, "b");
    }

    #[test]
    fn revive_reverses_mark_dead() {
        let mut ring = Ring::new(1);
        ring.add("a");
        let state = RingState::new(ring);

        state.mark_dead("a");
        assert!(state.enumerate().is_empty());

        state.revive("a");
        assert!(!state.is_dead("a"));
        assert_eq!(state.enumerate().len(), 1);
    }
}
