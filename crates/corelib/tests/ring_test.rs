//! Integration tests for the consistent-hash ring and the dispatch/revive
//! loop built on top of it, exercised through the public `corelib` API.

use corelib::ring::Ring;
use corelib::state::RingState;
use std::sync::Arc;

#[test]
fn empty_ring_lookup_returns_none() {
    let ring = Ring::new(1);
    assert!(ring.lookup("key1").is_none());
    assert!(ring.is_empty());
}

#[test]
fn add_and_lookup_routes_by_token_order() {
    let mut ring = Ring::new(1);
    ring.add("10.23.20.2");
    ring.add("10.23.34.4");

    assert_eq!(ring.lookup("TEST_KEY").unwrap().node_id, "10.23.34.4");
    assert_eq!(ring.lookup("ANOTHER_KEY").unwrap().node_id, "10.23.20.2");
}

#[test]
fn delete_removes_all_replicas_of_a_node() {
    let mut ring = Ring::new(4);
    ring.add("node-a");
    ring.add("node-b");
    assert_eq!(ring.enumerate().len(), 8);

    ring.delete("node-a");
    assert_eq!(ring.enumerate().len(), 4);
    assert!(ring.enumerate().iter().all(|vp| vp.node_id == "node-b"));

    // deleting a node not present is a no-op, not an error
    ring.delete("node-does-not-exist");
    assert_eq!(ring.enumerate().len(), 4);
}

#[test]
fn from_nodes_builds_a_ring_with_replicas_per_node() {
    let ring = Ring::from_nodes(vec!["a", "b", "c"], 2);
    assert_eq!(ring.enumerate().len(), 6);
    assert_eq!(ring.unique_nodes().len(), 3);
}

#[test]
fn consistent_lookup_same_key_same_node() {
    let mut ring = Ring::new(4);
    ring.add("node-a");
    ring.add("node-b");
    ring.add("node-c");

    let first = ring.lookup("stable-key").unwrap();
    for _ in 0..5 {
        assert_eq!(ring.lookup("stable-key").unwrap(), first);
    }
}

#[test]
fn shared_state_marks_dead_atomically_with_ring_removal() {
    let mut ring = Ring::new(1);
    ring.add("a");
    ring.add("b");
    let state = Arc::new(RingState::new(ring));

    state.mark_dead("a");
    assert!(state.is_dead("a"));
    assert!(state.enumerate().iter().all(|vp| vp.node_id != "a"));

    state.revive("a");
    assert!(!state.is_dead("a"));
    assert!(state.enumerate().iter().any(|vp| vp.node_id == "a"));
}
