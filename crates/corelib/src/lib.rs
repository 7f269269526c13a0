//! Core library for the sharded remote-cache coordinator.
//!
//! This crate is the routing and fault-reaction subsystem: a
//! consistent-hash ring built on a self-balancing ordered map, a
//! node-lifecycle state machine (live -> dead -> live), and the
//! dispatch+retry loop that turns one client call into one or more
//! backend requests. See each module for its slice of that design.

pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod hash;
pub mod lifecycle;
pub mod reviver;
pub mod ring;
pub mod state;
pub mod transport;
pub mod tree;
pub mod vnode;
pub mod wire;

pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use error::{Error, Result};
pub use ring::Ring;
pub use state::RingState;
pub use vnode::VirtualPoint;
pub use wire::Verb;
