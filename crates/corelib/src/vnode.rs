//! Virtual point abstraction.
//!
//! A node with `replicas = R` contributes `R` virtual points to the ring;
//! each is an immutable `(token, node_id)` pair.

/// One entry on the ring, belonging to a backend node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPoint {
    /// Position on the ring: lowercase hex CRC32-IEEE token.
    pub token: String,
    /// The backend node (IP or hostname) this point belongs to.
    pub node_id: String,
}

impl VirtualPoint {
    pub fn new(token: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            node_id: node_id.into(),
        }
    }
}
