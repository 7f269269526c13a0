//! Consistent-hash ring: the ordered map plus the per-node replica fan-out.

pub mod ring;

pub use ring::Ring;
