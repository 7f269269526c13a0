//! The ring's hash-token contract.
//!
//! A token is the lowercase hex rendering of a CRC32-IEEE checksum, with
//! no zero-padding and no `0x` prefix. Tokens are compared **as strings**,
//! lexicographically, never as the underlying integer — see
//! [`crate::ring`] for why this matters. Reproducing this bit-exactly is
//! part of the contract: a different token format or comparison would
//! silently reassign every key to a different node.

/// `hash(id)` — CRC32-IEEE of the UTF-8 bytes of `id`, lowercase hex, no padding.
pub fn token(id: &str) -> String {
    format!("{:x}", crc32fast::hash(id.as_bytes()))
}

/// `hash(id, i)` — token for the `i`th virtual point of `id`, i.e.
/// `token(id + ":" + i)`.
pub fn replica_token(id: &str, replica_index: usize) -> String {
    token(&format!("{}:{}", id, replica_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_contract_vectors() {
        assert_eq!(token("10.23.20.2"), "d80ceccd");
        assert_eq!(token("10.23.34.4"), "8eda8641");
    }

    #[test]
    fn hash_no_padding_no_prefix() {
        let t = token("TEST_KEY");
        assert!(!t.starts_with("0x"));
        assert_eq!(t.len(), 8); // this particular checksum has no leading zero to trim
    }

    #[test]
    fn replica_token_uses_colon_separator() {
        assert_eq!(replica_token("node", 0), token("node:0"));
        assert_ne!(replica_token("node", 0), replica_token("node", 1));
    }
}
