//! SHA-256 hex digest used as the rule set fingerprint.
//!
//! A rule document without an explicit version is identified by the digest
//! of its raw bytes, so identical files always report the same version and
//! any edit changes it.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}
