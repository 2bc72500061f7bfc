#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! SHA-2 Hash Functions
//!
//! SHA-256 and SHA-512 backed by the RustCrypto `sha2` crate.

use super::{HashAlgorithm, HashFunction};
use sha2::Digest;

/// SHA-256: 64-byte block, 32-byte digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256;

/// SHA-512: 128-byte block, 64-byte digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha512;

impl HashFunction for Sha256 {
    const BLOCK_LEN: usize = 64;
    const OUTPUT_LEN: usize = 32;
    const ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

    fn digest_parts(parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = sha2::Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().to_vec()
    }
}

impl HashFunction for Sha512 {
    const BLOCK_LEN: usize = 128;
    const OUTPUT_LEN: usize = 64;
    const ALGORITHM: HashAlgorithm = HashAlgorithm::Sha512;

    fn digest_parts(parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = sha2::Sha512::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().to_vec()
    }
}
