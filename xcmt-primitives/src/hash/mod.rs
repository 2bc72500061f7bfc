#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Hash Functions
//!
//! The hash capability HMAC (and through it HKDF and PBKDF2) is built on.
//! [`HashFunction`] is the static interface constructions are generic over;
//! [`HashAlgorithm`] is the closed set of supported algorithms for callers
//! that select one at runtime.

pub mod sha2;

pub use self::sha2::{Sha256, Sha512};

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A cryptographic hash function with fixed block and output sizes.
pub trait HashFunction: Send + Sync + 'static {
    /// Internal block length in bytes (the HMAC key pad width)
    const BLOCK_LEN: usize;
    /// Digest length in bytes
    const OUTPUT_LEN: usize;
    /// Matching runtime algorithm identifier
    const ALGORITHM: HashAlgorithm;

    /// Hash the concatenation of `parts` without materializing it.
    fn digest_parts(parts: &[&[u8]]) -> Vec<u8>;

    /// Hash `data`.
    fn digest(data: &[u8]) -> Vec<u8> {
        Self::digest_parts(&[data])
    }
}

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 (FIPS 180-4)
    Sha256,
    /// SHA-512 (FIPS 180-4)
    Sha512,
}

impl HashAlgorithm {
    /// Block length in bytes.
    #[must_use]
    pub const fn block_len(self) -> usize {
        match self {
            Self::Sha256 => Sha256::BLOCK_LEN,
            Self::Sha512 => Sha512::BLOCK_LEN,
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => Sha256::OUTPUT_LEN,
            Self::Sha512 => Sha512::OUTPUT_LEN,
        }
    }

    /// Lowercase algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Hash `data` with this algorithm.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data),
            Self::Sha512 => Sha512::digest(data),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            other => Err(Error::InvalidParameter(format!("unsupported hash algorithm: {other}"))),
        }
    }
}
