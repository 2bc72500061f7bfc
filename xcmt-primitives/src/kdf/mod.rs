#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Key Derivation Functions
//!
//! Provides KDFs for deriving keys from secrets.
//!
//! ## Supported Algorithms
//!
//! - **HKDF**: HMAC-based Extract-and-Expand Key Derivation (RFC 5869)
//! - **PBKDF2**: Password-Based Key Derivation Function 2 (RFC 8018)
//!
//! Output sizes are given in bits and must be a positive multiple of 8.

pub mod hkdf;
pub mod pbkdf2;

pub use hkdf::{hkdf_sha256, Hkdf, HkdfSha256, HkdfSha512};
pub use pbkdf2::{pbkdf2_hmac_sha256, Pbkdf2, Prf};

use crate::error::{Error, Result};
use crate::util::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derived key material, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the derived key
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take ownership of the key bytes. The caller becomes responsible for
    /// wiping them.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        ct_eq(&self.bytes, &other.bytes)
    }
}

impl Eq for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

/// Convert an output size in bits to bytes.
///
/// # Errors
/// Returns `InvalidParameter` unless `size_bits` is a positive multiple of 8.
pub(crate) fn output_len_bytes(size_bits: usize) -> Result<usize> {
    if size_bits == 0 || size_bits % 8 != 0 {
        return Err(Error::InvalidParameter(format!(
            "output size must be a positive multiple of 8 bits, got {size_bits}"
        )));
    }
    Ok(size_bits / 8)
}
