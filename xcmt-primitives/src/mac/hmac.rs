#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! HMAC (Hash-based Message Authentication Code)
//!
//! HMAC is specified in:
//! - RFC 2104: HMAC: Keyed-Hashing for Message Authentication
//! - FIPS 198-1: The Keyed-Hash Message Authentication Code (HMAC)
//!
//! The HMAC formula is:
//! H((K ⊕ opad) || H((K ⊕ ipad) || text))
//!
//! Where:
//! - H is the hash function, supplied as a [`HashFunction`] type parameter
//! - K is the secret key, hashed first if longer than the block size, then
//!   zero-padded to the block size
//! - opad = 0x5c5c...5c and ipad = 0x3636...36, one block long
//!
//! Padded key blocks are zeroized once the tag is computed.

use crate::error::Result;
use crate::hash::{HashFunction, Sha256, Sha512};
use crate::util::{ct_eq, pad, xor_all};
use std::marker::PhantomData;
use tracing::instrument;
use zeroize::Zeroizing;

/// Inner pad byte
const IPAD: u8 = 0x36;
/// Outer pad byte
const OPAD: u8 = 0x5c;

/// HMAC-SHA256: 64-byte block, 32-byte tag
pub type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA512: 128-byte block, 64-byte tag
pub type HmacSha512 = Hmac<Sha512>;

/// HMAC over the hash function `H`.
///
/// Stateless; the key is supplied per call.
pub struct Hmac<H: HashFunction> {
    _hash: PhantomData<fn() -> H>,
}

impl<H: HashFunction> Hmac<H> {
    /// Tag length in bytes
    pub const OUTPUT_LEN: usize = H::OUTPUT_LEN;

    /// Create an HMAC instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { _hash: PhantomData }
    }

    /// Compute the HMAC of `message` under `key`.
    ///
    /// Keys of any length are accepted, including the empty key.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if a padded key block does not match the hash
    /// block length.
    #[instrument(level = "trace", skip_all, fields(key_len = key.len(), message_len = message.len()))]
    pub fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let block = Self::key_block(key)?;

        let inner_key = Self::masked_key(&block, IPAD)?;
        let inner = H::digest_parts(&[inner_key.as_slice(), message]);

        let outer_key = Self::masked_key(&block, OPAD)?;
        Ok(H::digest_parts(&[outer_key.as_slice(), inner.as_slice()]))
    }

    /// Verify an HMAC tag using constant-time comparison.
    ///
    /// A tag of the wrong length is rejected.
    #[must_use]
    pub fn verify(&self, key: &[u8], message: &[u8], tag: &[u8]) -> bool {
        match self.sign(key, message) {
            Ok(expected) => ct_eq(&expected, tag),
            Err(_) => false,
        }
    }

    /// Hash an oversized key, then zero-pad to one hash block.
    fn key_block(key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if key.len() > H::BLOCK_LEN {
            let hashed = Zeroizing::new(H::digest(key));
            return pad(&hashed, H::BLOCK_LEN, 0x00).map(Zeroizing::new);
        }
        pad(key, H::BLOCK_LEN, 0x00).map(Zeroizing::new)
    }

    /// `block XOR (pad_byte repeated to the block length)`
    fn masked_key(block: &[u8], pad_byte: u8) -> Result<Zeroizing<Vec<u8>>> {
        let mask = pad(&[], H::BLOCK_LEN, pad_byte)?;
        xor_all(block, &[&mask]).map(Zeroizing::new)
    }
}

impl<H: HashFunction> Default for Hmac<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HashFunction> Clone for Hmac<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: HashFunction> Copy for Hmac<H> {}

impl<H: HashFunction> std::fmt::Debug for Hmac<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hmac").field("hash", &H::ALGORITHM).finish()
    }
}

/// Compute HMAC-SHA256 for given key and data
///
/// # Example
/// ```
/// use xcmt_primitives::mac::hmac::hmac_sha256;
///
/// let tag = hmac_sha256(b"my secret key", b"message to authenticate");
/// assert_eq!(tag.unwrap().len(), 32);
/// ```
///
/// # Errors
/// Returns an error if the key block cannot be formed.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    HmacSha256::new().sign(key, data)
}

/// Verify an HMAC-SHA256 tag using constant-time comparison
#[must_use]
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    HmacSha256::new().verify(key, data, tag)
}
