#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! RFC 5869: HMAC-based Extract-and-Expand Key Derivation (HKDF)
//!
//! HKDF is a cryptographic key derivation function based on HMAC. It follows
//! the extract-and-expand paradigm:
//!
//! ```text
//! PRK = HMAC-Hash(salt, IKM)
//!
//! N = ceil(L/HashLen)
//! T(0) = empty string
//! T(i) = HMAC-Hash(PRK, T(i-1) | info | i)     for i = 1..N
//! OKM = first L octets of T(1) | ... | T(N)
//! ```
//!
//! The salt is the HMAC *key* during extraction and the keying material is
//! the message. An empty salt is used as given; HMAC zero-pads it to the
//! block size, which matches the RFC's `HashLen` zeros default.
//!
//! Output sizes are in bits. The single-byte counter bounds the output at
//! `255 * HashLen` bytes.

use super::{output_len_bytes, DerivedKey};
use crate::binaries::{dump, FieldType, Value};
use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sha256, Sha512};
use crate::mac::hmac::Hmac;
use tracing::instrument;
use zeroize::Zeroizing;

/// Layout of each expand block input: `T(i-1) || info || u8(i)`
const EXPAND_BLOCK_PATTERN: [FieldType; 3] = [FieldType::Bytes, FieldType::Bytes, FieldType::U8];

/// Largest block counter the one-byte encoding allows
const MAX_BLOCKS: usize = 255;

/// HKDF over HMAC-SHA256
pub type HkdfSha256 = Hkdf<Sha256>;

/// HKDF over HMAC-SHA512
pub type HkdfSha512 = Hkdf<Sha512>;

/// HKDF over HMAC with the hash function `H`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hkdf<H: HashFunction> {
    hmac: Hmac<H>,
}

impl<H: HashFunction> Hkdf<H> {
    /// Create an HKDF instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { hmac: Hmac::new() }
    }

    /// Largest output this instance can produce, in bits.
    #[must_use]
    pub const fn max_output_bits() -> usize {
        MAX_BLOCKS * H::OUTPUT_LEN * 8
    }

    /// HKDF-Extract: `PRK = HMAC(salt, key)`.
    ///
    /// # Errors
    /// Returns an error if HMAC cannot form its key block.
    #[instrument(level = "debug", skip_all, fields(key_len = key.len(), salt_len = salt.len()))]
    pub fn extract(&self, key: &[u8], salt: &[u8]) -> Result<DerivedKey> {
        Ok(DerivedKey::new(self.hmac.sign(salt, key)?))
    }

    /// HKDF-Expand: stretch `prk` to `size_bits` bits bound to `info`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `size_bits` is not a positive multiple of
    /// 8 or would need more than 255 HMAC blocks.
    #[instrument(level = "debug", skip(self, prk, info), fields(prk_len = prk.len(), info_len = info.len()))]
    pub fn expand(&self, prk: &[u8], info: &[u8], size_bits: usize) -> Result<DerivedKey> {
        let length = output_len_bytes(size_bits)?;
        let n = length.div_ceil(H::OUTPUT_LEN);
        if n > MAX_BLOCKS {
            return Err(Error::InvalidParameter(format!(
                "HKDF output of {} bits exceeds maximum of {} bits",
                size_bits,
                Self::max_output_bits()
            )));
        }

        let mut output = Vec::with_capacity(n * H::OUTPUT_LEN);
        let mut t_prev: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::new());

        for i in 1..=n {
            let counter = u8::try_from(i)
                .map_err(|_e| Error::InvalidParameter("HKDF counter overflow".to_string()))?;
            let block_input = Zeroizing::new(dump(
                &EXPAND_BLOCK_PATTERN,
                &[Value::Bytes(t_prev.to_vec()), Value::Bytes(info.to_vec()), Value::U8(counter)],
            )?);

            t_prev = Zeroizing::new(self.hmac.sign(prk, &block_input)?);
            output.extend_from_slice(&t_prev);
        }

        output.truncate(length);
        Ok(DerivedKey::new(output))
    }

    /// Full HKDF: `expand(extract(key, salt), info, size_bits)`.
    ///
    /// # Errors
    /// Returns an error under the same conditions as [`Hkdf::expand`].
    #[instrument(level = "debug", skip(self, key, salt, info), fields(key_len = key.len(), salt_len = salt.len(), info_len = info.len()))]
    pub fn derive(
        &self,
        key: &[u8],
        salt: &[u8],
        info: &[u8],
        size_bits: usize,
    ) -> Result<DerivedKey> {
        let prk = self.extract(key, salt)?;
        self.expand(prk.as_bytes(), info, size_bits)
    }
}

/// HKDF-SHA256 in one call
///
/// # Example
/// ```
/// use xcmt_primitives::kdf::hkdf_sha256;
///
/// let okm = hkdf_sha256(b"input key material", b"salt", b"context", 256).unwrap();
/// assert_eq!(okm.len(), 32);
/// ```
///
/// # Errors
/// Returns an error if `size_bits` is not a positive multiple of 8 or exceeds
/// 255 * 256 bits.
pub fn hkdf_sha256(key: &[u8], salt: &[u8], info: &[u8], size_bits: usize) -> Result<DerivedKey> {
    HkdfSha256::new().derive(key, salt, info, size_bits)
}
