#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! RFC 8018: Password-Based Key Derivation Function (PBKDF2)
//!
//! PBKDF2 applies a pseudorandom function (typically HMAC) to derive keys from
//! passwords. It includes salting and iteration to make brute-force attacks
//! more difficult:
//!
//! ```text
//! DK = T_1 || T_2 || ... || T_l   (truncated to dkLen)
//! T_j = U_1 ^ U_2 ^ ... ^ U_c
//! U_1 = PRF(P, S || INT(j))
//! U_k = PRF(P, U_{k-1})
//! ```
//!
//! Each `T_j` is an independent chain, so blocks can be computed on the rayon
//! pool. The password is taken as raw bytes; Unicode normalization is the
//! caller's job.

use super::{output_len_bytes, DerivedKey};
use crate::binaries::{dump, FieldType, Value};
use crate::error::{Error, Result};
use crate::hash::HashFunction;
use crate::mac::hmac::{Hmac, HmacSha256};
use crate::util::{ct_eq, xor};
use rayon::prelude::*;
use tracing::instrument;
use zeroize::Zeroizing;

/// Layout of the first PRF input of each block: `salt || u32(j)`
const BLOCK_INPUT_PATTERN: [FieldType; 2] = [FieldType::Bytes, FieldType::U32];

/// Pseudorandom function capability for PBKDF2
pub trait Prf: Send + Sync {
    /// Output length in bytes
    fn output_len(&self) -> usize;

    /// Evaluate the PRF keyed with `key` over `data`.
    ///
    /// # Errors
    /// Returns an error if the PRF cannot be keyed with `key`.
    fn compute(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>>;
}

impl<H: HashFunction> Prf for Hmac<H> {
    fn output_len(&self) -> usize {
        H::OUTPUT_LEN
    }

    fn compute(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        self.sign(key, data)
    }
}

/// PBKDF2 over the pseudorandom function `P`.
#[derive(Debug, Clone)]
pub struct Pbkdf2<P: Prf = HmacSha256> {
    prf: P,
    parallel: bool,
}

impl Default for Pbkdf2<HmacSha256> {
    fn default() -> Self {
        Self::new(HmacSha256::new())
    }
}

impl<P: Prf> Pbkdf2<P> {
    /// Create a PBKDF2 instance over `prf`. Blocks are computed sequentially.
    #[must_use]
    pub fn new(prf: P) -> Self {
        Self { prf, parallel: false }
    }

    /// Compute independent output blocks on the rayon thread pool.
    ///
    /// The output is identical either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Derive `size_bits` bits from `password` and `salt`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `iterations` is zero, `size_bits` is not
    /// a positive multiple of 8, or more than `u32::MAX` blocks are needed.
    #[instrument(level = "debug", skip(self, password, salt), fields(password_len = password.len(), salt_len = salt.len(), parallel = self.parallel))]
    pub fn digest(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        size_bits: usize,
    ) -> Result<DerivedKey> {
        if iterations == 0 {
            return Err(Error::InvalidParameter("Iteration count must be at least 1".to_string()));
        }

        let length = output_len_bytes(size_bits)?;
        let block_count = u32::try_from(length.div_ceil(self.prf.output_len())).map_err(|_e| {
            Error::InvalidParameter(format!("PBKDF2 output of {size_bits} bits is too long"))
        })?;

        let blocks: Vec<Zeroizing<Vec<u8>>> = if self.parallel {
            (1..=block_count)
                .into_par_iter()
                .map(|j| self.generate_block(password, salt, iterations, j))
                .collect::<Result<_>>()?
        } else {
            (1..=block_count)
                .map(|j| self.generate_block(password, salt, iterations, j))
                .collect::<Result<_>>()?
        };

        let mut derived_key = Vec::with_capacity(length);
        for block in &blocks {
            let remaining = length.saturating_sub(derived_key.len());
            derived_key.extend(block.iter().take(remaining));
        }

        Ok(DerivedKey::new(derived_key))
    }

    /// Re-derive and compare against `expected` in constant time.
    ///
    /// An empty `expected` never matches and returns `Ok(false)`.
    ///
    /// # Errors
    /// Returns an error under the same conditions as [`Pbkdf2::digest`].
    pub fn verify(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        expected: &[u8],
    ) -> Result<bool> {
        if expected.is_empty() {
            return Ok(false);
        }
        let derived = self.digest(password, salt, iterations, expected.len().saturating_mul(8))?;
        Ok(ct_eq(derived.as_bytes(), expected))
    }

    /// Generate a single block `T_j` of the PBKDF2 output
    fn generate_block(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        block_index: u32,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let block_input =
            dump(&BLOCK_INPUT_PATTERN, &[Value::Bytes(salt.to_vec()), Value::U32(block_index)])?;

        let mut u = Zeroizing::new(self.prf.compute(password, &block_input)?);
        let mut result = Zeroizing::new(u.to_vec());

        for _ in 1..iterations {
            u = Zeroizing::new(self.prf.compute(password, &u)?);
            xor(&mut result, &u)?;
        }

        Ok(result)
    }
}

/// PBKDF2-HMAC-SHA256 in one call, computing blocks sequentially
///
/// # Example
/// ```
/// use xcmt_primitives::kdf::pbkdf2_hmac_sha256;
///
/// let key = pbkdf2_hmac_sha256(b"password", b"salt", 1, 256).unwrap();
/// assert_eq!(key.len(), 32);
/// ```
///
/// # Errors
/// Returns an error if `iterations` is zero or `size_bits` is invalid.
pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    size_bits: usize,
) -> Result<DerivedKey> {
    Pbkdf2::<HmacSha256>::default().digest(password, salt, iterations, size_bits)
}
