#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! KC-XAES-256-GCM: key-committing XAES-256-GCM
//!
//! Plain AES-GCM is not key-committing: a ciphertext can be crafted to
//! decrypt validly under two different keys ("invisible salamanders").
//! KC-XAES-256-GCM appends a 32-byte tag that binds the key to the nonce,
//! computed with the same CMAC instance XAES-256-GCM derives its subkeys from:
//!
//! ```text
//! KC = CMAC(K, "XCMT" || N || 00 01 00 01) || CMAC(K, "XCMT" || N || 00 01 00 02)
//! output = XAES-256-GCM(K, N, P, A) || KC
//! ```
//!
//! Each commitment input is two complete blocks, so encryption and
//! decryption unroll CMAC and share `AES(K, "XCMT" || U)` between both halves.
//! [`KcXAes256Gcm::commitment`] computes the same tag through the general
//! CMAC path.
//!
//! Decryption always runs the AEAD before acting on the commitment comparison.
//! A commitment failure is reported as `CommitmentMismatch` even when the AEAD
//! tag is valid, and the plaintext is wiped.

use crate::aead::xaes_256_gcm::{domain_block, split_nonce, XAes256Gcm};
use crate::aead::{
    AeadPrimitive, AwsLcAes256Gcm, Commitment, XNonce, COMMITMENT_LEN, NONCE_LEN, TAG_LEN,
};
use crate::binaries::{dump, FieldType, Value};
use crate::cipher::BLOCK_LEN;
use crate::error::{Error, Result};
use crate::util::{ct_eq, xor_block};
use tracing::{instrument, warn};
use zeroize::Zeroize;

/// Commitment label `"XCMT"`
const COMMITMENT_LABEL: [u8; 4] = *b"XCMT";

/// Counter suffixes of the two commitment halves
const COMMITMENT_COUNTERS: [u32; 2] = [0x0001_0001, 0x0001_0002];

/// Layout of each commitment input: `"XCMT" || N || u32(counter)`
const COMMITMENT_PATTERN: [FieldType; 3] = [FieldType::Bytes, FieldType::Bytes, FieldType::U32];

/// Shortest valid ciphertext: empty plaintext, GCM tag and commitment
pub const MIN_CIPHERTEXT_LEN: usize = TAG_LEN + COMMITMENT_LEN;

/// KC-XAES-256-GCM keyed with a 32-byte key.
///
/// # Example
///
/// ```rust
/// use xcmt_primitives::aead::KcXAes256Gcm;
///
/// let cipher = KcXAes256Gcm::new(&[0x01u8; 32]).unwrap();
/// let nonce = KcXAes256Gcm::generate_nonce();
/// let ciphertext = cipher.encrypt(&nonce, b"secret message", None).unwrap();
/// assert_eq!(ciphertext.len(), 14 + 16 + 32);
/// let plaintext = cipher.decrypt(&nonce, &ciphertext, None).unwrap();
/// assert_eq!(plaintext, b"secret message");
/// ```
#[derive(Debug, Clone)]
pub struct KcXAes256Gcm<A: AeadPrimitive = AwsLcAes256Gcm> {
    xaes: XAes256Gcm<A>,
}

impl KcXAes256Gcm<AwsLcAes256Gcm> {
    /// Key KC-XAES-256-GCM over the aws-lc-rs AES-256-GCM backend.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `key` is not 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self { xaes: XAes256Gcm::new(key)? })
    }

    /// Generate a random 24-byte nonce.
    #[must_use]
    pub fn generate_nonce() -> XNonce {
        XAes256Gcm::generate_nonce()
    }
}

impl<A: AeadPrimitive> KcXAes256Gcm<A> {
    /// Key KC-XAES-256-GCM over a caller-supplied AES-256-GCM backend.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `key` is not 32 bytes.
    pub fn with_backend(key: &[u8], aead: A) -> Result<Self> {
        Ok(Self { xaes: XAes256Gcm::with_backend(key, aead)? })
    }

    /// Compute the 32-byte key-commitment tag for `nonce`.
    ///
    /// # Errors
    /// Returns `InvalidNonceLength` if `nonce` is not 24 bytes.
    pub fn commitment(&self, nonce: &[u8]) -> Result<Commitment> {
        split_nonce(nonce)?;

        let mut commitment = [0u8; COMMITMENT_LEN];
        for (half, counter) in commitment.chunks_exact_mut(BLOCK_LEN).zip(COMMITMENT_COUNTERS) {
            let input = dump(
                &COMMITMENT_PATTERN,
                &[
                    Value::Bytes(COMMITMENT_LABEL.to_vec()),
                    Value::Bytes(nonce.to_vec()),
                    Value::U32(counter),
                ],
            )?;
            half.copy_from_slice(&self.xaes.cmac().digest(&input)?);
        }
        Ok(commitment)
    }

    /// The commitment with CMAC unrolled over its two complete blocks:
    /// `X = AES(K, "XCMT" || U)`, then `AES(K, (V || c) XOR X XOR K1)` per half.
    pub(crate) fn commitment_inline(&self, nonce: &[u8]) -> Result<Commitment> {
        let (prefix, sub_nonce) = split_nonce(nonce)?;
        let cmac = self.xaes.cmac();
        let x1 = cmac.encrypt_block(&domain_block(&COMMITMENT_LABEL, &prefix));

        let mut commitment = [0u8; COMMITMENT_LEN];
        for (half, counter) in commitment.chunks_exact_mut(BLOCK_LEN).zip(COMMITMENT_COUNTERS) {
            let mut w = [0u8; BLOCK_LEN];
            let (head, tail) = w.split_at_mut(NONCE_LEN);
            head.copy_from_slice(&sub_nonce);
            tail.copy_from_slice(&counter.to_be_bytes());
            xor_block(&mut w, &x1);
            xor_block(&mut w, cmac.k1());
            half.copy_from_slice(&cmac.encrypt_block(&w));
        }
        Ok(commitment)
    }

    /// Encrypt `plaintext`, returning `ciphertext || tag || commitment`.
    ///
    /// # Errors
    /// Returns `InvalidNonceLength` for a nonce other than 24 bytes, or
    /// `EncryptionFailed` if the backend fails.
    #[instrument(level = "debug", skip(self, nonce, plaintext, aad), fields(plaintext_len = plaintext.len(), has_aad = aad.is_some()))]
    pub fn encrypt(&self, nonce: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut ciphertext = self.xaes.encrypt(nonce, plaintext, aad)?;
        let commitment = self.commitment_inline(nonce)?;
        ciphertext.extend_from_slice(&commitment);
        Ok(ciphertext)
    }

    /// Verify the commitment and the AEAD tag, then return the plaintext.
    ///
    /// # Errors
    /// - `InvalidNonceLength` for a nonce other than 24 bytes
    /// - `MalformedInput` if `data` is shorter than tag plus commitment
    /// - `CommitmentMismatch` if the commitment does not verify
    /// - `AuthenticationFailure` if the AEAD tag does not verify
    #[instrument(level = "debug", skip(self, nonce, data, aad), fields(data_len = data.len(), has_aad = aad.is_some()))]
    pub fn decrypt(&self, nonce: &[u8], data: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
        let expected = self.commitment_inline(nonce)?;
        if data.len() < MIN_CIPHERTEXT_LEN {
            return Err(Error::MalformedInput(format!(
                "KC-XAES-256-GCM ciphertext of {} bytes is shorter than the minimum {}",
                data.len(),
                MIN_CIPHERTEXT_LEN
            )));
        }

        let (ciphertext, received) = data.split_at(data.len() - COMMITMENT_LEN);
        let committed = ct_eq(&expected, received);
        let opened = self.xaes.decrypt(nonce, ciphertext, aad);

        if !committed {
            if let Ok(mut plaintext) = opened {
                plaintext.zeroize();
            }
            warn!("KC-XAES-256-GCM key commitment verification failed");
            return Err(Error::CommitmentMismatch);
        }

        opened
    }
}

/// Encrypt with KC-XAES-256-GCM in one call.
///
/// # Errors
/// Returns an error if the key or nonce length is wrong.
pub fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
    KcXAes256Gcm::new(key)?.encrypt(nonce, plaintext, aad)
}

/// Decrypt with KC-XAES-256-GCM in one call.
///
/// # Errors
/// Returns an error if the key or nonce length is wrong, the input is too
/// short, or commitment or authentication fails.
pub fn decrypt(key: &[u8], nonce: &[u8], data: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
    KcXAes256Gcm::new(key)?.decrypt(nonce, data, aad)
}
