#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! AES-256-GCM (Advanced Encryption Standard - Galois/Counter Mode)
//!
//! The [`AeadPrimitive`] backend, following NIST SP 800-38D via aws-lc-rs
//! (FIPS 140-3 validated, AES-NI and AVX2 accelerated).

use crate::aead::{AeadPrimitive, Nonce, KEY_LEN, TAG_LEN};
use crate::error::{Error, Result};
use aws_lc_rs::aead::{Aad, LessSafeKey, Nonce as AwsNonce, UnboundKey, AES_256_GCM};
use tracing::instrument;
use zeroize::Zeroize;

/// AES-256-GCM backed by aws-lc-rs.
///
/// Stateless: each call keys a fresh aws-lc-rs context, since XAES derives a
/// new subkey per nonce.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsLcAes256Gcm;

impl AwsLcAes256Gcm {
    fn key(key: &[u8; KEY_LEN]) -> Result<LessSafeKey> {
        let unbound_key = UnboundKey::new(&AES_256_GCM, key)
            .map_err(|_e| Error::InvalidKeyLength { expected: KEY_LEN, actual: key.len() })?;
        Ok(LessSafeKey::new(unbound_key))
    }
}

impl AeadPrimitive for AwsLcAes256Gcm {
    #[instrument(level = "debug", skip_all, fields(algorithm = "AES-256-GCM", plaintext_len = plaintext.len(), aad_len = aad.len()))]
    fn seal(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let key = Self::key(key)?;
        let aws_nonce = AwsNonce::assume_unique_for_key(*nonce);

        // Prepare buffer: plaintext + space for tag
        let mut in_out = Vec::with_capacity(plaintext.len().saturating_add(TAG_LEN));
        in_out.extend_from_slice(plaintext);

        key.seal_in_place_append_tag(aws_nonce, Aad::from(aad), &mut in_out)
            .map_err(|e| Error::EncryptionFailed(e.to_string()))?;

        Ok(in_out)
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "AES-256-GCM", ciphertext_len = ciphertext.len(), aad_len = aad.len()))]
    fn open(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &Nonce,
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        if ciphertext.len() < TAG_LEN {
            return Err(Error::AuthenticationFailure);
        }

        let key = Self::key(key)?;
        let aws_nonce = AwsNonce::assume_unique_for_key(*nonce);

        let mut in_out = ciphertext.to_vec();
        let plaintext_len = match key.open_in_place(aws_nonce, Aad::from(aad), &mut in_out) {
            Ok(plaintext) => plaintext.len(),
            Err(_) => {
                in_out.zeroize();
                return Err(Error::AuthenticationFailure);
            }
        };

        in_out.truncate(plaintext_len);
        Ok(in_out)
    }
}
