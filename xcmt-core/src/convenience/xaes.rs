//! XAES-256-GCM and KC-XAES-256-GCM authenticated encryption
//!
//! The caller supplies the 24-byte nonce; [`generate_xnonce`] returns a
//! fresh random one. Random 24-byte nonces are safe to use with a single key
//! for an effectively unlimited number of messages.
//!
//! ```rust
//! use xcmt_core::{decrypt_kc_xaes_256_gcm, encrypt_kc_xaes_256_gcm, generate_xnonce};
//!
//! let key = [0x42u8; 32];
//! let nonce = generate_xnonce();
//! let sealed = encrypt_kc_xaes_256_gcm(&key, &nonce, b"hello", Some(b"header".as_slice()))?;
//! let opened = decrypt_kc_xaes_256_gcm(&key, &nonce, &sealed, Some(b"header".as_slice()))?;
//! assert_eq!(opened, b"hello");
//! # Ok::<(), xcmt_core::CoreError>(())
//! ```

use xcmt_primitives::aead::XNonce;
use xcmt_primitives::{KcXAes256Gcm, XAes256Gcm};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::{log_crypto_operation_complete, log_crypto_operation_error, log_crypto_operation_start};

/// Generate a random 24-byte nonce from the OS random number generator.
#[must_use]
pub fn generate_xnonce() -> XNonce {
    XAes256Gcm::generate_nonce()
}

fn logged<T>(operation: &'static str, result: xcmt_primitives::Result<T>) -> Result<T> {
    result.map_err(|e| {
        let err = CoreError::from(e);
        log_crypto_operation_error!(operation, err);
        err
    })
}

fn check_size(operation: &'static str, checked: Result<()>) -> Result<()> {
    checked.map_err(|err| {
        log_crypto_operation_error!(operation, err);
        err
    })
}

// ============================================================================
// XAES-256-GCM
// ============================================================================

/// Encrypt with XAES-256-GCM under the default [`CoreConfig`].
///
/// Returns `ciphertext || tag`.
///
/// # Errors
///
/// See [`encrypt_xaes_256_gcm_with_config`].
pub fn encrypt_xaes_256_gcm(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    encrypt_xaes_256_gcm_with_config(key, nonce, plaintext, aad, &CoreConfig::default())
}

/// Decrypt XAES-256-GCM under the default [`CoreConfig`].
///
/// # Errors
///
/// See [`decrypt_xaes_256_gcm_with_config`].
pub fn decrypt_xaes_256_gcm(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    decrypt_xaes_256_gcm_with_config(key, nonce, ciphertext, aad, &CoreConfig::default())
}

/// Encrypt with XAES-256-GCM.
///
/// # Errors
///
/// Returns:
/// - `ConfigurationError` if `config` is invalid
/// - `ResourceExceeded` if the plaintext is above `config.max_encryption_size`
/// - `InvalidKeyLength` / `InvalidNonceLength` for a key other than 32 bytes
///   or a nonce other than 24 bytes
pub fn encrypt_xaes_256_gcm_with_config(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: Option<&[u8]>,
    config: &CoreConfig,
) -> Result<Vec<u8>> {
    const OP: &str = "xaes_256_gcm_encrypt";
    log_crypto_operation_start!(OP, data_len = plaintext.len(), has_aad = aad.is_some());

    config.validate()?;
    check_size(OP, config.validate_encryption_size(plaintext.len()))?;

    let cipher = logged(OP, XAes256Gcm::new(key))?;
    let ciphertext = logged(OP, cipher.encrypt(nonce, plaintext, aad))?;

    log_crypto_operation_complete!(OP, ciphertext_len = ciphertext.len());
    Ok(ciphertext)
}

/// Decrypt XAES-256-GCM.
///
/// # Errors
///
/// Returns:
/// - `ConfigurationError` if `config` is invalid
/// - `ResourceExceeded` if the input is above `config.max_decryption_size`
/// - `InvalidKeyLength` / `InvalidNonceLength` for malformed key or nonce
/// - `AuthenticationFailure` if the tag does not verify
pub fn decrypt_xaes_256_gcm_with_config(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: Option<&[u8]>,
    config: &CoreConfig,
) -> Result<Vec<u8>> {
    const OP: &str = "xaes_256_gcm_decrypt";
    log_crypto_operation_start!(OP, data_len = ciphertext.len(), has_aad = aad.is_some());

    config.validate()?;
    check_size(OP, config.validate_decryption_size(ciphertext.len()))?;

    let cipher = logged(OP, XAes256Gcm::new(key))?;
    let plaintext = logged(OP, cipher.decrypt(nonce, ciphertext, aad))?;

    log_crypto_operation_complete!(OP, plaintext_len = plaintext.len());
    Ok(plaintext)
}

// ============================================================================
// KC-XAES-256-GCM
// ============================================================================

/// Encrypt with key-committing XAES-256-GCM under the default [`CoreConfig`].
///
/// Returns `ciphertext || tag || commitment`.
///
/// # Errors
///
/// See [`encrypt_kc_xaes_256_gcm_with_config`].
pub fn encrypt_kc_xaes_256_gcm(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    encrypt_kc_xaes_256_gcm_with_config(key, nonce, plaintext, aad, &CoreConfig::default())
}

/// Decrypt key-committing XAES-256-GCM under the default [`CoreConfig`].
///
/// # Errors
///
/// See [`decrypt_kc_xaes_256_gcm_with_config`].
pub fn decrypt_kc_xaes_256_gcm(
    key: &[u8],
    nonce: &[u8],
    data: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    decrypt_kc_xaes_256_gcm_with_config(key, nonce, data, aad, &CoreConfig::default())
}

/// Encrypt with key-committing XAES-256-GCM.
///
/// # Errors
///
/// Returns:
/// - `ConfigurationError` if `config` is invalid
/// - `ResourceExceeded` if the plaintext is above `config.max_encryption_size`
/// - `InvalidKeyLength` / `InvalidNonceLength` for malformed key or nonce
pub fn encrypt_kc_xaes_256_gcm_with_config(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: Option<&[u8]>,
    config: &CoreConfig,
) -> Result<Vec<u8>> {
    const OP: &str = "kc_xaes_256_gcm_encrypt";
    log_crypto_operation_start!(OP, data_len = plaintext.len(), has_aad = aad.is_some());

    config.validate()?;
    check_size(OP, config.validate_encryption_size(plaintext.len()))?;

    let cipher = logged(OP, KcXAes256Gcm::new(key))?;
    let data = logged(OP, cipher.encrypt(nonce, plaintext, aad))?;

    log_crypto_operation_complete!(OP, ciphertext_len = data.len());
    Ok(data)
}

/// Decrypt key-committing XAES-256-GCM.
///
/// The commitment is always checked before any plaintext is released; a
/// commitment failure is reported in preference to a tag failure.
///
/// # Errors
///
/// Returns:
/// - `ConfigurationError` if `config` is invalid
/// - `ResourceExceeded` if the input is above `config.max_decryption_size`
/// - `InvalidKeyLength` / `InvalidNonceLength` for malformed key or nonce
/// - `MalformedInput` if the input is shorter than tag plus commitment
/// - `CommitmentMismatch` if the commitment does not verify
/// - `AuthenticationFailure` if the tag does not verify
pub fn decrypt_kc_xaes_256_gcm_with_config(
    key: &[u8],
    nonce: &[u8],
    data: &[u8],
    aad: Option<&[u8]>,
    config: &CoreConfig,
) -> Result<Vec<u8>> {
    const OP: &str = "kc_xaes_256_gcm_decrypt";
    log_crypto_operation_start!(OP, data_len = data.len(), has_aad = aad.is_some());

    config.validate()?;
    check_size(OP, config.validate_decryption_size(data.len()))?;

    let cipher = logged(OP, KcXAes256Gcm::new(key))?;
    let plaintext = logged(OP, cipher.decrypt(nonce, data, aad))?;

    log_crypto_operation_complete!(OP, plaintext_len = plaintext.len());
    Ok(plaintext)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
#[allow(clippy::indexing_slicing)] // Tests use slice indexing for verification
mod tests {
    use super::*;
    use hex_literal::hex;
    use xcmt_primitives::Error;

    const NONCE: &[u8; 24] = b"ABCDEFGHIJKLMNOPQRSTUVWX";

    #[test]
    fn test_xaes_c2sp_vector() {
        let ct = encrypt_xaes_256_gcm(&[0x01u8; 32], NONCE, b"XAES-256-GCM", None).unwrap();
        assert_eq!(ct, hex!("ce546ef63c9cc60765923609b33a9a1974e96e52daf2fcf7075e2271"));
        let pt = decrypt_xaes_256_gcm(&[0x01u8; 32], NONCE, &ct, None).unwrap();
        assert_eq!(pt, b"XAES-256-GCM");
    }

    #[test]
    fn test_kc_xaes_vector_with_aad() {
        let aad: &[u8] = b"c2sp.org/XAES-256-GCM";
        let data = encrypt_kc_xaes_256_gcm(&[0x03u8; 32], NONCE, b"XAES-256-GCM", Some(aad)).unwrap();
        assert_eq!(
            data,
            hex!(
                "986ec1832593df5443a179437fd083bf3fdb41abd740a21f71eb769d"
                "5553cd21d1592b422e3129632a3187eee8a658cdca5c5b32ce86308dcc18e9d1"
            )
        );
        let pt = decrypt_kc_xaes_256_gcm(&[0x03u8; 32], NONCE, &data, Some(aad)).unwrap();
        assert_eq!(pt, b"XAES-256-GCM");
    }

    #[test]
    fn test_generated_nonces_differ() {
        assert_ne!(generate_xnonce(), generate_xnonce());
    }

    #[test]
    fn test_encryption_size_limit() {
        let config = CoreConfig::new().with_max_encryption_size(8);
        let key = [0u8; 32];

        assert!(encrypt_kc_xaes_256_gcm_with_config(&key, NONCE, &[0u8; 8], None, &config).is_ok());
        let result = encrypt_kc_xaes_256_gcm_with_config(&key, NONCE, &[0u8; 9], None, &config);
        assert_eq!(
            result,
            Err(CoreError::ResourceExceeded { what: "encryption size", requested: 9, limit: 8 })
        );
        assert!(encrypt_xaes_256_gcm_with_config(&key, NONCE, &[0u8; 9], None, &config).is_err());
    }

    #[test]
    fn test_decryption_size_limit_applies_to_whole_input() {
        let key = [0u8; 32];
        let data = encrypt_kc_xaes_256_gcm(&key, NONCE, b"1234", None).unwrap();
        let config = CoreConfig::new().with_max_decryption_size(data.len() - 1);

        let result = decrypt_kc_xaes_256_gcm_with_config(&key, NONCE, &data, None, &config);
        assert!(matches!(result, Err(CoreError::ResourceExceeded { what: "decryption size", .. })));
    }

    #[test]
    fn test_commitment_failure_surfaces_as_primitive_error() {
        let key = [0x07u8; 32];
        let mut data = encrypt_kc_xaes_256_gcm(&key, NONCE, b"payload", None).unwrap();
        let last = data.len() - 1;
        data[last] ^= 0x80;

        let err = decrypt_kc_xaes_256_gcm(&key, NONCE, &data, None).unwrap_err();
        assert_eq!(err, CoreError::Primitive(Error::CommitmentMismatch));
        assert!(err.is_integrity_failure());
    }

    #[test]
    fn test_wrong_key_fails_commitment() {
        let data = encrypt_kc_xaes_256_gcm(&[1u8; 32], NONCE, b"payload", None).unwrap();
        let err = decrypt_kc_xaes_256_gcm(&[2u8; 32], NONCE, &data, None).unwrap_err();
        assert_eq!(err, CoreError::Primitive(Error::CommitmentMismatch));
    }

    #[test]
    fn test_invalid_nonce_length() {
        let result = encrypt_xaes_256_gcm(&[0u8; 32], &[0u8; 12], b"x", None);
        assert_eq!(
            result,
            Err(CoreError::Primitive(Error::InvalidNonceLength { expected: 24, actual: 12 }))
        );
    }
}
