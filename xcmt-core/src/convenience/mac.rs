//! HMAC-SHA256 and AES-256-CMAC message authentication

use xcmt_primitives::mac::{self, Cmac256};

use crate::error::Result;
use crate::{log_crypto_operation_complete, log_crypto_operation_error, log_crypto_operation_start};

/// Compute a 32-byte HMAC-SHA256 tag.
///
/// Any key length is accepted, including the empty key.
///
/// # Errors
///
/// Returns an error if the HMAC key block cannot be formed.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    log_crypto_operation_start!("hmac_sha256", message_len = message.len());
    let tag = mac::hmac_sha256(key, message).map_err(|e| {
        log_crypto_operation_error!("hmac_sha256", e);
        e
    })?;
    log_crypto_operation_complete!("hmac_sha256", tag_len = tag.len());
    Ok(tag)
}

/// Check an HMAC-SHA256 tag in constant time.
#[must_use]
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    mac::verify_hmac_sha256(key, message, tag)
}

/// Compute a 16-byte AES-256-CMAC tag.
///
/// # Errors
///
/// Returns `InvalidKeyLength` if `key` is not 32 bytes.
pub fn cmac_aes256(key: &[u8], message: &[u8]) -> Result<[u8; 16]> {
    log_crypto_operation_start!("cmac_aes256", message_len = message.len());
    let cmac = Cmac256::new(key).map_err(|e| {
        log_crypto_operation_error!("cmac_aes256", e);
        e
    })?;
    let tag = cmac.digest(message).map_err(|e| {
        log_crypto_operation_error!("cmac_aes256", e);
        e
    })?;
    log_crypto_operation_complete!("cmac_aes256");
    Ok(tag)
}

/// Check an AES-256-CMAC tag in constant time.
///
/// # Errors
///
/// Returns `InvalidKeyLength` if `key` is not 32 bytes.
pub fn verify_cmac_aes256(key: &[u8], message: &[u8], tag: &[u8]) -> Result<bool> {
    Ok(Cmac256::new(key)?.verify(message, tag))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use crate::error::CoreError;
    use hex_literal::hex;
    use xcmt_primitives::Error;

    #[test]
    fn test_hmac_sha256_rfc4231_case_2() {
        let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            tag,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
        assert!(verify_hmac_sha256(b"Jefe", b"what do ya want for nothing?", &tag));
        assert!(!verify_hmac_sha256(b"jefe", b"what do ya want for nothing?", &tag));
    }

    #[test]
    fn test_cmac_aes256_nist_empty_message() {
        let key = hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
        let tag = cmac_aes256(&key, b"").unwrap();
        assert_eq!(tag, hex!("028962f61b7bf89efc6b551f4667d983"));
        assert!(verify_cmac_aes256(&key, b"", &tag).unwrap());
        assert!(!verify_cmac_aes256(&key, b"x", &tag).unwrap());
    }

    #[test]
    fn test_cmac_aes256_rejects_short_key() {
        let result = cmac_aes256(&[0u8; 16], b"message");
        assert_eq!(
            result,
            Err(CoreError::Primitive(Error::InvalidKeyLength { expected: 32, actual: 16 }))
        );
        assert!(verify_cmac_aes256(&[0u8; 16], b"message", &[0u8; 16]).is_err());
    }
}
