//! HKDF-SHA256 and PBKDF2-HMAC-SHA256 key derivation
//!
//! Output sizes are given in bits and must be a positive multiple of 8.
//! Passwords are Unicode strings and are NFKD-normalized before use, so the
//! composed and decomposed spellings of the same password derive the same key.

use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use xcmt_primitives::kdf::{self, DerivedKey, Pbkdf2};
use xcmt_primitives::HmacSha256;

use crate::config::CoreConfig;
use crate::error::Result;
use crate::{log_crypto_operation_complete, log_crypto_operation_error, log_crypto_operation_start};

/// Derive `size_bits` bits with HKDF-SHA256 (RFC 5869).
///
/// An empty `salt` is used as given. HMAC zero-pads its key to the block
/// size, so it derives the same key as a salt of `HashLen` zero bytes.
///
/// # Errors
///
/// Returns `InvalidParameter` if `size_bits` is not a positive multiple of 8
/// or asks for more than 255 hash blocks.
pub fn hkdf_sha256(key: &[u8], salt: &[u8], info: &[u8], size_bits: usize) -> Result<DerivedKey> {
    log_crypto_operation_start!("hkdf_sha256", size_bits = size_bits, info_len = info.len());
    let okm = kdf::hkdf_sha256(key, salt, info, size_bits).map_err(|e| {
        log_crypto_operation_error!("hkdf_sha256", e);
        e
    })?;
    log_crypto_operation_complete!("hkdf_sha256", output_len = okm.len());
    Ok(okm)
}

/// Derive `size_bits` bits with PBKDF2-HMAC-SHA256 under the default
/// [`CoreConfig`].
///
/// # Errors
///
/// See [`pbkdf2_with_config`].
pub fn pbkdf2(password: &str, salt: &[u8], iterations: u32, size_bits: usize) -> Result<DerivedKey> {
    pbkdf2_with_config(password, salt, iterations, size_bits, &CoreConfig::default())
}

/// Derive `size_bits` bits with PBKDF2-HMAC-SHA256.
///
/// # Errors
///
/// Returns:
/// - `ConfigurationError` if `config` is invalid
/// - `ResourceExceeded` if `iterations` is above `config.max_pbkdf2_iterations`
/// - `InvalidParameter` if `iterations` is zero or `size_bits` is invalid
pub fn pbkdf2_with_config(
    password: &str,
    salt: &[u8],
    iterations: u32,
    size_bits: usize,
    config: &CoreConfig,
) -> Result<DerivedKey> {
    log_crypto_operation_start!(
        "pbkdf2_sha256",
        iterations = iterations,
        size_bits = size_bits,
        salt_len = salt.len()
    );

    config.validate()?;
    config.validate_pbkdf2_iterations(iterations).map_err(|e| {
        log_crypto_operation_error!("pbkdf2_sha256", e);
        e
    })?;

    let normalized: Zeroizing<String> = Zeroizing::new(password.nfkd().collect());
    let derived = Pbkdf2::new(HmacSha256::new())
        .with_parallel(config.parallel_pbkdf2)
        .digest(normalized.as_bytes(), salt, iterations, size_bits)
        .map_err(|e| {
            log_crypto_operation_error!("pbkdf2_sha256", e);
            e
        })?;

    log_crypto_operation_complete!("pbkdf2_sha256", output_len = derived.len());
    Ok(derived)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use crate::error::CoreError;
    use hex_literal::hex;
    use xcmt_primitives::Error;

    #[test]
    fn test_hkdf_sha256_rfc5869_case_1() {
        let ikm = [0x0bu8; 22];
        let salt = hex!("000102030405060708090a0b0c");
        let info = hex!("f0f1f2f3f4f5f6f7f8f9");

        let okm = hkdf_sha256(&ikm, &salt, &info, 42 * 8).unwrap();
        assert_eq!(
            okm.as_bytes(),
            hex!(
                "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf"
                "34007208d5b887185865"
            )
        );
    }

    #[test]
    fn test_hkdf_sha256_empty_salt_matches_zero_salt() {
        let empty = hkdf_sha256(b"ikm", b"", b"info", 256).unwrap();
        let zeros = hkdf_sha256(b"ikm", &[0u8; 32], b"info", 256).unwrap();
        assert_eq!(empty, zeros);
    }

    #[test]
    fn test_hkdf_sha256_rejects_partial_bytes() {
        let result = hkdf_sha256(b"ikm", b"salt", b"", 12);
        assert!(matches!(result, Err(CoreError::Primitive(Error::InvalidParameter(_)))));
    }

    #[test]
    fn test_pbkdf2_ascii_password() {
        let key = pbkdf2("password", b"salt", 2, 256).unwrap();
        assert_eq!(
            key.as_bytes(),
            hex!("ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43")
        );
    }

    #[test]
    fn test_pbkdf2_normalizes_compatibility_characters() {
        // U+2168 ROMAN NUMERAL NINE decomposes to "IX"
        let composed = pbkdf2("\u{2168}", b"salt", 1, 256).unwrap();
        let plain = pbkdf2("IX", b"salt", 1, 256).unwrap();
        assert_eq!(composed, plain);
        assert_eq!(
            composed.as_bytes(),
            hex!("6ff540a56d60d4f213190534a9d253b30a9bf7ea5309db207b24f27fef939ac7")
        );
    }

    #[test]
    fn test_pbkdf2_normalizes_canonical_equivalents() {
        let precomposed = pbkdf2("caf\u{e9}", b"salt", 3, 128).unwrap();
        let decomposed = pbkdf2("cafe\u{301}", b"salt", 3, 128).unwrap();
        assert_eq!(precomposed, decomposed);
    }

    #[test]
    fn test_pbkdf2_iteration_limit() {
        let config = CoreConfig::new().with_max_pbkdf2_iterations(10);
        assert!(pbkdf2_with_config("pw", b"salt", 10, 128, &config).is_ok());

        let result = pbkdf2_with_config("pw", b"salt", 11, 128, &config);
        assert_eq!(
            result,
            Err(CoreError::ResourceExceeded { what: "pbkdf2 iterations", requested: 11, limit: 10 })
        );
    }

    #[test]
    fn test_pbkdf2_parallel_setting_does_not_change_output() {
        let sequential = CoreConfig::new().with_parallel_pbkdf2(false);
        let parallel = CoreConfig::new().with_parallel_pbkdf2(true);

        let a = pbkdf2_with_config("pw", b"salt", 5, 1024, &sequential).unwrap();
        let b = pbkdf2_with_config("pw", b"salt", 5, 1024, &parallel).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 128);
    }

    #[test]
    fn test_pbkdf2_zero_iterations() {
        let result = pbkdf2("pw", b"salt", 0, 256);
        assert!(matches!(result, Err(CoreError::Primitive(Error::InvalidParameter(_)))));
    }

    #[test]
    fn test_pbkdf2_invalid_config() {
        let config = CoreConfig::new().with_max_decryption_size(0);
        let result = pbkdf2_with_config("pw", b"salt", 1, 256, &config);
        assert!(matches!(result, Err(CoreError::ConfigurationError(_))));
    }
}
