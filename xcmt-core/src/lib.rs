//! # XCMT Core
//!
//! One-shot operations over the `xcmt-primitives` constructions:
//! HMAC-SHA256, AES-256-CMAC, HKDF-SHA256, PBKDF2-HMAC-SHA256,
//! XAES-256-GCM and its key-committing variant KC-XAES-256-GCM.
//!
//! ## Quick Start
//!
//! ```rust
//! use xcmt_core::{decrypt_kc_xaes_256_gcm, encrypt_kc_xaes_256_gcm, generate_xnonce};
//!
//! xcmt_core::init()?;
//!
//! let key = [0x11u8; 32];
//! let nonce = generate_xnonce();
//! let sealed = encrypt_kc_xaes_256_gcm(&key, &nonce, b"secret", None)?;
//!
//! // Decrypting under any other key fails the commitment check
//! assert!(decrypt_kc_xaes_256_gcm(&[0x22u8; 32], &nonce, &sealed, None).is_err());
//! assert_eq!(decrypt_kc_xaes_256_gcm(&key, &nonce, &sealed, None)?, b"secret");
//! # Ok::<(), xcmt_core::CoreError>(())
//! ```
//!
//! ## Limits
//!
//! The `_with_config` variants take a [`CoreConfig`] that bounds message
//! sizes and PBKDF2 iteration counts; the plain variants use its defaults.
//!
//! ## Logging
//!
//! Operations emit `tracing` events under target `crypto::operation` with
//! lengths only. Install a subscriber with [`logging::init_tracing`] or any
//! subscriber of your own.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

/// Limits applied to the one-shot operations.
pub mod config;
/// One-shot MAC, KDF and AEAD operations.
pub mod convenience;
/// Error types for core operations.
pub mod error;
/// Tracing setup and log sanitization.
pub mod logging;

use std::sync::atomic::{AtomicBool, Ordering};

use xcmt_primitives::aead::kc_xaes_256_gcm;
use xcmt_primitives::mac::{cmac_256, hmac_sha256 as primitive_hmac_sha256};

pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use xcmt_primitives::kdf::DerivedKey;
pub use xcmt_primitives::ErrorSeverity;

pub use convenience::{
    cmac_aes256, decrypt_kc_xaes_256_gcm, decrypt_kc_xaes_256_gcm_with_config,
    decrypt_xaes_256_gcm, decrypt_xaes_256_gcm_with_config, encrypt_kc_xaes_256_gcm,
    encrypt_kc_xaes_256_gcm_with_config, encrypt_xaes_256_gcm, encrypt_xaes_256_gcm_with_config,
    generate_xnonce, hkdf_sha256, hmac_sha256, pbkdf2, pbkdf2_with_config, verify_cmac_aes256,
    verify_hmac_sha256,
};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static SELF_TESTS_PASSED: AtomicBool = AtomicBool::new(false);

/// Validate the default configuration and run the power-up self-tests.
///
/// # Errors
///
/// Returns `SelfTestFailed` if a known-answer test does not reproduce its
/// vector.
pub fn init() -> Result<()> {
    init_with_config(&CoreConfig::default())
}

/// Validate `config` and run the power-up self-tests.
///
/// # Errors
///
/// Returns `ConfigurationError` for an invalid configuration and
/// `SelfTestFailed` if a known-answer test does not reproduce its vector.
pub fn init_with_config(config: &CoreConfig) -> Result<()> {
    config.validate()?;
    run_power_up_self_tests()
}

/// Whether the power-up self-tests have passed in this process.
#[must_use]
pub fn self_tests_passed() -> bool {
    SELF_TESTS_PASSED.load(Ordering::SeqCst)
}

const KC_XAES_KAT_NONCE: &[u8; 24] = b"ABCDEFGHIJKLMNOPQRSTUVWX";
const KC_XAES_KAT_PLAINTEXT: &[u8] = b"XAES-256-GCM";
/// `ct || tag || commitment` for the all-0x01 key without AAD
const KC_XAES_KAT_CIPHERTEXT: [u8; 60] = [
    0xce, 0x54, 0x6e, 0xf6, 0x3c, 0x9c, 0xc6, 0x07, 0x65, 0x92, 0x36, 0x09,
    0xb3, 0x3a, 0x9a, 0x19, 0x74, 0xe9, 0x6e, 0x52, 0xda, 0xf2, 0xfc, 0xf7,
    0x07, 0x5e, 0x22, 0x71, 0x04, 0x07, 0x6b, 0x60, 0x85, 0xee, 0xba, 0xb1,
    0x38, 0x85, 0x5f, 0xe5, 0x78, 0x11, 0xc0, 0x41, 0x12, 0xef, 0xf9, 0x89,
    0xd4, 0x41, 0x20, 0xdf, 0xff, 0x66, 0x2d, 0x54, 0x75, 0xa3, 0x83, 0xc3,
];

/// Whether `sealed` reproduces the full KC-XAES-256-GCM known answer.
fn kc_xaes_known_answer_matches(sealed: &[u8]) -> bool {
    sealed == KC_XAES_KAT_CIPHERTEXT.as_slice()
}

fn self_test_failure(component: &str, status: &str) -> CoreError {
    CoreError::SelfTestFailed { component: component.to_string(), status: status.to_string() }
}

/// Known-answer tests for CMAC, HMAC and KC-XAES-256-GCM
fn run_power_up_self_tests() -> Result<()> {
    // Test 1: AES-256-CMAC, SP 800-38B example with an empty message
    let cmac_key = [
        0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77,
        0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14,
        0xdf, 0xf4,
    ];
    let expected_cmac = [
        0x02, 0x89, 0x62, 0xf6, 0x1b, 0x7b, 0xf8, 0x9e, 0xfc, 0x6b, 0x55, 0x1f, 0x46, 0x67, 0xd9,
        0x83,
    ];
    let tag = cmac_256(&cmac_key, b"").map_err(|e| self_test_failure("CMAC", &e.to_string()))?;
    if tag != expected_cmac {
        return Err(self_test_failure("CMAC", "KAT failed"));
    }

    // Test 2: HMAC-SHA256, RFC 4231 test case 2
    let expected_hmac = [
        0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95, 0x75,
        0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9, 0x64, 0xec,
        0x38, 0x43,
    ];
    let hmac = primitive_hmac_sha256(b"Jefe", b"what do ya want for nothing?")
        .map_err(|e| self_test_failure("HMAC-SHA256", &e.to_string()))?;
    if hmac != expected_hmac {
        return Err(self_test_failure("HMAC-SHA256", "KAT failed"));
    }

    // Test 3: KC-XAES-256-GCM seal and open against the full 60-byte vector
    let key = [0x01u8; 32];
    let sealed = kc_xaes_256_gcm::encrypt(&key, KC_XAES_KAT_NONCE, KC_XAES_KAT_PLAINTEXT, None)
        .map_err(|e| self_test_failure("KC-XAES-256-GCM", &e.to_string()))?;
    if !kc_xaes_known_answer_matches(&sealed) {
        return Err(self_test_failure("KC-XAES-256-GCM", "KAT failed"));
    }
    let opened = kc_xaes_256_gcm::decrypt(&key, KC_XAES_KAT_NONCE, &sealed, None)
        .map_err(|e| self_test_failure("KC-XAES-256-GCM", &e.to_string()))?;
    if opened != KC_XAES_KAT_PLAINTEXT {
        return Err(self_test_failure("KC-XAES-256-GCM", "decryption mismatch"));
    }

    SELF_TESTS_PASSED.store(true, Ordering::SeqCst);
    Ok(())
}
