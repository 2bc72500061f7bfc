//! One-shot operations
//!
//! Each function constructs the underlying instance, runs a single
//! operation and drops it, zeroizing any derived key material. Operations
//! that take a size-dependent amount of work have a `_with_config` variant;
//! the plain variant runs under [`CoreConfig::default`](crate::CoreConfig).
//!
//! ```rust
//! use xcmt_core::{hkdf_sha256, hmac_sha256, pbkdf2};
//!
//! let tag = hmac_sha256(b"key", b"message")?;
//! assert_eq!(tag.len(), 32);
//!
//! let okm = hkdf_sha256(b"input key material", b"salt", b"context", 256)?;
//! let pwk = pbkdf2("correct horse", b"salt", 10_000, 256)?;
//! assert_eq!(okm.len(), pwk.len());
//! # Ok::<(), xcmt_core::CoreError>(())
//! ```

mod kdf;
mod mac;
mod xaes;

// ============================================================================
// Message Authentication
// ============================================================================

pub use mac::{cmac_aes256, hmac_sha256, verify_cmac_aes256, verify_hmac_sha256};

// ============================================================================
// Key Derivation
// ============================================================================

pub use kdf::{hkdf_sha256, pbkdf2, pbkdf2_with_config};

// ============================================================================
// Authenticated Encryption
// ============================================================================

pub use xaes::{
    decrypt_kc_xaes_256_gcm, decrypt_kc_xaes_256_gcm_with_config, decrypt_xaes_256_gcm,
    decrypt_xaes_256_gcm_with_config, encrypt_kc_xaes_256_gcm,
    encrypt_kc_xaes_256_gcm_with_config, encrypt_xaes_256_gcm, encrypt_xaes_256_gcm_with_config,
    generate_xnonce,
};
