#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # XCMT Primitives
//!
//! The construction layer of XCMT: MACs, KDFs and the XAES-256-GCM family,
//! composed from three black-box primitives (AES-256 block encryption,
//! SHA-2 hashing and AES-256-GCM).
//!
//! ## Algorithms
//!
//! ### Authenticated Encryption
//!
//! - **aead::xaes_256_gcm**: XAES-256-GCM, 24-byte nonces (C2SP)
//! - **aead::kc_xaes_256_gcm**: KC-XAES-256-GCM, XAES-256-GCM plus a 32-byte
//!   key-commitment tag
//! - **aead::aes_gcm**: AES-256-GCM backend via `aws-lc-rs`
//!
//! ### Message Authentication
//!
//! - **mac::cmac**: CMAC (NIST SP 800-38B, RFC 4493), generic over the block cipher
//! - **mac::hmac**: HMAC (RFC 2104, FIPS 198-1), generic over the hash function
//!
//! ### Key Derivation
//!
//! - **kdf::hkdf**: HKDF (RFC 5869)
//! - **kdf::pbkdf2**: PBKDF2 (RFC 8018), blocks computed in parallel with `rayon`
//!
//! ### Supporting Modules
//!
//! - **binaries**: Big-endian field layouts used to build MAC and KDF inputs
//! - **util**: Padding, XOR and constant-time comparison
//! - **cipher**: Block cipher capability, AES-256 via the `aes` crate
//! - **hash**: Hash capability, SHA-256 and SHA-512 via the `sha2` crate
//!
//! ## Backends
//!
//! | Primitive | Implementation |
//! |-----------|----------------|
//! | AES-256 block | `aes` |
//! | SHA-256 / SHA-512 | `sha2` |
//! | AES-256-GCM | `aws-lc-rs` |

pub mod aead;
pub mod binaries;
pub mod cipher;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod mac;
pub mod util;


pub use aead::{AeadPrimitive, AwsLcAes256Gcm, KcXAes256Gcm, XAes256Gcm};
pub use cipher::{Aes256, BlockCipher};
pub use error::{Error, ErrorSeverity, Result};
pub use hash::{HashAlgorithm, HashFunction, Sha256, Sha512};
pub use kdf::{DerivedKey, Hkdf, HkdfSha256, HkdfSha512, Pbkdf2, Prf};
pub use mac::{Cmac, Cmac256, Hmac, HmacSha256, HmacSha512};
