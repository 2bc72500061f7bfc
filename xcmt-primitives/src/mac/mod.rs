#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Message Authentication Codes
//!
//! Provides MAC algorithms (HMAC, CMAC).

pub mod cmac;
pub mod hmac;

pub use cmac::{cmac_256, double_block, verify_cmac_256, Cmac, Cmac256};
pub use hmac::{hmac_sha256, verify_hmac_sha256, Hmac, HmacSha256, HmacSha512};
