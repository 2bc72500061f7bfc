#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: CMAC block cipher mode arithmetic.
// - Fixed 16-byte block size arithmetic
// - Index calculations bounded by message length
#![allow(clippy::arithmetic_side_effects)]

//! CMAC (Cipher-based Message Authentication Code)
//!
//! This module provides CMAC as specified in NIST SP 800-38B: Recommendation
//! for Block Cipher Modes of Operation: The CMAC Mode for Authentication
//! (RFC 4493 for AES).
//!
//! The construction is generic over any [`BlockCipher`] with a 128-bit block:
//! - Subkeys K1 and K2 are derived once per key, at construction
//! - Every block but the last is CBC-chained from a zero IV
//! - A complete final block is masked with K1; a partial (or empty) one is
//!   padded with `0x80 00..` and masked with K2
//!
//! Tags are never truncated.

use crate::cipher::{Aes256, Block, BlockCipher, BLOCK_LEN};
use crate::error::{Error, Result};
use crate::util::{ct_eq, pad, xor, xor_block};
use tracing::instrument;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Reduction constant for doubling in GF(2^128)
const RB: Block = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x87,
];

/// CMAC over AES-256, the instance XAES-256-GCM is keyed with
pub type Cmac256 = Cmac<Aes256>;

/// CMAC subkeys K1 and K2 for final-block masking
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct CmacSubkeys {
    k1: Block,
    k2: Block,
}

/// A keyed CMAC instance.
///
/// Immutable after construction; one instance may serve any number of
/// concurrent `digest` calls under the same key.
#[derive(Clone)]
pub struct Cmac<C: BlockCipher> {
    cipher: C,
    subkeys: CmacSubkeys,
}

impl<C: BlockCipher> std::fmt::Debug for Cmac<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmac").field("subkeys", &"[REDACTED]").finish_non_exhaustive()
    }
}

/// Left shift a 128-bit block by 1 bit
///
/// Returns the MSB that was shifted out (0 or 1)
#[inline(always)]
fn left_shift_block(block: &Block) -> (Block, u8) {
    let mut result = [0u8; BLOCK_LEN];
    let mut overflow = 0u8;

    for (r, &current_byte) in result.iter_mut().zip(block.iter()).rev() {
        *r = (current_byte << 1) | overflow;
        overflow = (current_byte >> 7) & 1;
    }

    (result, overflow)
}

/// Multiply a block by `x` in GF(2^128).
///
/// Shifts left by one bit and, if the bit shifted out was set, XORs the
/// result with `R = 0^120 || 10000111`. The reduction mask is built from the
/// carry bit rather than branched on.
#[must_use]
pub fn double_block(block: &Block) -> Block {
    let (mut shifted, msb) = left_shift_block(block);
    let mask = 0u8.wrapping_sub(msb);
    let mut rb = RB;
    for b in &mut rb {
        *b &= mask;
    }
    xor_block(&mut shifted, &rb);
    shifted
}

/// Copy a block-length buffer into a [`Block`].
fn to_block(bytes: &[u8]) -> Result<Block> {
    Block::try_from(bytes)
        .map_err(|_e| Error::LengthMismatch { left: bytes.len(), right: BLOCK_LEN })
}

/// Derive K1 = dbl(L) and K2 = dbl(K1), where L = E(K, 0^128)
///
/// # Algorithm (NIST SP 800-38B Section 6.1)
fn generate_subkeys<C: BlockCipher>(cipher: &C) -> CmacSubkeys {
    let mut l_block = cipher.encrypt_block(&[0u8; BLOCK_LEN]);
    let k1 = double_block(&l_block);
    let k2 = double_block(&k1);
    l_block.zeroize();
    CmacSubkeys { k1, k2 }
}

impl<C: BlockCipher> Cmac<C> {
    /// Key the underlying cipher and derive the subkeys.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if the cipher rejects `key`.
    #[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
    pub fn new(key: &[u8]) -> Result<Self> {
        let cipher = C::new(key)?;
        let subkeys = generate_subkeys(&cipher);
        Ok(Self { cipher, subkeys })
    }

    /// Compute the full-length CMAC tag of `message`.
    ///
    /// # Algorithm (NIST SP 800-38B Section 6.2)
    /// 1. n = ceil(len / 16), with n = 1 for the empty message
    /// 2. C_0 = 0; C_i = E(K, C_{i-1} XOR M_i) for i < n
    /// 3. T = E(K, C_{n-1} XOR M_n*) where M_n* is the masked final block
    ///
    /// # Errors
    /// Returns `LengthMismatch` if a chained block is not exactly one cipher
    /// block long.
    #[instrument(level = "trace", skip(self, message), fields(message_len = message.len()))]
    pub fn digest(&self, message: &[u8]) -> Result<Block> {
        let total_blocks = message.len().div_ceil(BLOCK_LEN).max(1);
        let (head, last) = message.split_at((total_blocks - 1) * BLOCK_LEN);

        let mut chain = [0u8; BLOCK_LEN];
        for chunk in head.chunks_exact(BLOCK_LEN) {
            xor(&mut chain, chunk)?;
            chain = self.cipher.encrypt_block(&chain);
        }

        let mut final_block = if last.len() == BLOCK_LEN {
            let mut block = last.to_vec();
            xor(&mut block, &self.subkeys.k1)?;
            block
        } else {
            let mut padded = last.to_vec();
            padded.push(0x80);
            let mut block = pad(&padded, BLOCK_LEN, 0x00)?;
            padded.zeroize();
            xor(&mut block, &self.subkeys.k2)?;
            block
        };
        xor(&mut final_block, &chain)?;

        let input = to_block(&final_block);
        final_block.zeroize();
        Ok(self.cipher.encrypt_block(&input?))
    }

    /// Check `tag` against the CMAC of `message` in constant time.
    ///
    /// A tag of the wrong length is rejected.
    #[must_use]
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        match self.digest(message) {
            Ok(expected) => ct_eq(&expected, tag),
            Err(_) => false,
        }
    }

    /// CMAC of a message that is exactly one complete block: `E(K, M XOR K1)`.
    #[must_use]
    pub(crate) fn digest_complete_block(&self, block: &Block) -> Block {
        let mut input = *block;
        xor_block(&mut input, &self.subkeys.k1);
        self.cipher.encrypt_block(&input)
    }

    /// Raw single-block encryption under the CMAC key.
    #[must_use]
    pub(crate) fn encrypt_block(&self, block: &Block) -> Block {
        self.cipher.encrypt_block(block)
    }

    /// First subkey.
    #[must_use]
    pub(crate) fn k1(&self) -> &Block {
        &self.subkeys.k1
    }
}

/// Compute AES-256-CMAC for given data
///
/// # Example
/// ```
/// use xcmt_primitives::mac::cmac::cmac_256;
///
/// let key = [0u8; 32];
/// let tag = cmac_256(&key, b"message to authenticate").unwrap();
/// assert_eq!(tag.len(), 16);
/// ```
///
/// # Errors
/// Returns an error if the key length is not exactly 32 bytes.
pub fn cmac_256(key: &[u8], data: &[u8]) -> Result<Block> {
    Cmac256::new(key)?.digest(data)
}

/// Verify an AES-256-CMAC tag using constant-time comparison
///
/// Returns `false` for a malformed key as well as for a wrong tag.
#[must_use]
pub fn verify_cmac_256(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    match Cmac256::new(key) {
        Ok(cmac) => cmac.verify(data, tag),
        Err(_) => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use hex_literal::hex;

    const NIST_KEY: [u8; 32] =
        hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
    const NIST_MSG: [u8; 64] = hex!(
        "6bc1bee22e409f96e93d7e117393172a"
        "ae2d8a571e03ac9c9eb76fac45af8e51"
        "30c81c46a35ce411e5fbc1191a0a52ef"
        "f69f2445df4f9b17ad2b417be66c3710"
    );

    #[test]
    fn test_subkey_generation_nist() {
        // NIST SP 800-38B Appendix D.3
        let cmac = Cmac256::new(&NIST_KEY).unwrap();
        assert_eq!(cmac.subkeys.k1, hex!("cad1ed03299eedac2e9a99808621502f"));
        assert_eq!(cmac.subkeys.k2, hex!("95a3da06533ddb585d3533010c42a0d9"));
    }

    #[test]
    fn test_k2_is_double_of_k1() {
        for key in [[0u8; 32], [0xffu8; 32], NIST_KEY] {
            let cmac = Cmac256::new(&key).unwrap();
            assert_eq!(cmac.subkeys.k2, double_block(&cmac.subkeys.k1));
        }
    }

    #[test]
    fn test_double_block() {
        let mut msb_set = [0u8; 16];
        msb_set[0] = 0x80;
        assert_eq!(double_block(&msb_set), RB);

        let mut msb_clear = [0u8; 16];
        msb_clear[15] = 0x01;
        let mut expected = [0u8; 16];
        expected[15] = 0x02;
        assert_eq!(double_block(&msb_clear), expected);

        assert_eq!(
            double_block(&hex!("e568f68194cf76d6174d4cc04310a854")),
            hex!("cad1ed03299eedac2e9a99808621502f")
        );
    }

    #[test]
    fn test_cmac_nist_test_vectors_256() {
        let cmac = Cmac256::new(&NIST_KEY).unwrap();

        // Example 9: empty message
        assert_eq!(cmac.digest(b"").unwrap(), hex!("028962f61b7bf89efc6b551f4667d983"));
        // Example 10: one complete block
        assert_eq!(
            cmac.digest(&NIST_MSG[..16]).unwrap(),
            hex!("28a7023f452e8f82bd4bf28d8c37c35c")
        );
        // Example 11: 40 bytes, partial final block
        assert_eq!(
            cmac.digest(&NIST_MSG[..40]).unwrap(),
            hex!("aaf3d8f1de5640c232f5b169b9c911e6")
        );
        // Example 12: four complete blocks
        assert_eq!(cmac.digest(&NIST_MSG).unwrap(), hex!("e1992190549f6ed5696a2c056c315410"));
    }

    #[test]
    fn test_one_shot_matches_instance() {
        let tag = cmac_256(&NIST_KEY, &NIST_MSG[..40]).unwrap();
        assert_eq!(tag, hex!("aaf3d8f1de5640c232f5b169b9c911e6"));
        assert!(verify_cmac_256(&NIST_KEY, &NIST_MSG[..40], &tag));
    }

    #[test]
    fn test_cmac_256_invalid_key() {
        let result = cmac_256(&[0u8; 16], b"data");
        assert!(matches!(result, Err(Error::InvalidKeyLength { expected: 32, actual: 16 })));
        assert!(!verify_cmac_256(&[0u8; 16], b"data", &[0u8; 16]));
    }

    #[test]
    fn test_empty_differs_from_single_block() {
        let cmac = Cmac256::new(&[7u8; 32]).unwrap();
        let empty = cmac.digest(b"").unwrap();
        // The padded empty block equals this one-block message before masking.
        let mut padded = [0u8; 16];
        padded[0] = 0x80;
        assert_ne!(empty, cmac.digest(&padded).unwrap());
        assert_ne!(empty, cmac.digest(&[0u8; 16]).unwrap());
    }

    #[test]
    fn test_complete_block_shortcut_matches_digest() {
        let cmac = Cmac256::new(&NIST_KEY).unwrap();
        let block: Block = NIST_MSG[..16].try_into().unwrap();
        assert_eq!(cmac.digest_complete_block(&block), cmac.digest(&block).unwrap());
    }

    #[test]
    fn test_verify_rejects_modified_tag() {
        let cmac = Cmac256::new(&NIST_KEY).unwrap();
        let mut tag = cmac.digest(b"message").unwrap();
        assert!(cmac.verify(b"message", &tag));
        assert!(!cmac.verify(b"massage", &tag));
        assert!(!cmac.verify(b"message", &tag[..15]));

        tag[0] ^= 0x01;
        assert!(!cmac.verify(b"message", &tag));
    }

    #[test]
    fn test_block_boundaries() {
        let cmac = Cmac256::new(&[0x42u8; 32]).unwrap();
        let data = [0xa5u8; 49];
        let tags: Vec<Block> =
            (0..=data.len()).map(|n| cmac.digest(&data[..n]).unwrap()).collect();
        for (i, a) in tags.iter().enumerate() {
            for b in tags.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_partial_final_block_padding() {
        // 15 message bytes leave room for exactly the 0x80 marker.
        let cmac = Cmac256::new(&NIST_KEY).unwrap();
        let fifteen = cmac.digest(&NIST_MSG[..15]).unwrap();
        let mut manual = [0u8; 16];
        manual[..15].copy_from_slice(&NIST_MSG[..15]);
        manual[15] = 0x80;
        xor_block(&mut manual, &cmac.subkeys.k2);
        assert_eq!(fifteen, cmac.encrypt_block(&manual));
    }

    #[test]
    fn test_to_block_rejects_wrong_length() {
        assert_eq!(to_block(&[0u8; 15]), Err(Error::LengthMismatch { left: 15, right: 16 }));
        assert_eq!(to_block(&[0u8; 17]), Err(Error::LengthMismatch { left: 17, right: 16 }));
        assert_eq!(to_block(&[0x5au8; 16]).unwrap(), [0x5au8; 16]);
    }

    #[test]
    fn test_debug_redacts_subkeys() {
        let cmac = Cmac256::new(&NIST_KEY).unwrap();
        let rendered = format!("{cmac:?}");
        assert!(rendered.contains("REDACTED"));
    }
}
