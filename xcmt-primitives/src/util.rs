#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Byte Utilities
//!
//! Fixed-length padding, XOR of equal-length buffers and constant-time
//! comparison shared by the MAC, KDF and AEAD constructions.

use crate::error::{Error, Result};
use subtle::ConstantTimeEq;

/// Return a new `len`-byte buffer holding `buf` followed by `fill` bytes.
///
/// # Errors
/// Returns `InvalidParameter` if `buf` is longer than `len`.
pub fn pad(buf: &[u8], len: usize, fill: u8) -> Result<Vec<u8>> {
    if buf.len() > len {
        return Err(Error::InvalidParameter(format!(
            "cannot pad {} bytes down to {} bytes",
            buf.len(),
            len
        )));
    }

    let mut out = vec![fill; len];
    if let Some(head) = out.get_mut(..buf.len()) {
        head.copy_from_slice(buf);
    }
    Ok(out)
}

/// XOR `b` into `a` and return `a` for chaining.
///
/// `a` must be a scratch buffer owned by the caller of this function; it is
/// never key material or caller plaintext.
///
/// # Errors
/// Returns `LengthMismatch` if the buffers differ in length.
pub fn xor<'a>(a: &'a mut [u8], b: &[u8]) -> Result<&'a mut [u8]> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch { left: a.len(), right: b.len() });
    }

    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x ^= y;
    }
    Ok(a)
}

/// XOR-reduce several equal-length buffers into a fresh buffer.
///
/// # Errors
/// Returns `LengthMismatch` if any buffer differs in length from `first`.
pub fn xor_all(first: &[u8], rest: &[&[u8]]) -> Result<Vec<u8>> {
    let mut acc = first.to_vec();
    for buf in rest {
        xor(&mut acc, buf)?;
    }
    Ok(acc)
}

/// XOR two 16-byte blocks in place.
#[inline(always)]
pub(crate) fn xor_block(a: &mut [u8; 16], b: &[u8; 16]) {
    for (a_byte, b_byte) in a.iter_mut().zip(b.iter()) {
        *a_byte ^= b_byte;
    }
}

/// Constant-time equality check
///
/// Buffers of different length compare unequal; only the length itself is
/// observable through timing.
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    let len_eq = a.len().ct_eq(&b.len());
    let mut result = len_eq;
    for (x, y) in a.iter().zip(b.iter()) {
        result &= x.ct_eq(y);
    }
    result.into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_pad_fills_tail() {
        let out = pad(b"abc", 6, 0).unwrap();
        assert_eq!(out, b"abc\0\0\0");

        let out = pad(b"", 3, 0x36).unwrap();
        assert_eq!(out, [0x36, 0x36, 0x36]);
    }

    #[test]
    fn test_pad_rejects_oversized_input() {
        assert!(matches!(pad(b"abcdef", 4, 0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_xor_in_place_and_chained() {
        let mut a = [0x0fu8, 0xf0];
        let out = xor(&mut a, &[0xff, 0xff]).unwrap();
        let out = xor(out, &[0x01, 0x01]).unwrap();
        assert_eq!(out, &[0xf1, 0x0e]);
        assert_eq!(a, [0xf1, 0x0e]);
    }

    #[test]
    fn test_xor_length_mismatch() {
        let mut a = [0u8; 3];
        let result = xor(&mut a, &[0u8; 4]);
        assert_eq!(result.unwrap_err(), Error::LengthMismatch { left: 3, right: 4 });
    }

    #[test]
    fn test_xor_all_leaves_inputs_untouched() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5, 6];
        let c = [7u8, 8, 9];
        let out = xor_all(&a, &[&b, &c]).unwrap();
        assert_eq!(out, vec![1 ^ 4 ^ 7, 2 ^ 5 ^ 8, 3 ^ 6 ^ 9]);
        assert_eq!(a, [1, 2, 3]);

        assert!(xor_all(&a, &[&[0u8; 2]]).is_err());
    }

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq(b"same", b"same"));
        assert!(!ct_eq(b"same", b"sane"));
        assert!(!ct_eq(b"short", b"shorter"));
        assert!(ct_eq(b"", b""));
    }
}
