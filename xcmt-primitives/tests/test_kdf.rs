#![deny(unsafe_code)]
// Test files use unwrap() for simplicity - test failures will show clear panics
#![allow(clippy::unwrap_used)]
// Test files use indexing for test vector access
#![allow(clippy::indexing_slicing)]

//! Known-answer and cross-check tests for the key derivation functions
//!
//! - HKDF-SHA256 (RFC 5869 Appendix A)
//! - PBKDF2-HMAC-SHA256 (RFC 6070-style SHA-256 vectors)

use hex_literal::hex;
use xcmt_primitives::kdf::*;
use xcmt_primitives::mac::{HmacSha256, HmacSha512};
use xcmt_primitives::Error;

mod hkdf_tests {
    use super::*;

    /// RFC 5869 Test Case 2: long inputs, output spans three HMAC blocks
    #[test]
    fn test_rfc5869_test_case_2() {
        let ikm: Vec<u8> = (0x00..=0x4f).collect();
        let salt: Vec<u8> = (0x60..=0xaf).collect();
        let info: Vec<u8> = (0xb0..=0xff).collect();
        let hkdf = HkdfSha256::new();

        let prk = hkdf.extract(&ikm, &salt).unwrap();
        assert_eq!(
            prk.as_bytes(),
            hex!("06a6b88c5853361a06104c9ceb35b45cef760014904671014a193f40c15fc244")
        );

        let okm = hkdf.derive(&ikm, &salt, &info, 82 * 8).unwrap();
        assert_eq!(
            okm.as_bytes(),
            hex!(
                "b11e398dc80327a1c8e7f78c596a49344f012eda2d4efad8a050cc4c19afa97c"
                "59045a99cac7827271cb41c65e590e09da3275600c2f09b8367793a9aca3db71"
                "cc30c58179ec3e87c14c01d5c1f3434f1d87"
            )
        );
    }

    /// Expand is HMAC chained over `T(i-1) || info || i`
    #[test]
    fn test_expand_matches_manual_chain() {
        let hmac = HmacSha256::new();
        let prk = [0x42u8; 32];
        let info = b"context";

        let mut t1_input = info.to_vec();
        t1_input.push(1);
        let t1 = hmac.sign(&prk, &t1_input).unwrap();

        let mut t2_input = t1.clone();
        t2_input.extend_from_slice(info);
        t2_input.push(2);
        let t2 = hmac.sign(&prk, &t2_input).unwrap();

        let okm = HkdfSha256::new().expand(&prk, info, 48 * 8).unwrap();
        assert_eq!(&okm.as_bytes()[..32], t1.as_slice());
        assert_eq!(&okm.as_bytes()[32..], &t2[..16]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(hkdf_sha256(b"k", b"s", b"i", 0), Err(Error::InvalidParameter(_))));
        assert!(matches!(hkdf_sha256(b"k", b"s", b"i", 7), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            hkdf_sha256(b"k", b"s", b"i", 255 * 256 + 8),
            Err(Error::InvalidParameter(_))
        ));
    }
}

mod pbkdf2_tests {
    use super::*;

    /// RFC 6070 Test Vector 2 adapted to HMAC-SHA256
    #[test]
    fn test_pbkdf2_sha256_4096_iterations() {
        let key = pbkdf2_hmac_sha256(b"password", b"salt", 4096, 256).unwrap();
        assert_eq!(
            key.as_bytes(),
            hex!("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
        );
    }

    /// RFC 6070 Test Vector 6 adapted to HMAC-SHA256: embedded NUL bytes
    #[test]
    fn test_pbkdf2_sha256_embedded_nul() {
        let key = pbkdf2_hmac_sha256(b"pass\0word", b"sa\0lt", 4096, 128).unwrap();
        assert_eq!(key.as_bytes(), hex!("89b69d0516f829893c696226650a8687"));
    }

    #[test]
    fn test_single_iteration_equals_hmac() {
        let hmac = HmacSha256::new();
        let mut input = b"salt".to_vec();
        input.extend_from_slice(&1u32.to_be_bytes());
        let expected = hmac.sign(b"password", &input).unwrap();

        let key = pbkdf2_hmac_sha256(b"password", b"salt", 1, 256).unwrap();
        assert_eq!(key.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_output_is_prefix_stable() {
        let pbkdf2 = Pbkdf2::new(HmacSha512::new()).with_parallel(true);
        let short = pbkdf2.digest(b"pw", b"salt", 5, 100 * 8).unwrap();
        let long = pbkdf2.digest(b"pw", b"salt", 5, 300 * 8).unwrap();
        assert_eq!(short.as_bytes(), &long.as_bytes()[..100]);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            pbkdf2_hmac_sha256(b"password", b"salt", 0, 256),
            Err(Error::InvalidParameter(_))
        ));
    }
}
