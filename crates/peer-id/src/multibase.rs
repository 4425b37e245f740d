//! Multibase encoding/decoding utilities
//!
//! Multibase is a protocol for self-describing base encodings.
//! The first character indicates the encoding used. CID-form peer IDs are
//! always base32 (lower case, no padding, prefix 'b'). Legacy peer IDs are bare
//! base58btc with no multibase prefix at all.
//!
//! See: <https://github.com/multiformats/multibase>

use multibase::Base;

use crate::error::DecodeError;

/// Multibase prefix for base32 (RFC 4648, lower case, no padding)
pub const BASE32_PREFIX: char = 'b';

/// Encode bytes as base32 with multibase prefix 'b'
pub fn encode_base32(bytes: &[u8]) -> String {
    multibase::encode(Base::Base32Lower, bytes)
}

/// Decode a base32 multibase string (must start with 'b')
///
/// Returns the decoded bytes without the prefix.
pub fn decode_base32(s: &str) -> Result<Vec<u8>, DecodeError> {
    let (base, bytes) = multibase::decode(s).map_err(|e| DecodeError::Multibase(e.to_string()))?;

    if base != Base::Base32Lower {
        return Err(DecodeError::UnsupportedBase(base.code()));
    }

    Ok(bytes)
}

/// Encode bytes as bare base58btc (Bitcoin alphabet, no prefix)
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode bare base58btc (Bitcoin alphabet, no prefix)
pub fn decode_base58(s: &str) -> Result<Vec<u8>, DecodeError> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| DecodeError::Base58(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base32() {
        // "b" + base32("hello")
        assert_eq!(encode_base32(b"hello"), "bnbswy3dp");
    }

    #[test]
    fn test_decode_base32() {
        assert_eq!(decode_base32("bnbswy3dp").unwrap(), b"hello");
    }

    #[test]
    fn test_base58btc_multibase_rejected() {
        // 'z' is a valid multibase prefix but not the one peer ID CIDs use
        assert_eq!(
            decode_base32("zCn8eVZg").unwrap_err(),
            DecodeError::UnsupportedBase('z')
        );
    }

    #[test]
    fn test_invalid_multibase_prefix() {
        assert!(matches!(
            decode_base32("!nbswy3dp").unwrap_err(),
            DecodeError::Multibase(_)
        ));
    }

    #[test]
    fn test_base58() {
        assert_eq!(encode_base58(b"hello"), "Cn8eVZg");
        assert_eq!(decode_base58("Cn8eVZg").unwrap(), b"hello");
    }

    #[test]
    fn test_invalid_base58() {
        // '0', 'O', 'I', 'l' are not valid base58 characters
        assert!(matches!(
            decode_base58("0OIl").unwrap_err(),
            DecodeError::Base58(_)
        ));
    }
}
