//! Multihash encoding and validation
//!
//! A multihash is `<function code varint><digest length varint><digest>`.
//! Peer IDs are multihashes whose function is either sha2-256 or identity.
//!
//! See: <https://github.com/multiformats/multihash>

use std::fmt;

use crate::error::MultihashError;
use crate::multicodec::{encode_varint, split_varint};

// ****************************************************************************
// Hash function codes
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const IDENTITY: u64 = 0x00;
pub const SHA1: u64 = 0x11;
pub const SHA2_256: u64 = 0x12;
pub const SHA2_512: u64 = 0x13;
pub const SHA3_512: u64 = 0x14;
pub const SHA3_384: u64 = 0x15;
pub const SHA3_256: u64 = 0x16;
pub const SHA3_224: u64 = 0x17;
pub const SHAKE_128: u64 = 0x18;
pub const SHAKE_256: u64 = 0x19;
pub const KECCAK_224: u64 = 0x1a;
pub const KECCAK_256: u64 = 0x1b;
pub const KECCAK_384: u64 = 0x1c;
pub const KECCAK_512: u64 = 0x1d;
pub const BLAKE3: u64 = 0x1e;
pub const SHA2_384: u64 = 0x20;
pub const MURMUR3_X64_64: u64 = 0x22;
pub const MURMUR3_32: u64 = 0x23;
pub const DBL_SHA2_256: u64 = 0x56;
pub const MD4: u64 = 0xd4;
pub const MD5: u64 = 0xd5;
pub const BMT: u64 = 0xd6;
pub const FR32_SHA256_TRUNC254_PADBINTREE: u64 = 0x1011;
pub const SHA2_256_TRUNC254_PADDED: u64 = 0x1012;
pub const SHA2_224: u64 = 0x1013;
pub const SHA2_512_224: u64 = 0x1014;
pub const SHA2_512_256: u64 = 0x1015;
pub const MURMUR3_X64_128: u64 = 0x1022;
pub const RIPEMD_128: u64 = 0x1052;
pub const RIPEMD_160: u64 = 0x1053;
pub const RIPEMD_256: u64 = 0x1054;
pub const RIPEMD_320: u64 = 0x1055;
pub const X11: u64 = 0x1100;
pub const KANGAROOTWELVE: u64 = 0x1d01;
pub const SM3_256: u64 = 0x534d;
pub const SHA256A: u64 = 0x7012;
pub const POSEIDON_BLS12_381_A2_FC1: u64 = 0xb401;
pub const POSEIDON_BLS12_381_A2_FC1_SC: u64 = 0xb402;
pub const SSZ_SHA2_256_BMT: u64 = 0xb502;

// Reserved for application-specific use, accepted without interpretation
const APPLICATION_MIN: u64 = 0x01;
const APPLICATION_MAX: u64 = 0x0f;

// Variable-output families, one code per 8 bits of output starting at 8
const BLAKE2B_MIN: u64 = 0xb201;
const BLAKE2B_MAX: u64 = 0xb240;
const BLAKE2S_MIN: u64 = 0xb241;
const BLAKE2S_MAX: u64 = 0xb260;
const SKEIN256_MIN: u64 = 0xb301;
const SKEIN256_MAX: u64 = 0xb320;
const SKEIN512_MIN: u64 = 0xb321;
const SKEIN512_MAX: u64 = 0xb360;
const SKEIN1024_MIN: u64 = 0xb361;
const SKEIN1024_MAX: u64 = 0xb3e0;

enum Entry {
    Fixed(&'static str),
    Sized { family: &'static str, bits: u64 },
    Application,
}

fn sized(family: &'static str, value: u64, min: u64) -> Entry {
    Entry::Sized {
        family,
        bits: (value - min + 1) * 8,
    }
}

fn lookup(value: u64) -> Option<Entry> {
    let entry = match value {
        IDENTITY => Entry::Fixed("identity"),
        APPLICATION_MIN..=APPLICATION_MAX => Entry::Application,
        SHA1 => Entry::Fixed("sha1"),
        SHA2_256 => Entry::Fixed("sha2-256"),
        SHA2_512 => Entry::Fixed("sha2-512"),
        SHA3_512 => Entry::Fixed("sha3-512"),
        SHA3_384 => Entry::Fixed("sha3-384"),
        SHA3_256 => Entry::Fixed("sha3-256"),
        SHA3_224 => Entry::Fixed("sha3-224"),
        SHAKE_128 => Entry::Fixed("shake-128"),
        SHAKE_256 => Entry::Fixed("shake-256"),
        KECCAK_224 => Entry::Fixed("keccak-224"),
        KECCAK_256 => Entry::Fixed("keccak-256"),
        KECCAK_384 => Entry::Fixed("keccak-384"),
        KECCAK_512 => Entry::Fixed("keccak-512"),
        BLAKE3 => Entry::Fixed("blake3"),
        SHA2_384 => Entry::Fixed("sha2-384"),
        MURMUR3_X64_64 => Entry::Fixed("murmur3-x64-64"),
        MURMUR3_32 => Entry::Fixed("murmur3-32"),
        DBL_SHA2_256 => Entry::Fixed("dbl-sha2-256"),
        MD4 => Entry::Fixed("md4"),
        MD5 => Entry::Fixed("md5"),
        BMT => Entry::Fixed("bmt"),
        FR32_SHA256_TRUNC254_PADBINTREE => Entry::Fixed("fr32-sha256-trunc254-padbintree"),
        SHA2_256_TRUNC254_PADDED => Entry::Fixed("sha2-256-trunc254-padded"),
        SHA2_224 => Entry::Fixed("sha2-224"),
        SHA2_512_224 => Entry::Fixed("sha2-512-224"),
        SHA2_512_256 => Entry::Fixed("sha2-512-256"),
        MURMUR3_X64_128 => Entry::Fixed("murmur3-x64-128"),
        RIPEMD_128 => Entry::Fixed("ripemd-128"),
        RIPEMD_160 => Entry::Fixed("ripemd-160"),
        RIPEMD_256 => Entry::Fixed("ripemd-256"),
        RIPEMD_320 => Entry::Fixed("ripemd-320"),
        X11 => Entry::Fixed("x11"),
        KANGAROOTWELVE => Entry::Fixed("kangarootwelve"),
        SM3_256 => Entry::Fixed("sm3-256"),
        SHA256A => Entry::Fixed("sha256a"),
        POSEIDON_BLS12_381_A2_FC1 => Entry::Fixed("poseidon-bls12_381-a2-fc1"),
        POSEIDON_BLS12_381_A2_FC1_SC => Entry::Fixed("poseidon-bls12_381-a2-fc1-sc"),
        SSZ_SHA2_256_BMT => Entry::Fixed("ssz-sha2-256-bmt"),
        BLAKE2B_MIN..=BLAKE2B_MAX => sized("blake2b", value, BLAKE2B_MIN),
        BLAKE2S_MIN..=BLAKE2S_MAX => sized("blake2s", value, BLAKE2S_MIN),
        SKEIN256_MIN..=SKEIN256_MAX => sized("skein256", value, SKEIN256_MIN),
        SKEIN512_MIN..=SKEIN512_MAX => sized("skein512", value, SKEIN512_MIN),
        SKEIN1024_MIN..=SKEIN1024_MAX => sized("skein1024", value, SKEIN1024_MIN),
        _ => return None,
    };
    Some(entry)
}

/// A hash function code present in the multihash registry
///
/// Only codes the registry recognizes can be held, so every value maps back
/// to a registered function (or an application-specific code).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashCode(u64);

impl HashCode {
    pub const IDENTITY: HashCode = HashCode(IDENTITY);
    pub const SHA2_256: HashCode = HashCode(SHA2_256);

    /// Look up a function code in the registry
    pub fn from_u64(value: u64) -> Option<Self> {
        lookup(value).map(|_| HashCode(value))
    }

    /// Convert to raw u64 value
    pub fn to_u64(self) -> u64 {
        self.0
    }

    /// True for the 0x01..=0x0f range reserved for applications
    pub fn is_application_specific(&self) -> bool {
        matches!(lookup(self.0), Some(Entry::Application))
    }
}

impl TryFrom<u64> for HashCode {
    type Error = MultihashError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        HashCode::from_u64(value).ok_or(MultihashError::UnknownCode(value))
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match lookup(self.0) {
            Some(Entry::Fixed(name)) => write!(f, "{name}"),
            Some(Entry::Sized { family, bits }) => write!(f, "{family}-{bits}"),
            Some(Entry::Application) | None => write!(f, "0x{:02x}", self.0),
        }
    }
}

impl fmt::Debug for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HashCode({self})")
    }
}

/// Wrap a payload as `<code><length><payload>`
pub fn encode(code: HashCode, payload: &[u8]) -> Vec<u8> {
    let encoded_code = encode_varint(code.to_u64());
    let encoded_len = encode_varint(payload.len() as u64);
    let mut result = Vec::with_capacity(encoded_code.len() + encoded_len.len() + payload.len());
    result.extend(encoded_code);
    result.extend(encoded_len);
    result.extend(payload);
    result
}

/// Check that `bytes` is a well-formed multihash and split it into its parts
///
/// The function code is checked before the length, so an unregistered code is
/// reported even when the length is also wrong.
pub fn decode(bytes: &[u8]) -> Result<(HashCode, &[u8]), MultihashError> {
    if bytes.len() < 2 {
        return Err(MultihashError::TooShort(bytes.len()));
    }

    let (code, rest) = split_varint(bytes)?;
    let code = HashCode::try_from(code)?;

    let (declared, digest) = split_varint(rest)?;
    if declared != digest.len() as u64 {
        return Err(MultihashError::LengthMismatch {
            declared,
            actual: digest.len(),
        });
    }

    Ok((code, digest))
}

/// Validate a multihash, discarding its parts
pub fn validate(bytes: &[u8]) -> Result<(), MultihashError> {
    decode(bytes).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sha2_256() {
        let digest = [0xabu8; 32];
        let encoded = encode(HashCode::SHA2_256, &digest);
        assert_eq!(&encoded[..2], &[0x12, 0x20]);
        assert_eq!(encoded.len(), 34);

        let (code, payload) = decode(&encoded).unwrap();
        assert_eq!(code, HashCode::SHA2_256);
        assert_eq!(payload, &digest);
    }

    #[test]
    fn test_unknown_code_checked_before_length() {
        let bytes = [0x50, 0x03, 0x31, 0xe1];
        assert_eq!(decode(&bytes), Err(MultihashError::UnknownCode(0x50)));
    }

    #[test]
    fn test_length_mismatch() {
        let mut bytes = encode(HashCode::SHA2_256, &[7u8; 32]);
        bytes.pop();
        assert_eq!(
            decode(&bytes),
            Err(MultihashError::LengthMismatch {
                declared: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(validate(&[]), Err(MultihashError::TooShort(0)));
        assert_eq!(validate(&[0x12]), Err(MultihashError::TooShort(1)));
    }

    #[test]
    fn test_empty_identity_is_valid() {
        let (code, payload) = decode(&[0x00, 0x00]).unwrap();
        assert_eq!(code, HashCode::IDENTITY);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_application_code_accepted() {
        let (code, payload) = decode(&[0x05, 0x02, 0xaa, 0xbb]).unwrap();
        assert_eq!(code.to_u64(), 0x05);
        assert!(code.is_application_specific());
        assert_eq!(payload, &[0xaa, 0xbb]);
        assert_eq!(code.to_string(), "0x05");
        assert!(!HashCode::SHA2_256.is_application_specific());
    }

    #[test]
    fn test_skein_code_accepted() {
        // skein256-256
        let bytes = encode(HashCode::from_u64(0xb320).unwrap(), &[3u8; 32]);
        assert_eq!(&bytes[..3], &[0xa0, 0xe6, 0x02]);
        let (code, payload) = decode(&bytes).unwrap();
        assert_eq!(code.to_string(), "skein256-256");
        assert_eq!(payload.len(), 32);

        assert_eq!(
            HashCode::from_u64(SKEIN1024_MAX).unwrap().to_string(),
            "skein1024-1024"
        );
    }

    #[test]
    fn test_variable_families() {
        assert_eq!(HashCode::from_u64(0xb220).unwrap().to_string(), "blake2b-256");
        assert_eq!(HashCode::from_u64(0xb240).unwrap().to_string(), "blake2b-512");
        assert_eq!(HashCode::from_u64(0xb241).unwrap().to_string(), "blake2s-8");
        assert_eq!(HashCode::from_u64(0xb260).unwrap().to_string(), "blake2s-256");
        assert_eq!(HashCode::from_u64(0xb321).unwrap().to_string(), "skein512-8");
    }

    #[test]
    fn test_registry_bounds() {
        for raw in [IDENTITY, SHA2_256, SHA3_256, MD5, BMT, RIPEMD_160, SM3_256, SSZ_SHA2_256_BMT] {
            let code = HashCode::from_u64(raw).unwrap();
            assert_eq!(code.to_u64(), raw);
        }
        assert_eq!(HashCode::from_u64(0x10), None);
        assert_eq!(HashCode::from_u64(0x50), None);
        assert_eq!(HashCode::from_u64(0xb200), None);
        assert_eq!(HashCode::from_u64(0xb3e1), None);
        assert_eq!(
            HashCode::try_from(0x50),
            Err(MultihashError::UnknownCode(0x50))
        );
    }
}
