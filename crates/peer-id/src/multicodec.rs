//! Multicodec encoding/decoding
//!
//! Multicodec is a self-describing format that prefixes data with a varint
//! indicating the type of data that follows. Peer IDs use it twice inside a
//! CID: once for the CID version and once for the content type.
//!
//! See: <https://github.com/multiformats/multicodec>

use std::{fmt, sync::LazyLock};

use crate::error::MultihashError;

// ****************************************************************************
// Codec Magic Numbers
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const CIDV1: u64 = 0x01;
pub const RAW: u64 = 0x55;
pub const DAG_PB: u64 = 0x70;
pub const LIBP2P_KEY: u64 = 0x72;

/// Content types a CID may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Raw,
    DagPb,
    Libp2pKey,
    Unknown(u64),
}

impl ContentType {
    /// Convert a raw codec value to a ContentType
    pub fn from_u64(value: u64) -> Self {
        match value {
            RAW => ContentType::Raw,
            DAG_PB => ContentType::DagPb,
            LIBP2P_KEY => ContentType::Libp2pKey,
            other => ContentType::Unknown(other),
        }
    }

    /// Convert to raw u64 value
    pub fn to_u64(self) -> u64 {
        match self {
            ContentType::Raw => RAW,
            ContentType::DagPb => DAG_PB,
            ContentType::Libp2pKey => LIBP2P_KEY,
            ContentType::Unknown(v) => v,
        }
    }

    /// Registered multicodec name
    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Raw => "raw",
            ContentType::DagPb => "dag-pb",
            ContentType::Libp2pKey => "libp2p-key",
            ContentType::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.name(), self.to_u64())
    }
}

/// `<cidv1><libp2p-key>`, prepended to every CID-form peer ID
pub(crate) static CID_PREFIX: LazyLock<Vec<u8>> =
    LazyLock::new(|| cid_prefix(ContentType::Libp2pKey));

/// Build the CIDv1 prefix for a content type
pub fn cid_prefix(content_type: ContentType) -> Vec<u8> {
    let mut prefix = encode_varint(CIDV1);
    prefix.extend(encode_varint(content_type.to_u64()));
    prefix
}

/// Encode a value as an unsigned varint
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut buffer = unsigned_varint::encode::u64_buffer();
    unsigned_varint::encode::u64(value, &mut buffer).to_vec()
}

/// Separates a leading varint from the bytes that follow it
pub fn split_varint(bytes: &[u8]) -> Result<(u64, &[u8]), MultihashError> {
    unsigned_varint::decode::u64(bytes).map_err(|e| MultihashError::Varint(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libp2p_key_prefix() {
        assert_eq!(CID_PREFIX.as_slice(), &[0x01, 0x72]);
        assert_eq!(cid_prefix(ContentType::Raw), vec![0x01, 0x55]);
    }

    #[test]
    fn test_multi_byte_varint() {
        let encoded = encode_varint(0xb220);
        assert_eq!(encoded, vec![0xa0, 0xe4, 0x02]);

        let mut bytes = encoded.clone();
        bytes.push(0xff);
        let (value, rest) = split_varint(&bytes).unwrap();
        assert_eq!(value, 0xb220);
        assert_eq!(rest, &[0xff]);
    }

    #[test]
    fn test_truncated_varint() {
        assert!(matches!(
            split_varint(&[0x80]),
            Err(MultihashError::Varint(_))
        ));
    }

    #[test]
    fn test_content_type_roundtrip() {
        for content_type in [ContentType::Raw, ContentType::DagPb, ContentType::Libp2pKey] {
            assert_eq!(ContentType::from_u64(content_type.to_u64()), content_type);
        }
        assert_eq!(ContentType::from_u64(0x99), ContentType::Unknown(0x99));
        assert_eq!(ContentType::Raw.to_string(), "raw (0x55)");
        assert_eq!(ContentType::Unknown(0x99).to_string(), "unknown (0x99)");
    }
}
