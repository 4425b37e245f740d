/*!
 * Peer identity derived from a public key
 *
 * A peer ID is a multihash of the serialized public key: short keys are
 * embedded verbatim under the identity function, longer keys are replaced by
 * their sha2-256 digest. It has two textual forms:
 *
 * - CID form (canonical): `base32(<cidv1><libp2p-key><multihash>)`, e.g. `bafzaa...`
 * - Legacy form: bare base58btc of the multihash, e.g. `Qm...` or `12D3KooW...`
 */

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    error::{DecodeError, MultihashError, PeerIdError, Result},
    multibase::{decode_base32, decode_base58, encode_base32, encode_base58},
    multicodec::{CID_PREFIX, CIDV1, ContentType, split_varint},
    multihash::{self as mh, HashCode},
    public_key::EncodedPublicKey,
};

/// Serialized keys up to this many bytes are embedded rather than hashed
pub const MAX_INLINE_KEY_LENGTH: usize = 42;

/// Which textual form to render a peer ID in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerIdFormat {
    /// multibase base32 CIDv1 with the libp2p-key content type
    #[default]
    Cid,
    /// bare base58btc multihash
    Legacy,
}

/// A validated peer identity
///
/// Every value has passed the multihash structural check: the only ways to
/// obtain one are deriving it from a public key or decoding bytes/strings that
/// validate.
///
/// # Examples
///
/// ```
/// use peer_id::PeerId;
///
/// let peer_id: PeerId = "12D3KooWBtg3aaRMjxwedh83aGiUkwSxDwUZkzuJcfaqUmo7R3pq".parse().unwrap();
/// assert!(peer_id.to_string().starts_with("bafzaa"));
/// assert_eq!(peer_id.to_string().parse::<PeerId>().unwrap(), peer_id);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PeerId {
    code: HashCode,
    /// Offset of the payload within `bytes`
    digest_start: usize,
    /// The complete multihash
    bytes: Box<[u8]>,
}

// Construction
impl PeerId {
    /// Derive the peer ID of a public key
    pub fn from_public_key<K: EncodedPublicKey + ?Sized>(key: &K) -> Self {
        let encoded = key.encoded_bytes();

        let digest;
        let (code, payload): (HashCode, &[u8]) = if encoded.len() > MAX_INLINE_KEY_LENGTH {
            debug!(key_len = encoded.len(), "hashing public key with sha2-256");
            digest = Sha256::digest(&encoded);
            (HashCode::SHA2_256, digest.as_slice())
        } else {
            debug!(key_len = encoded.len(), "embedding public key with identity");
            (HashCode::IDENTITY, &*encoded)
        };

        let bytes = mh::encode(code, payload);
        PeerId {
            code,
            digest_start: bytes.len() - payload.len(),
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Validate raw peer ID bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_multihash_bytes(bytes)?)
    }

    fn from_multihash_bytes(bytes: &[u8]) -> std::result::Result<Self, MultihashError> {
        let (code, digest) = mh::decode(bytes)?;

        Ok(PeerId {
            code,
            digest_start: bytes.len() - digest.len(),
            bytes: bytes.into(),
        })
    }

    /// Decode the CID form (`b...`)
    ///
    /// The CID must be version 1 with the libp2p-key content type.
    pub fn from_cid_string(s: &str) -> Result<Self> {
        let bytes = decode_base32(s).map_err(PeerIdError::InvalidCid)?;

        let (version, rest) =
            split_varint(&bytes).map_err(|e| PeerIdError::InvalidCid(e.into()))?;
        let (codec, multihash) =
            split_varint(rest).map_err(|e| PeerIdError::InvalidCid(e.into()))?;

        let content_type = ContentType::from_u64(codec);
        if version != CIDV1 || content_type != ContentType::Libp2pKey {
            return Err(PeerIdError::InvalidCid(DecodeError::UnexpectedPrefix {
                version,
                content_type,
            }));
        }

        Self::from_multihash_bytes(multihash).map_err(|e| PeerIdError::InvalidCid(e.into()))
    }

    /// Decode the legacy base58btc form (`Qm...`, `1...`)
    pub fn from_legacy_string(s: &str) -> Result<Self> {
        let bytes = decode_base58(s).map_err(PeerIdError::InvalidLegacyString)?;

        Self::from_multihash_bytes(&bytes).map_err(|e| PeerIdError::InvalidLegacyString(e.into()))
    }

    /// Decode either string form
    ///
    /// Strings starting with "Qm" or "1" are treated as legacy base58btc,
    /// everything else as a multibase CID.
    pub fn from_string(s: &str) -> Result<Self> {
        let result = if s.starts_with("Qm") || s.starts_with('1') {
            debug!(peer_id = s, "decoding legacy base58btc peer ID");
            Self::from_legacy_string(s)
        } else {
            debug!(peer_id = s, "decoding CID peer ID");
            Self::from_cid_string(s)
        };

        result.map_err(|e| {
            debug!(peer_id = s, error = %e, "rejected peer ID string");
            PeerIdError::InvalidIdentifierString(Box::new(e))
        })
    }
}

// Encoding
impl PeerId {
    /// The canonical CID form
    pub fn to_cid_string(&self) -> String {
        let mut bytes = CID_PREFIX.to_vec();
        bytes.extend_from_slice(&self.bytes);
        encode_base32(&bytes)
    }

    pub fn to_legacy_string(&self) -> String {
        encode_base58(&self.bytes)
    }

    pub fn to_string_with(&self, format: PeerIdFormat) -> String {
        match format {
            PeerIdFormat::Cid => self.to_cid_string(),
            PeerIdFormat::Legacy => self.to_legacy_string(),
        }
    }

    /// The multihash bytes of this peer ID
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Accessors
impl PeerId {
    /// Hash function the payload was produced with
    pub fn hash_code(&self) -> HashCode {
        self.code
    }

    /// The multihash payload (a digest, or the key itself for identity)
    pub fn digest(&self) -> &[u8] {
        &self.bytes[self.digest_start..]
    }

    /// The serialized public key, when it is embedded rather than hashed
    pub fn public_key_bytes(&self) -> Option<&[u8]> {
        (self.code == HashCode::IDENTITY).then(|| self.digest())
    }
}

/// Check a string is a valid peer ID in either form
pub fn validate_string(s: &str) -> Result<()> {
    PeerId::from_string(s).map(|_| ())
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cid_string())
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PeerId")
            .field(&self.to_legacy_string())
            .finish()
    }
}

impl FromStr for PeerId {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self> {
        PeerId::from_string(s)
    }
}

impl TryFrom<&[u8]> for PeerId {
    type Error = PeerIdError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        PeerId::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for PeerId {
    type Error = PeerIdError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        PeerId::from_bytes(&bytes)
    }
}

impl From<PeerId> for Vec<u8> {
    fn from(peer_id: PeerId) -> Self {
        peer_id.bytes.into_vec()
    }
}

impl AsRef<[u8]> for PeerId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Serialize for PeerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
