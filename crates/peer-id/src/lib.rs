//! Peer identity for libp2p-style networks
//!
//! This crate derives a peer ID from a serialized public key and converts it
//! between its raw multihash bytes and its two string forms:
//! - CID form (canonical): multibase base32 CIDv1 with the `libp2p-key` content type
//! - Legacy form: bare base58btc multihash (`Qm...`, `12D3KooW...`)
//!
//! Cross-implementation interoperability is the point: the derivation rule and
//! both string forms match go-libp2p, rust-libp2p and js-libp2p.

pub mod error;
pub mod multibase;
pub mod multicodec;
pub mod multihash;
pub mod peer_id;
pub mod public_key;

pub use crate::error::{DecodeError, MultihashError, PeerIdError, Result};
pub use crate::multihash::HashCode;
pub use crate::peer_id::{MAX_INLINE_KEY_LENGTH, PeerId, PeerIdFormat, validate_string};
pub use crate::public_key::EncodedPublicKey;

/// Derive a peer ID from a serialized public key
pub fn create_peer_id<K: EncodedPublicKey + ?Sized>(public_key: &K) -> PeerId {
    PeerId::from_public_key(public_key)
}

/// Check raw bytes form a valid peer ID
pub fn validate_peer_id(bytes: &[u8]) -> Result<()> {
    PeerId::from_bytes(bytes).map(|_| ())
}

pub fn to_string_cid(peer_id: &PeerId) -> String {
    peer_id.to_cid_string()
}

pub fn from_string_cid(s: &str) -> Result<PeerId> {
    PeerId::from_cid_string(s)
}

pub fn to_string_legacy(peer_id: &PeerId) -> String {
    peer_id.to_legacy_string()
}

pub fn from_string_legacy(s: &str) -> Result<PeerId> {
    PeerId::from_legacy_string(s)
}

/// Canonical (CID) string form
pub fn peer_id_to_string(peer_id: &PeerId) -> String {
    peer_id.to_cid_string()
}

/// Parse either string form, see [`PeerId::from_string`]
pub fn peer_id_from_string(s: &str) -> Result<PeerId> {
    PeerId::from_string(s)
}
