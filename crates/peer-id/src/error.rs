//! Peer ID errors

use thiserror::Error;

use crate::multicodec::ContentType;

/// Structural failures of the tagged-length-value (multihash) encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultihashError {
    #[error("multihash too short: must be at least 2 bytes, got {0}")]
    TooShort(usize),

    #[error("multihash varint decode: {0}")]
    Varint(String),

    #[error("multihash unknown function code: 0x{0:x}")]
    UnknownCode(u64),

    #[error("multihash length mismatch: declared {declared} bytes, found {actual}")]
    LengthMismatch { declared: u64, actual: usize },
}

/// Failures while turning a peer ID string back into bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid multibase encoding: {0}")]
    Multibase(String),

    #[error("Unsupported multibase prefix: expected 'b' (base32), got '{0}'")]
    UnsupportedBase(char),

    #[error("Invalid base58 encoding: {0}")]
    Base58(String),

    #[error("Unexpected CID prefix: version {version}, content type {content_type}")]
    UnexpectedPrefix {
        version: u64,
        content_type: ContentType,
    },

    #[error(transparent)]
    Multihash(#[from] MultihashError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeerIdError {
    #[error("Malformed peer ID: {0}")]
    MalformedIdentifier(#[from] MultihashError),

    #[error("Invalid CID: {0}")]
    InvalidCid(DecodeError),

    #[error("Invalid legacy peer ID string: {0}")]
    InvalidLegacyString(DecodeError),

    #[error("Invalid peer ID string: {0}")]
    InvalidIdentifierString(Box<PeerIdError>),
}

impl PeerIdError {
    /// The structural failure at the root of this error, if there is one
    pub fn multihash_error(&self) -> Option<&MultihashError> {
        match self {
            PeerIdError::MalformedIdentifier(e) => Some(e),
            PeerIdError::InvalidCid(DecodeError::Multihash(e))
            | PeerIdError::InvalidLegacyString(DecodeError::Multihash(e)) => Some(e),
            PeerIdError::InvalidCid(_) | PeerIdError::InvalidLegacyString(_) => None,
            PeerIdError::InvalidIdentifierString(inner) => inner.multihash_error(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PeerIdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_message_names_code() {
        let err = PeerIdError::InvalidIdentifierString(Box::new(PeerIdError::InvalidLegacyString(
            DecodeError::Multihash(MultihashError::UnknownCode(0x50)),
        )));
        assert!(err.to_string().contains("unknown function code: 0x50"));
        assert_eq!(
            err.multihash_error(),
            Some(&MultihashError::UnknownCode(0x50))
        );
    }

    #[test]
    fn prefix_errors_have_no_multihash_cause() {
        let err = PeerIdError::InvalidCid(DecodeError::UnexpectedPrefix {
            version: 1,
            content_type: ContentType::Raw,
        });
        assert_eq!(err.multihash_error(), None);
        assert!(err.to_string().contains("raw (0x55)"));
    }
}
