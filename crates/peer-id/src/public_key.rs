//! Serialized public keys
//!
//! Key types, their parsing and their wire format live outside this crate. A
//! peer ID only needs the canonical serialized bytes of the key (for libp2p,
//! the protobuf `PublicKey { Type, Data }` message).

use std::borrow::Cow;

/// A public key that can produce its canonical serialized form
pub trait EncodedPublicKey {
    fn encoded_bytes(&self) -> Cow<'_, [u8]>;
}

impl EncodedPublicKey for [u8] {
    fn encoded_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> EncodedPublicKey for [u8; N] {
    fn encoded_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl EncodedPublicKey for Vec<u8> {
    fn encoded_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: EncodedPublicKey + ?Sized> EncodedPublicKey for &T {
    fn encoded_bytes(&self) -> Cow<'_, [u8]> {
        (**self).encoded_bytes()
    }
}
