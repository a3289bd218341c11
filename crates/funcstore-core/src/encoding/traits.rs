//! Encoding and decoding traits for serialization.

use crate::CoreError;

/// A trait for types that can be encoded to bytes.
pub trait Encoder: Sized {
    /// Encode this value to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn encode(&self) -> Result<Vec<u8>, CoreError>;
}

/// A trait for types that can be decoded from bytes.
pub trait Decoder: Sized {
    /// Decode a value from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are malformed or do not describe a value
    /// of this type.
    fn decode(bytes: &[u8]) -> Result<Self, CoreError>;
}
