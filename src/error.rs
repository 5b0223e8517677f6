//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, AesEnvelopeError>`](AesEnvelopeError).
//!
//! The first six variants are integrity and configuration outcomes that callers are
//! expected to match on. They are never folded into one another: a MAC failure is
//! always reported as [`AesEnvelopeError::MacMismatch`], never as a malformed envelope
//! or a deserialization problem.

use thiserror::Error;

/// The error type for all envelope operations.
#[derive(Error, Debug)]
pub enum AesEnvelopeError {
    /// The secret does not satisfy the format required by the key scheme.
    ///
    /// Only [`KeyScheme::RawHex`](crate::KeyScheme::RawHex) validates its input:
    /// the secret must be exactly 64 hexadecimal characters.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// An unsupported AES size or mode of operation was requested.
    #[error("invalid cipher configuration: {0}")]
    InvalidCipherConfiguration(String),

    /// The envelope has the wrong number of `|`-separated fields, or a field is not
    /// valid base64.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The decoded IV length differs from what the configured mode requires.
    #[error("IV size mismatch: expected {expected} bytes, got {actual}")]
    IvSizeMismatch { expected: usize, actual: usize },

    /// The recomputed HMAC does not match the transmitted one.
    ///
    /// Either the envelope was tampered with or it was sealed under a different key.
    #[error("MAC mismatch: envelope altered or sealed under a different key")]
    MacMismatch,

    /// The verified plaintext does not deserialize into the requested type.
    #[error("deserialization failure: {0}")]
    DeserializationFailure(String),

    /// The value could not be serialized before encryption.
    #[error("serialization failure: {0}")]
    Serialization(String),

    /// The cipher backend rejected its input (key length, IV length, block alignment,
    /// padding).
    #[error("cipher error: {0}")]
    Cipher(String),

    /// The operating system random source failed.
    #[error("random source error: {0}")]
    Rng(String),
}

impl AesEnvelopeError {
    /// `true` for the outcomes that indicate a forged, corrupted or foreign envelope.
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedEnvelope(_) | Self::IvSizeMismatch { .. } | Self::MacMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        let err = AesEnvelopeError::IvSizeMismatch {
            expected: 16,
            actual: 17,
        };
        assert_eq!(
            err.to_string(),
            "IV size mismatch: expected 16 bytes, got 17"
        );
        assert!(AesEnvelopeError::MacMismatch
            .to_string()
            .starts_with("MAC mismatch"));
    }

    #[test]
    fn integrity_classification() {
        assert!(AesEnvelopeError::MacMismatch.is_integrity_failure());
        assert!(AesEnvelopeError::MalformedEnvelope("x".into()).is_integrity_failure());
        assert!(!AesEnvelopeError::InvalidKey("x".into()).is_integrity_failure());
        assert!(!AesEnvelopeError::DeserializationFailure("x".into()).is_integrity_failure());
    }
}
