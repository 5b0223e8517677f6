//! # Serialization Adapter
//!
//! Turns application values into bytes before sealing and back after verification.
//! The engine is generic over [`ValueCodec`]; [`JsonCodec`] is the default.

use crate::error::AesEnvelopeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Invertible value ⇄ bytes mapping: `deserialize(serialize(v)) == v` for the value
/// types a deployment uses.
pub trait ValueCodec: Send + Sync + fmt::Debug {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, AesEnvelopeError>;

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, AesEnvelopeError>;
}

/// JSON via `serde_json`, with exact float round-tripping.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    #[inline]
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, AesEnvelopeError> {
        serde_json::to_vec(value).map_err(|e| AesEnvelopeError::Serialization(e.to_string()))
    }

    #[inline]
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, AesEnvelopeError> {
        serde_json::from_slice(bytes)
            .map_err(|e| AesEnvelopeError::DeserializationFailure(e.to_string()))
    }
}
