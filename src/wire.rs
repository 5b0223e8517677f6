//! # Wire Codec
//!
//! An envelope travels as standard-alphabet base64 fields joined by `|`:
//!
//! - encrypt-then-MAC: `base64(ciphertext)|base64(mac)|base64(iv)`
//! - MAC-then-encrypt: `base64(ciphertext ‖ mac encrypted together)|base64(iv)`
//!
//! Encoding is total. Decoding fails with [`AesEnvelopeError::MalformedEnvelope`] on a
//! wrong field count or on any field that is not canonical padded base64.

use crate::config::Composition;
use crate::consts::DELIMITER;
use crate::error::AesEnvelopeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// Decoded envelope fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    EncryptThenMac {
        ciphertext: Vec<u8>,
        mac: Vec<u8>,
        iv: Vec<u8>,
    },
    /// `ciphertext` decrypts to `plaintext ‖ mac`.
    MacThenEncrypt { ciphertext: Vec<u8>, iv: Vec<u8> },
}

impl Envelope {
    #[must_use]
    pub const fn composition(&self) -> Composition {
        match self {
            Self::EncryptThenMac { .. } => Composition::EncryptThenMac,
            Self::MacThenEncrypt { .. } => Composition::MacThenEncrypt,
        }
    }

    #[must_use]
    pub fn iv(&self) -> &[u8] {
        match self {
            Self::EncryptThenMac { iv, .. } | Self::MacThenEncrypt { iv, .. } => iv,
        }
    }

    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        match self {
            Self::EncryptThenMac { ciphertext, .. } | Self::MacThenEncrypt { ciphertext, .. } => {
                ciphertext
            }
        }
    }

    /// Wire string in fixed field order.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::EncryptThenMac {
                ciphertext,
                mac,
                iv,
            } => encode_fields(&[ciphertext.as_slice(), mac.as_slice(), iv.as_slice()]),
            Self::MacThenEncrypt { ciphertext, iv } => {
                encode_fields(&[ciphertext.as_slice(), iv.as_slice()])
            }
        }
    }

    /// Parse a wire string laid out for `composition`.
    pub fn decode(input: &str, composition: Composition) -> Result<Self, AesEnvelopeError> {
        let mut fields = decode_fields(input, composition.arity())?.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Ok(match composition {
            Composition::EncryptThenMac => Self::EncryptThenMac {
                ciphertext: next(),
                mac: next(),
                iv: next(),
            },
            Composition::MacThenEncrypt => Self::MacThenEncrypt {
                ciphertext: next(),
                iv: next(),
            },
        })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// `true` if `input` has the shape of an envelope (contains the delimiter).
///
/// Strings without it are plaintext passthrough on decryption.
#[inline]
#[must_use]
pub fn is_sealed(input: &str) -> bool {
    input.contains(DELIMITER)
}

/// Base64-encode each field and join with `|`.
#[must_use]
pub fn encode_fields(fields: &[&[u8]]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        STANDARD.encode_string(field, &mut out);
    }
    out
}

/// Split on `|`, require exactly `arity` fields, base64-decode each.
pub fn decode_fields(input: &str, arity: usize) -> Result<Vec<Vec<u8>>, AesEnvelopeError> {
    let parts: Vec<&str> = input.split(DELIMITER).collect();
    if parts.len() != arity {
        return Err(AesEnvelopeError::MalformedEnvelope(format!(
            "expected {arity} fields, found {}",
            parts.len()
        )));
    }

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            STANDARD.decode(part).map_err(|e| {
                AesEnvelopeError::MalformedEnvelope(format!("field {i} is not valid base64: {e}"))
            })
        })
        .collect()
}
