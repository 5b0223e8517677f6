//! src/decryptor/open.rs
//! Envelope verification and decryption
//!
//! Order of checks: delimiter → field count → base64 → IV length → MAC → decrypt →
//! deserialize. Nothing decrypted is handed to the codec before the MAC has verified.

use crate::codec::ValueCodec;
use crate::consts::MAC_LEN;
use crate::crypto::hmac::verify_mac;
use crate::engine::EnvelopeCipher;
use crate::error::AesEnvelopeError;
use crate::wire::{is_sealed, Envelope};
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use tracing::{debug, warn};

/// Result of [`EnvelopeCipher::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened<'a> {
    /// Verified, decrypted plaintext bytes.
    Sealed(Vec<u8>),
    /// Input had no delimiter and was returned untouched, without any integrity check.
    Passthrough(&'a str),
}

impl<C: ValueCodec> EnvelopeCipher<C> {
    /// Verify, decrypt and deserialize an envelope.
    ///
    /// A string without `|` is not an envelope: it is handed back as a plain string
    /// value (so `String` and `serde_json::Value` targets receive it unchanged) and is
    /// **not** integrity-checked.
    ///
    /// # Errors
    ///
    /// - [`AesEnvelopeError::MalformedEnvelope`] - wrong field count or bad base64
    /// - [`AesEnvelopeError::IvSizeMismatch`] - IV length differs from the mode's
    /// - [`AesEnvelopeError::MacMismatch`] - tampered or foreign envelope
    /// - [`AesEnvelopeError::DeserializationFailure`] - verified bytes are not a `T`
    pub fn decrypt<T: DeserializeOwned>(&self, input: &str) -> Result<T, AesEnvelopeError> {
        match self.open(input)? {
            Opened::Sealed(plaintext) => self.codec.deserialize(&plaintext),
            Opened::Passthrough(raw) => {
                let de: StrDeserializer<'_, ValueError> = raw.into_deserializer();
                T::deserialize(de)
                    .map_err(|e| AesEnvelopeError::DeserializationFailure(e.to_string()))
            }
        }
    }

    /// Verify and decrypt an envelope into raw plaintext bytes.
    pub fn open<'a>(&self, input: &'a str) -> Result<Opened<'a>, AesEnvelopeError> {
        if !is_sealed(input) {
            debug!(len = input.len(), "no delimiter, passing input through");
            return Ok(Opened::Passthrough(input));
        }

        let envelope = Envelope::decode(input, self.composition).map_err(|e| {
            warn!(error = %e, "rejected envelope");
            e
        })?;
        self.unseal(&envelope).map(Opened::Sealed)
    }

    /// Verify and decrypt decoded envelope fields.
    pub fn unseal(&self, envelope: &Envelope) -> Result<Vec<u8>, AesEnvelopeError> {
        let result = self.unseal_inner(envelope);
        match &result {
            Ok(plaintext) => debug!(
                cipher = %self.config,
                composition = ?self.composition,
                backend = self.backend.name(),
                plaintext_len = plaintext.len(),
                "opened envelope"
            ),
            Err(e) => warn!(cipher = %self.config, error = %e, "rejected envelope"),
        }
        result
    }

    fn unseal_inner(&self, envelope: &Envelope) -> Result<Vec<u8>, AesEnvelopeError> {
        if envelope.composition() != self.composition {
            return Err(AesEnvelopeError::MalformedEnvelope(format!(
                "envelope is {:?}, cipher expects {:?}",
                envelope.composition(),
                self.composition
            )));
        }

        let iv = envelope.iv();
        let expected = self.backend.iv_size();
        if iv.len() != expected {
            return Err(AesEnvelopeError::IvSizeMismatch {
                expected,
                actual: iv.len(),
            });
        }

        let cipher_key = self.keys.cipher_key();
        let mac_key = self.keys.mac_key();

        match envelope {
            Envelope::EncryptThenMac {
                ciphertext, mac, ..
            } => {
                verify_mac(mac_key, &[iv, ciphertext.as_slice()], mac)?;
                self.backend.decrypt(cipher_key, ciphertext, iv)
            }
            Envelope::MacThenEncrypt { ciphertext, .. } => {
                // Padding and length failures here are indistinguishable from a bad MAC.
                let mut tagged = self
                    .backend
                    .decrypt(cipher_key, ciphertext, iv)
                    .map_err(|_| AesEnvelopeError::MacMismatch)?;
                if tagged.len() < MAC_LEN {
                    return Err(AesEnvelopeError::MacMismatch);
                }
                let tag = tagged.split_off(tagged.len() - MAC_LEN);
                verify_mac(mac_key, &[tagged.as_slice()], &tag)?;
                Ok(tagged)
            }
        }
    }
}
