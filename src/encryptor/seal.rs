//! src/encryptor/seal.rs
//! Encrypt-then-MAC and MAC-then-encrypt sealing

use crate::codec::ValueCodec;
use crate::config::Composition;
use crate::consts::MAC_LEN;
use crate::crypto::hmac::compute_mac;
use crate::engine::EnvelopeCipher;
use crate::error::AesEnvelopeError;
use crate::wire::Envelope;
use serde::Serialize;
use tracing::debug;

impl<C: ValueCodec> EnvelopeCipher<C> {
    /// Serialize `value` and seal it into a wire string.
    ///
    /// Two calls with the same value give different strings (fresh IV each time),
    /// except under ECB, which takes no IV.
    pub fn encrypt<T>(&self, value: &T) -> Result<String, AesEnvelopeError>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = self.codec.serialize(value)?;
        self.encrypt_bytes(&plaintext)
    }

    /// Seal already-serialized bytes into a wire string.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String, AesEnvelopeError> {
        Ok(self.seal(plaintext)?.encode())
    }

    /// Seal bytes and return the decoded envelope fields.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Envelope, AesEnvelopeError> {
        let iv = self.backend.create_iv(self.rng.as_ref())?;
        let cipher_key = self.keys.cipher_key();
        let mac_key = self.keys.mac_key();

        let envelope = match self.composition {
            Composition::EncryptThenMac => {
                let ciphertext = self.backend.encrypt(cipher_key, plaintext, &iv)?;
                // IV is bound into the tag alongside the ciphertext.
                let mac = compute_mac(mac_key, &[iv.as_slice(), ciphertext.as_slice()])?;
                Envelope::EncryptThenMac {
                    ciphertext,
                    mac: mac.to_vec(),
                    iv,
                }
            }
            Composition::MacThenEncrypt => {
                let mac = compute_mac(mac_key, &[plaintext])?;
                let mut tagged = Vec::with_capacity(plaintext.len() + MAC_LEN);
                tagged.extend_from_slice(plaintext);
                tagged.extend_from_slice(&mac);
                let ciphertext = self.backend.encrypt(cipher_key, &tagged, &iv)?;
                Envelope::MacThenEncrypt { ciphertext, iv }
            }
        };

        debug!(
            cipher = %self.config,
            composition = ?self.composition,
            backend = self.backend.name(),
            plaintext_len = plaintext.len(),
            ciphertext_len = envelope.ciphertext().len(),
            "sealed envelope"
        );
        Ok(envelope)
    }
}
