//! src/crypto/kdf.rs
//! Secret → cipher key + MAC key.
//!
//! Both key schemes produce 32 bytes of key material; the cipher key is the leading
//! 16/24/32 bytes of it, per [`AesVariant::key_len`]. Keys are derived once per engine
//! and live in zeroize-on-drop buffers.

use crate::aliases::{KeyMaterial32, SecretString};
use crate::config::{AesVariant, KeyScheme, MacKeyScheme};
use crate::consts::{HEX_TAIL_MAC_KEY_LEN, KEY_MATERIAL_LEN, RAW_HEX_KEY_CHARS};
use crate::error::AesEnvelopeError;
use sha2::{Digest, Sha256};
use secure_gate::{RevealSecret, RevealSecretMut};
use std::fmt;

/// Cipher key and MAC key for one engine.
pub struct DerivedKeys {
    cipher_key: KeyMaterial32,
    cipher_len: usize,
    mac_key: KeyMaterial32,
    mac_len: usize,
}

impl DerivedKeys {
    /// Derive both keys from `secret`.
    pub fn derive(
        secret: &SecretString,
        variant: AesVariant,
        key_scheme: KeyScheme,
        mac_scheme: MacKeyScheme,
    ) -> Result<Self, AesEnvelopeError> {
        let mut material = KeyMaterial32::new([0u8; KEY_MATERIAL_LEN]);
        match key_scheme {
            KeyScheme::Sha256Truncated => derive_sha256_material(secret, &mut material),
            KeyScheme::RawHex => derive_raw_hex_material(secret, &mut material)?,
        }

        let cipher_len = variant.key_len();
        let mut mac_key = KeyMaterial32::new([0u8; KEY_MATERIAL_LEN]);
        let mac_len = match mac_scheme {
            MacKeyScheme::CipherKey => {
                mac_key.expose_secret_mut()[..cipher_len]
                    .copy_from_slice(&material.expose_secret()[..cipher_len]);
                cipher_len
            }
            MacKeyScheme::HexTail => {
                // Last 32 hex chars of hex(cipher_key) == its last 16 bytes.
                let tail = &material.expose_secret()[cipher_len - HEX_TAIL_MAC_KEY_LEN..cipher_len];
                mac_key.expose_secret_mut()[..HEX_TAIL_MAC_KEY_LEN].copy_from_slice(tail);
                HEX_TAIL_MAC_KEY_LEN
            }
        };

        Ok(Self {
            cipher_key: material,
            cipher_len,
            mac_key,
            mac_len,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn cipher_key(&self) -> &[u8] {
        &self.cipher_key.expose_secret()[..self.cipher_len]
    }

    #[inline(always)]
    #[must_use]
    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key.expose_secret()[..self.mac_len]
    }
}

impl fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeys")
            .field("cipher_len", &self.cipher_len)
            .field("mac_len", &self.mac_len)
            .finish_non_exhaustive()
    }
}

/// SHA-256 of the secret's UTF-8 bytes.
#[inline(always)]
pub fn derive_sha256_material(secret: &SecretString, out: &mut KeyMaterial32) {
    let digest = Sha256::digest(secret.expose_secret().as_bytes());
    out.expose_secret_mut().copy_from_slice(&digest);
}

/// Pack a 64-character hex secret into 32 bytes.
pub fn derive_raw_hex_material(
    secret: &SecretString,
    out: &mut KeyMaterial32,
) -> Result<(), AesEnvelopeError> {
    let hex_key = secret.expose_secret();
    if hex_key.len() != RAW_HEX_KEY_CHARS {
        return Err(AesEnvelopeError::InvalidKey(format!(
            "expected {RAW_HEX_KEY_CHARS} hex characters, got {}",
            hex_key.len()
        )));
    }
    hex::decode_to_slice(hex_key.as_bytes(), out.expose_secret_mut())
        .map_err(|e| AesEnvelopeError::InvalidKey(format!("key is not hexadecimal: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn sha256_truncates_per_variant() {
        // SHA-256("abc")
        let full = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        for (variant, chars) in [
            (AesVariant::Aes128, 32),
            (AesVariant::Aes192, 48),
            (AesVariant::Aes256, 64),
        ] {
            let keys = DerivedKeys::derive(
                &secret("abc"),
                variant,
                KeyScheme::Sha256Truncated,
                MacKeyScheme::CipherKey,
            )
            .unwrap();
            assert_eq!(hex::encode(keys.cipher_key()), full[..chars]);
            assert_eq!(keys.mac_key(), keys.cipher_key());
        }
    }

    #[test]
    fn raw_hex_is_not_hashed() {
        let hex_key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
        let keys = DerivedKeys::derive(
            &secret(hex_key),
            AesVariant::Aes256,
            KeyScheme::RawHex,
            MacKeyScheme::CipherKey,
        )
        .unwrap();
        assert_eq!(hex::encode(keys.cipher_key()), hex_key);
    }

    #[test]
    fn hex_tail_matches_its_definition() {
        let keys = DerivedKeys::derive(
            &secret("tail"),
            AesVariant::Aes256,
            KeyScheme::Sha256Truncated,
            MacKeyScheme::HexTail,
        )
        .unwrap();
        let encoded = hex::encode(keys.cipher_key());
        let tail = hex::decode(&encoded[encoded.len() - 32..]).unwrap();
        assert_eq!(keys.mac_key(), tail.as_slice());
        assert_eq!(keys.mac_key().len(), 16);
    }

    #[test]
    fn debug_hides_key_bytes() {
        let keys = DerivedKeys::derive(
            &secret("x"),
            AesVariant::Aes128,
            KeyScheme::Sha256Truncated,
            MacKeyScheme::CipherKey,
        )
        .unwrap();
        let shown = format!("{keys:?}");
        assert!(!shown.contains(&hex::encode(keys.cipher_key())));
    }
}
