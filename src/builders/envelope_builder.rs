//! src/builders/envelope_builder.rs
//! EnvelopeCipher builder: strong defaults, every knob explicit

use crate::aliases::SecretString;
use crate::backend;
use crate::codec::{JsonCodec, ValueCodec};
use crate::config::{
    BackendChoice, CipherConfig, Composition, EnvelopeConfig, KeyScheme, MacKeyScheme,
};
use crate::crypto::kdf::DerivedKeys;
use crate::crypto::rng::{OsRandom, RandomSource};
use crate::engine::EnvelopeCipher;
use crate::error::AesEnvelopeError;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`EnvelopeCipher`].
///
/// Defaults: AES-256-CBC, [`Composition::EncryptThenMac`], [`KeyScheme::Sha256Truncated`],
/// [`MacKeyScheme::CipherKey`], [`BackendChoice::Modern`], [`OsRandom`].
///
/// The backend is resolved once in [`build`](Self::build); nothing is probed per call.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    cipher: CipherConfig,
    composition: Composition,
    key_scheme: KeyScheme,
    mac_key: MacKeyScheme,
    backend: BackendChoice,
    rng: Arc<dyn RandomSource>,
}

impl EnvelopeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cipher: CipherConfig::default(),
            composition: Composition::default(),
            key_scheme: KeyScheme::default(),
            mac_key: MacKeyScheme::default(),
            backend: BackendChoice::default(),
            rng: Arc::new(OsRandom),
        }
    }

    /// Start from deserialized settings. Fails with
    /// [`AesEnvelopeError::InvalidCipherConfiguration`] on an unknown size or mode.
    pub fn from_config(config: &EnvelopeConfig) -> Result<Self, AesEnvelopeError> {
        Ok(Self::new()
            .with_cipher(config.cipher_config()?)
            .with_composition(config.composition)
            .with_key_scheme(config.key_scheme)
            .with_mac_key(config.mac_key)
            .with_backend(config.backend))
    }

    #[must_use]
    pub fn with_cipher(mut self, cipher: CipherConfig) -> Self {
        self.cipher = cipher;
        self
    }

    /// Validate and set the cipher from a raw size in bits and a mode name.
    pub fn with_cipher_parts(self, bits: u16, mode: &str) -> Result<Self, AesEnvelopeError> {
        Ok(self.with_cipher(CipherConfig::parse(bits, mode)?))
    }

    #[must_use]
    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    #[must_use]
    pub fn with_key_scheme(mut self, key_scheme: KeyScheme) -> Self {
        self.key_scheme = key_scheme;
        self
    }

    #[must_use]
    pub fn with_mac_key(mut self, mac_key: MacKeyScheme) -> Self {
        self.mac_key = mac_key;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    /// Replace the OS random source, e.g. with a seeded source in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub const fn cipher(&self) -> CipherConfig {
        self.cipher
    }

    #[must_use]
    pub const fn composition(&self) -> Composition {
        self.composition
    }

    /// Derive keys and produce a JSON-backed engine.
    pub fn build(self, secret: &SecretString) -> Result<EnvelopeCipher<JsonCodec>, AesEnvelopeError> {
        self.build_with_codec(secret, JsonCodec)
    }

    /// Derive keys and produce an engine using `codec` for value serialization.
    pub fn build_with_codec<C: ValueCodec>(
        self,
        secret: &SecretString,
        codec: C,
    ) -> Result<EnvelopeCipher<C>, AesEnvelopeError> {
        let keys = DerivedKeys::derive(secret, self.cipher.variant, self.key_scheme, self.mac_key)?;
        let backend = backend::select(self.backend, self.cipher);

        debug!(
            cipher = %self.cipher,
            composition = ?self.composition,
            key_scheme = ?self.key_scheme,
            mac_key = ?self.mac_key,
            backend = backend.name(),
            "envelope cipher ready"
        );

        Ok(EnvelopeCipher {
            config: self.cipher,
            composition: self.composition,
            keys,
            backend,
            rng: self.rng,
            codec,
        })
    }
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
