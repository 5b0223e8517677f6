//! # Envelope Cipher
//!
//! [`EnvelopeCipher`] holds one deployment's immutable state: the cipher
//! configuration, the composition order, the derived keys, the chosen backend and the
//! random source. Encryption lives in [`encryptor`](crate::encryptor), verification
//! and decryption in [`decryptor`](crate::decryptor).
//!
//! # Thread Safety
//!
//! `EnvelopeCipher` is `Send + Sync` and holds no mutable state. One instance can serve
//! any number of concurrent `encrypt`/`decrypt` calls.

use crate::aliases::SecretString;
use crate::backend::CipherBackend;
use crate::builders::EnvelopeBuilder;
use crate::codec::{JsonCodec, ValueCodec};
use crate::config::{CipherConfig, Composition};
use crate::crypto::kdf::DerivedKeys;
use crate::crypto::rng::RandomSource;
use crate::error::AesEnvelopeError;
use std::fmt;
use std::sync::Arc;

/// Authenticated encryption of serializable values into `|`-delimited base64 envelopes.
///
/// ```
/// use aesenvelope_rs::aliases::SecretString;
/// use aesenvelope_rs::EnvelopeCipher;
///
/// let secret = SecretString::new("correct horse battery staple".to_string());
/// let cipher = EnvelopeCipher::with_defaults(&secret)?;
///
/// let sealed = cipher.encrypt(&("user-42", 3600u32))?;
/// let opened: (String, u32) = cipher.decrypt(&sealed)?;
/// assert_eq!(opened, ("user-42".to_string(), 3600));
/// # Ok::<(), aesenvelope_rs::AesEnvelopeError>(())
/// ```
pub struct EnvelopeCipher<C: ValueCodec = JsonCodec> {
    pub(crate) config: CipherConfig,
    pub(crate) composition: Composition,
    pub(crate) keys: DerivedKeys,
    pub(crate) backend: Box<dyn CipherBackend>,
    pub(crate) rng: Arc<dyn RandomSource>,
    pub(crate) codec: C,
}

impl EnvelopeCipher<JsonCodec> {
    /// AES-256-CBC, encrypt-then-MAC, SHA-256 key derivation, modern backend.
    pub fn with_defaults(secret: &SecretString) -> Result<Self, AesEnvelopeError> {
        EnvelopeBuilder::new().build(secret)
    }

    /// Default composition and key schemes with an explicit cipher configuration.
    pub fn new(secret: &SecretString, config: CipherConfig) -> Result<Self, AesEnvelopeError> {
        EnvelopeBuilder::new().with_cipher(config).build(secret)
    }

    #[must_use]
    pub fn builder() -> EnvelopeBuilder {
        EnvelopeBuilder::new()
    }
}

impl<C: ValueCodec> EnvelopeCipher<C> {
    #[must_use]
    pub const fn cipher_config(&self) -> CipherConfig {
        self.config
    }

    #[must_use]
    pub const fn composition(&self) -> Composition {
        self.composition
    }

    /// Name of the backend in use (`"modern"` or `"legacy"`).
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    #[must_use]
    pub fn iv_size(&self) -> usize {
        self.backend.iv_size()
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: ValueCodec> fmt::Debug for EnvelopeCipher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeCipher")
            .field("config", &self.config)
            .field("composition", &self.composition)
            .field("backend", &self.backend.name())
            .field("keys", &self.keys)
            .field("codec", &self.codec)
            .finish()
    }
}
