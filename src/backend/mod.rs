// src/backend/mod.rs

//! # Cipher Backends
//!
//! The envelope construction talks to the block cipher only through
//! [`CipherBackend`]. Two implementations ship:
//!
//! - [`ModernBackend`] drives the RustCrypto mode crates (`cbc`, `ecb`, `cfb-mode`,
//!   `cfb8`, `ofb`).
//! - [`LegacyBackend`] chains the same modes by hand over the raw `aes` block
//!   primitive.
//!
//! For identical `(key, iv, plaintext, variant, mode)` both return identical bytes;
//! `tests/backend_tests.rs` pins this against NIST SP 800-38A vectors.

pub(crate) mod legacy;
pub(crate) mod modern;

pub use legacy::LegacyBackend;
pub use modern::ModernBackend;

use crate::config::{BackendChoice, CipherConfig};
use crate::crypto::rng::RandomSource;
use crate::error::AesEnvelopeError;
use std::fmt;

/// Raw encryption capability for one fixed [`CipherConfig`].
///
/// Keys are passed per call; a backend holds no secret state.
pub trait CipherBackend: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The `(variant, mode)` this backend was built for.
    fn config(&self) -> CipherConfig;

    /// IV length required by the mode, in bytes.
    fn iv_size(&self) -> usize {
        self.config().iv_len()
    }

    /// A fresh IV of [`iv_size`](Self::iv_size) bytes.
    fn create_iv(&self, rng: &dyn RandomSource) -> Result<Vec<u8>, AesEnvelopeError> {
        rng.random_bytes(self.iv_size())
    }

    /// Encrypt `plaintext`. Block modes apply PKCS#7 padding.
    fn encrypt(&self, key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, AesEnvelopeError>;

    /// Decrypt `ciphertext`. Block modes validate and strip PKCS#7 padding.
    fn decrypt(&self, key: &[u8], ciphertext: &[u8], iv: &[u8])
        -> Result<Vec<u8>, AesEnvelopeError>;
}

/// Resolve a [`BackendChoice`] once, at construction time.
#[must_use]
pub fn select(choice: BackendChoice, config: CipherConfig) -> Box<dyn CipherBackend> {
    match choice {
        BackendChoice::Modern => Box::new(ModernBackend::new(config)),
        BackendChoice::Legacy => Box::new(LegacyBackend::new(config)),
    }
}

/// Shared argument checks. Mode crates would report the same problems as opaque
/// `InvalidLength` errors.
pub(crate) fn check_key_iv(
    config: CipherConfig,
    key: &[u8],
    iv: &[u8],
) -> Result<(), AesEnvelopeError> {
    if key.len() != config.variant.key_len() {
        return Err(AesEnvelopeError::Cipher(format!(
            "{config} needs a {}-byte key, got {}",
            config.variant.key_len(),
            key.len()
        )));
    }
    if iv.len() != config.iv_len() {
        return Err(AesEnvelopeError::IvSizeMismatch {
            expected: config.iv_len(),
            actual: iv.len(),
        });
    }
    Ok(())
}
