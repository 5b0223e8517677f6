// src/lib.rs

pub mod aliases;
pub mod backend;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod codec;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod engine;
pub mod error;
pub mod utils;
pub mod wire;

// High-level API: this is what most users import
pub use builders::EnvelopeBuilder;
pub use decryptor::Opened;
pub use engine::EnvelopeCipher;
pub use error::AesEnvelopeError;

pub use config::{
    AesVariant, BackendChoice, CipherConfig, Composition, EnvelopeConfig, KeyScheme,
    MacKeyScheme, Mode,
};

// Capability seams
pub use backend::{CipherBackend, LegacyBackend, ModernBackend};
pub use codec::{JsonCodec, ValueCodec};
pub use crypto::rng::{OsRandom, RandomSource};

pub use wire::{is_sealed, Envelope};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
