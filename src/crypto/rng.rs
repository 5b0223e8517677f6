// src/crypto/rng.rs
//! Secure randomness for IV generation.
//!
//! [`OsRandom`] draws straight from the operating system through `rand`'s `OsRng`.
//! Any other [`RandomSource`] can be injected through the builder; it must be
//! cryptographically secure and safe to share across threads.

use crate::error::AesEnvelopeError;
use rand::{rngs::OsRng, TryRngCore};
use std::fmt;

/// Capability: fill buffers with cryptographically secure random bytes.
pub trait RandomSource: Send + Sync + fmt::Debug {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), AesEnvelopeError>;

    /// `n` fresh random bytes.
    fn random_bytes(&self, n: usize) -> Result<Vec<u8>, AesEnvelopeError> {
        let mut out = vec![0u8; n];
        self.fill_bytes(&mut out)?;
        Ok(out)
    }
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    #[inline(always)]
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), AesEnvelopeError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| AesEnvelopeError::Rng(e.to_string()))
    }
}
