// src/crypto/mod.rs

//! Low-level crypto primitives: key derivation, HMAC, randomness.
//!
//! The engine composes these; the block cipher itself lives behind
//! [`CipherBackend`](crate::backend::CipherBackend).

pub mod hmac;
pub mod kdf;
pub mod rng;
