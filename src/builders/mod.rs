//! # Builders
//!
//! Fluent construction of an [`EnvelopeCipher`](crate::EnvelopeCipher).
//!
//! ## Modules
//!
//! - [`envelope_builder`] - cipher, composition, key schemes, backend and random source
//!
//! ## Usage
//!
//! Every setting has a default; a bare `EnvelopeBuilder::new().build(&secret)` yields
//! AES-256-CBC, encrypt-then-MAC, SHA-256 key derivation on the modern backend.

pub mod envelope_builder;

pub use envelope_builder::EnvelopeBuilder;
