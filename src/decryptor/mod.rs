// src/decryptor/mod.rs

//! Opening: wire string → verified bytes → value.
//!
//! Core API: [`EnvelopeCipher::decrypt`] for typed values,
//! [`EnvelopeCipher::open`] for the verified bytes (or the passthrough input),
//! [`EnvelopeCipher::unseal`] for an already-decoded [`Envelope`](crate::wire::Envelope).

mod open;

pub use open::Opened;
