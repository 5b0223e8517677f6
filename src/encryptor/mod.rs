// src/encryptor/mod.rs

//! Sealing: value → bytes → ciphertext + MAC → wire string.
//!
//! Core API: [`EnvelopeCipher::encrypt`] for typed values,
//! [`EnvelopeCipher::encrypt_bytes`] for pre-serialized payloads,
//! [`EnvelopeCipher::seal`] when the caller wants the decoded fields.

mod seal;
