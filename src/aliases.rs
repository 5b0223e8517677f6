//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret material, built on [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every buffer here is zeroized on drop and only readable through an explicit
//! `.expose_secret()`.
//!
//! ## Type Categories
//!
//! ### HMAC Primitive
//! - [`HmacSha256`] - envelope authentication
//!
//! ### Dynamic Secrets
//! - [`SecretString`] - the caller's long-term secret
//!
//! ### Fixed-Size Secrets
//! - [`KeyMaterial32`] - SHA-256 output or packed hex key, before truncation
//! - [`Block16`] - one AES block of working state

use hmac::Hmac;
use sha2::Sha256;

pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type KeyMaterial32 = SpanBuffer<32>; // cipher key (leading 16/24/32 bytes used)
pub type Block16 = SpanBuffer<16>; // one AES block

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type SecretString = secure_gate::Dynamic<String>;
