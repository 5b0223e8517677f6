//! # Constants
//!
//! Wire-format and primitive sizes shared by the engine, the backends and the codec.

/// Field separator of the wire format. Not part of the standard base64 alphabet.
pub const DELIMITER: char = '|';

/// AES block length in bytes, for every key size.
pub const AES_BLOCK_LEN: usize = 16;

/// HMAC-SHA256 tag length in bytes.
pub const MAC_LEN: usize = 32;

/// Length of a [`KeyScheme::RawHex`](crate::KeyScheme::RawHex) secret in characters.
pub const RAW_HEX_KEY_CHARS: usize = 64;

/// Raw key material length produced by either key scheme before truncation.
pub const KEY_MATERIAL_LEN: usize = 32;

/// Length of the MAC key produced by [`MacKeyScheme::HexTail`](crate::MacKeyScheme::HexTail).
pub const HEX_TAIL_MAC_KEY_LEN: usize = 16;

/// Field count of an encrypt-then-MAC envelope: `ciphertext|mac|iv`.
pub const ENCRYPT_THEN_MAC_FIELDS: usize = 3;

/// Field count of a MAC-then-encrypt envelope: `ciphertext|iv`.
pub const MAC_THEN_ENCRYPT_FIELDS: usize = 2;
