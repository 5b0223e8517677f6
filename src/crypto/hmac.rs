// src/crypto/hmac.rs

//! HMAC-SHA256 tagging and constant-time verification.

use crate::aliases::HmacSha256;
use crate::consts::MAC_LEN;
use crate::error::AesEnvelopeError;
use hmac::Mac;

fn keyed(key: &[u8], parts: &[&[u8]]) -> Result<HmacSha256, AesEnvelopeError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| AesEnvelopeError::Cipher(format!("HMAC key rejected: {e}")))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac)
}

/// Tag the concatenation of `parts` under `key`.
#[inline]
pub fn compute_mac(key: &[u8], parts: &[&[u8]]) -> Result<[u8; MAC_LEN], AesEnvelopeError> {
    let tag = keyed(key, parts)?.finalize().into_bytes();
    let mut out = [0u8; MAC_LEN];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Recompute the tag over `parts` and compare it to `expected` in constant time.
///
/// A tag of the wrong length is a mismatch, not a separate error.
#[inline]
pub fn verify_mac(key: &[u8], parts: &[&[u8]], expected: &[u8]) -> Result<(), AesEnvelopeError> {
    if expected.len() != MAC_LEN {
        return Err(AesEnvelopeError::MacMismatch);
    }
    keyed(key, parts)?
        .verify_slice(expected)
        .map_err(|_| AesEnvelopeError::MacMismatch)
}
