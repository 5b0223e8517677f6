// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used by the legacy backend.

use crate::consts::AES_BLOCK_LEN;
use crate::error::AesEnvelopeError;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// # Panics (by contract)
///
/// Panics if any argument is shorter than 16 bytes. Callers pass exact
/// `[u8; 16]` blocks or `chunks_exact(16)` slices.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < AES_BLOCK_LEN {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// XORs `keystream` into `data` in place, over the length of `data`.
#[inline(always)]
pub fn xor_in_place(data: &mut [u8], keystream: &[u8]) {
    for (byte, key) in data.iter_mut().zip(keystream) {
        *byte ^= key;
    }
}

/// PKCS#7-pads `data` to a multiple of the AES block length.
///
/// A full block of padding is appended when `data` is already aligned.
#[must_use]
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad = AES_BLOCK_LEN - data.len() % AES_BLOCK_LEN;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strips and validates PKCS#7 padding in place.
pub fn pkcs7_unpad(data: &mut Vec<u8>) -> Result<(), AesEnvelopeError> {
    let invalid = || AesEnvelopeError::Cipher("invalid PKCS#7 padding".into());

    if data.is_empty() || data.len() % AES_BLOCK_LEN != 0 {
        return Err(invalid());
    }
    let pad = *data.last().ok_or_else(invalid)? as usize;
    if pad == 0 || pad > AES_BLOCK_LEN {
        return Err(invalid());
    }
    let body = data.len() - pad;
    if data[body..].iter().any(|&b| b as usize != pad) {
        return Err(invalid());
    }
    data.truncate(body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_blocks_is_involutive() {
        let a = [0x5au8; 16];
        let b: [u8; 16] = core::array::from_fn(|i| i as u8);
        let mut once = [0u8; 16];
        let mut twice = [0u8; 16];
        xor_blocks(&a, &b, &mut once);
        xor_blocks(&once, &b, &mut twice);
        assert_eq!(twice, a);
    }

    #[test]
    fn pad_lengths() {
        assert_eq!(pkcs7_pad(b"").len(), 16);
        assert_eq!(pkcs7_pad(&[0u8; 15]), [&[0u8; 15][..], &[1u8]].concat());
        assert_eq!(pkcs7_pad(&[0u8; 16]).len(), 32);
        assert_eq!(pkcs7_pad(&[0u8; 16])[16..], [16u8; 16]);
    }

    #[test]
    fn unpad_roundtrip() {
        for len in 0..40 {
            let data: Vec<u8> = (0..len as u8).collect();
            let mut padded = pkcs7_pad(&data);
            pkcs7_unpad(&mut padded).unwrap();
            assert_eq!(padded, data, "len {len}");
        }
    }

    #[test]
    fn unpad_rejects_garbage() {
        let mut mixed = vec![9u8; 14];
        mixed.extend_from_slice(&[2, 3]);
        let cases = vec![
            Vec::new(),
            vec![1u8; 15],
            vec![0u8; 16],
            vec![17u8; 16],
            mixed,
        ];
        for case in cases {
            let mut v = case.clone();
            assert!(pkcs7_unpad(&mut v).is_err(), "{case:?}");
        }
    }
}
