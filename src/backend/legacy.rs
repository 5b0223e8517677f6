//! src/backend/legacy.rs
//! Modes of operation chained by hand over the raw AES block primitive.
//!
//! Every mode here is written against a single `encrypt_block`/`decrypt_block` pair,
//! the same way the v3 stream encryptor used to walk CBC one block at a time. Output is
//! byte-identical to [`ModernBackend`](super::ModernBackend).

use super::{check_key_iv, CipherBackend};
use crate::aliases::Block16;
use crate::config::{AesVariant, CipherConfig, Mode};
use crate::consts::AES_BLOCK_LEN;
use crate::error::AesEnvelopeError;
use crate::utils::{pkcs7_pad, pkcs7_unpad, xor_blocks, xor_in_place};
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block as AesBlock};
use secure_gate::{RevealSecret, RevealSecretMut};

/// Expanded AES key for one call.
enum KeySchedule {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl KeySchedule {
    fn new(variant: AesVariant, key: &[u8]) -> Result<Self, AesEnvelopeError> {
        let schedule = match variant {
            AesVariant::Aes128 => Aes128::new_from_slice(key).map(Self::Aes128),
            AesVariant::Aes192 => Aes192::new_from_slice(key).map(Self::Aes192),
            AesVariant::Aes256 => Aes256::new_from_slice(key).map(Self::Aes256),
        };
        schedule.map_err(|e| AesEnvelopeError::Cipher(format!("cipher init failed: {e}")))
    }

    #[inline(always)]
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let aes_block = AesBlock::from_mut_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(aes_block),
            Self::Aes192(c) => c.encrypt_block(aes_block),
            Self::Aes256(c) => c.encrypt_block(aes_block),
        }
    }

    #[inline(always)]
    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let aes_block = AesBlock::from_mut_slice(block);
        match self {
            Self::Aes128(c) => c.decrypt_block(aes_block),
            Self::Aes192(c) => c.decrypt_block(aes_block),
            Self::Aes256(c) => c.decrypt_block(aes_block),
        }
    }

    fn cbc_encrypt(&self, plaintext: &[u8], iv: [u8; AES_BLOCK_LEN]) -> Vec<u8> {
        let padded = pkcs7_pad(plaintext);
        let mut out = Vec::with_capacity(padded.len());
        let mut prev = Block16::new(iv);

        for chunk in padded.chunks_exact(AES_BLOCK_LEN) {
            let mut block = [0u8; AES_BLOCK_LEN];
            xor_blocks(chunk, prev.expose_secret(), &mut block);
            self.encrypt_block(&mut block);
            out.extend_from_slice(&block);
            *prev.expose_secret_mut() = block;
        }
        out
    }

    fn cbc_decrypt(
        &self,
        ciphertext: &[u8],
        iv: [u8; AES_BLOCK_LEN],
    ) -> Result<Vec<u8>, AesEnvelopeError> {
        check_aligned(ciphertext)?;
        let mut out = Vec::with_capacity(ciphertext.len());
        let mut prev = Block16::new(iv);

        for chunk in ciphertext.chunks_exact(AES_BLOCK_LEN) {
            let mut block = to_block(chunk);
            self.decrypt_block(&mut block);
            let mut plain = [0u8; AES_BLOCK_LEN];
            xor_blocks(&block, prev.expose_secret(), &mut plain);
            out.extend_from_slice(&plain);
            *prev.expose_secret_mut() = to_block(chunk);
        }
        pkcs7_unpad(&mut out)?;
        Ok(out)
    }

    fn ecb_encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = pkcs7_pad(plaintext);
        for chunk in out.chunks_exact_mut(AES_BLOCK_LEN) {
            let mut block = to_block(chunk);
            self.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        out
    }

    fn ecb_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, AesEnvelopeError> {
        check_aligned(ciphertext)?;
        let mut out = ciphertext.to_vec();
        for chunk in out.chunks_exact_mut(AES_BLOCK_LEN) {
            let mut block = to_block(chunk);
            self.decrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        pkcs7_unpad(&mut out)?;
        Ok(out)
    }

    /// Full-block CFB. The final segment may be short.
    fn cfb(&self, data: &[u8], iv: [u8; AES_BLOCK_LEN], decrypting: bool) -> Vec<u8> {
        let mut out = data.to_vec();
        let mut register = Block16::new(iv);

        for segment in out.chunks_mut(AES_BLOCK_LEN) {
            let mut keystream = *register.expose_secret();
            self.encrypt_block(&mut keystream);
            // Feedback is always the ciphertext segment.
            if decrypting {
                *register.expose_secret_mut() = to_partial_block(segment);
                xor_in_place(segment, &keystream);
            } else {
                xor_in_place(segment, &keystream);
                *register.expose_secret_mut() = to_partial_block(segment);
            }
        }
        out
    }

    /// 8-bit CFB: one block encryption per byte, register shifts in ciphertext bytes.
    fn cfb8(&self, data: &[u8], iv: [u8; AES_BLOCK_LEN], decrypting: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        let mut register = Block16::new(iv);

        for &byte in data {
            let mut keystream = *register.expose_secret();
            self.encrypt_block(&mut keystream);
            let produced = byte ^ keystream[0];
            let cipher_byte = if decrypting { byte } else { produced };

            let reg = register.expose_secret_mut();
            reg.copy_within(1.., 0);
            reg[AES_BLOCK_LEN - 1] = cipher_byte;
            out.push(produced);
        }
        out
    }

    /// Full-block OFB. Symmetric.
    fn ofb(&self, data: &[u8], iv: [u8; AES_BLOCK_LEN]) -> Vec<u8> {
        let mut out = data.to_vec();
        let mut register = Block16::new(iv);

        for segment in out.chunks_mut(AES_BLOCK_LEN) {
            self.encrypt_block(register.expose_secret_mut());
            xor_in_place(segment, register.expose_secret());
        }
        out
    }
}

#[inline(always)]
fn to_block(chunk: &[u8]) -> [u8; AES_BLOCK_LEN] {
    let mut block = [0u8; AES_BLOCK_LEN];
    block.copy_from_slice(chunk);
    block
}

/// Copies up to one block; a short final segment is zero-extended. Only ever fed back
/// after the last segment, so the padding bytes never reach the output.
#[inline(always)]
fn to_partial_block(chunk: &[u8]) -> [u8; AES_BLOCK_LEN] {
    let mut block = [0u8; AES_BLOCK_LEN];
    block[..chunk.len()].copy_from_slice(chunk);
    block
}

fn check_aligned(ciphertext: &[u8]) -> Result<(), AesEnvelopeError> {
    if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_LEN != 0 {
        return Err(AesEnvelopeError::Cipher(format!(
            "ciphertext length {} is not a positive multiple of {AES_BLOCK_LEN}",
            ciphertext.len()
        )));
    }
    Ok(())
}

/// IV as a fixed block; ECB gets an unused zero block.
fn iv_block(iv: &[u8]) -> [u8; AES_BLOCK_LEN] {
    let mut block = [0u8; AES_BLOCK_LEN];
    if iv.len() == AES_BLOCK_LEN {
        block.copy_from_slice(iv);
    }
    block
}

/// Backend that walks each mode block by block over `aes::Aes{128,192,256}`.
#[derive(Debug, Clone, Copy)]
pub struct LegacyBackend {
    config: CipherConfig,
}

impl LegacyBackend {
    #[must_use]
    pub const fn new(config: CipherConfig) -> Self {
        Self { config }
    }
}

impl CipherBackend for LegacyBackend {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn config(&self) -> CipherConfig {
        self.config
    }

    fn encrypt(&self, key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, AesEnvelopeError> {
        check_key_iv(self.config, key, iv)?;
        let schedule = KeySchedule::new(self.config.variant, key)?;
        let iv = iv_block(iv);

        Ok(match self.config.mode {
            Mode::Cbc => schedule.cbc_encrypt(plaintext, iv),
            Mode::Ecb => schedule.ecb_encrypt(plaintext),
            Mode::Cfb => schedule.cfb(plaintext, iv, false),
            Mode::Cfb8 => schedule.cfb8(plaintext, iv, false),
            Mode::Ofb => schedule.ofb(plaintext, iv),
        })
    }

    fn decrypt(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>, AesEnvelopeError> {
        check_key_iv(self.config, key, iv)?;
        let schedule = KeySchedule::new(self.config.variant, key)?;
        let iv = iv_block(iv);

        match self.config.mode {
            Mode::Cbc => schedule.cbc_decrypt(ciphertext, iv),
            Mode::Ecb => schedule.ecb_decrypt(ciphertext),
            Mode::Cfb => Ok(schedule.cfb(ciphertext, iv, true)),
            Mode::Cfb8 => Ok(schedule.cfb8(ciphertext, iv, true)),
            Mode::Ofb => Ok(schedule.ofb(ciphertext, iv)),
        }
    }
}
