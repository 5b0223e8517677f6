//! src/backend/modern.rs
//! RustCrypto mode crates over `aes`.

use super::{check_key_iv, CipherBackend};
use crate::config::{CipherConfig, Mode};
use crate::error::AesEnvelopeError;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{
    AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyInit, KeyIvInit,
    StreamCipher,
};

/// Expands `$body` once per AES key size with `$cipher` bound to the concrete type.
macro_rules! with_aes {
    ($variant:expr, $cipher:ident => $body:expr) => {
        match $variant {
            $crate::config::AesVariant::Aes128 => {
                type $cipher = ::aes::Aes128;
                $body
            }
            $crate::config::AesVariant::Aes192 => {
                type $cipher = ::aes::Aes192;
                $body
            }
            $crate::config::AesVariant::Aes256 => {
                type $cipher = ::aes::Aes256;
                $body
            }
        }
    };
}

fn init_error(e: InvalidLength) -> AesEnvelopeError {
    AesEnvelopeError::Cipher(format!("cipher init failed: {e}"))
}

/// Backend built on `cbc`, `ecb`, `cfb-mode`, `cfb8` and `ofb`.
#[derive(Debug, Clone, Copy)]
pub struct ModernBackend {
    config: CipherConfig,
}

impl ModernBackend {
    #[must_use]
    pub const fn new(config: CipherConfig) -> Self {
        Self { config }
    }
}

impl CipherBackend for ModernBackend {
    fn name(&self) -> &'static str {
        "modern"
    }

    fn config(&self) -> CipherConfig {
        self.config
    }

    fn encrypt(&self, key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, AesEnvelopeError> {
        check_key_iv(self.config, key, iv)?;
        let mode = self.config.mode;

        with_aes!(self.config.variant, C => match mode {
            Mode::Cbc => Ok(cbc::Encryptor::<C>::new_from_slices(key, iv)
                .map_err(init_error)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            Mode::Ecb => Ok(ecb::Encryptor::<C>::new_from_slice(key)
                .map_err(init_error)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            Mode::Cfb => {
                let mut buf = plaintext.to_vec();
                cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
                    .map_err(init_error)?
                    .encrypt(&mut buf);
                Ok(buf)
            }
            Mode::Cfb8 => {
                let mut buf = plaintext.to_vec();
                cfb8::Encryptor::<C>::new_from_slices(key, iv)
                    .map_err(init_error)?
                    .encrypt(&mut buf);
                Ok(buf)
            }
            Mode::Ofb => {
                let mut buf = plaintext.to_vec();
                let mut keystream = ofb::Ofb::<C>::new_from_slices(key, iv).map_err(init_error)?;
                keystream.apply_keystream(&mut buf);
                Ok(buf)
            }
        })
    }

    fn decrypt(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>, AesEnvelopeError> {
        check_key_iv(self.config, key, iv)?;
        let mode = self.config.mode;
        let unpad_error = |_| AesEnvelopeError::Cipher("invalid PKCS#7 padding".into());

        with_aes!(self.config.variant, C => match mode {
            Mode::Cbc => cbc::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(init_error)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(unpad_error),
            Mode::Ecb => ecb::Decryptor::<C>::new_from_slice(key)
                .map_err(init_error)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(unpad_error),
            Mode::Cfb => {
                let mut buf = ciphertext.to_vec();
                cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
                    .map_err(init_error)?
                    .decrypt(&mut buf);
                Ok(buf)
            }
            Mode::Cfb8 => {
                let mut buf = ciphertext.to_vec();
                cfb8::Decryptor::<C>::new_from_slices(key, iv)
                    .map_err(init_error)?
                    .decrypt(&mut buf);
                Ok(buf)
            }
            Mode::Ofb => {
                let mut buf = ciphertext.to_vec();
                let mut keystream = ofb::Ofb::<C>::new_from_slices(key, iv).map_err(init_error)?;
                keystream.apply_keystream(&mut buf);
                Ok(buf)
            }
        })
    }
}
