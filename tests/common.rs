//! tests/common.rs
//! Common constants and helpers shared across test files

#![allow(dead_code)] // Each test binary uses a different subset

use aesenvelope_rs::aliases::SecretString;
use aesenvelope_rs::{
    AesEnvelopeError, BackendChoice, CipherConfig, Composition, EnvelopeCipher, RandomSource,
};
use std::sync::Arc;

/// String with both quote styles and punctuation.
pub const TEST_STRING: &str = "The \"quick\" brown 'fox' jumped 0ver the lazy dog!?";

pub const TEST_SECRET: &str = "!@#$ashYJD56902345&*(_'\"ds6";

/// 32 zero bytes as a raw-hex key.
pub const ZERO_HEX_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub const COMPOSITIONS: [Composition; 2] =
    [Composition::EncryptThenMac, Composition::MacThenEncrypt];

pub const BACKENDS: [BackendChoice; 2] = [BackendChoice::Modern, BackendChoice::Legacy];

pub fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string())
}

pub fn cipher(
    config: CipherConfig,
    composition: Composition,
    backend: BackendChoice,
) -> EnvelopeCipher {
    EnvelopeCipher::builder()
        .with_cipher(config)
        .with_composition(composition)
        .with_backend(backend)
        .build(&secret(TEST_SECRET))
        .unwrap_or_else(|e| panic!("build failed for {config}: {e}"))
}

/// Repeats one byte. Only for comparing outputs across backends.
#[derive(Debug)]
pub struct ConstantRandom(pub u8);

impl RandomSource for ConstantRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), AesEnvelopeError> {
        dest.fill(self.0);
        Ok(())
    }
}

pub fn constant_rng(byte: u8) -> Arc<dyn RandomSource> {
    Arc::new(ConstantRandom(byte))
}

/// Decode, mutate and re-encode one field of a wire string.
pub fn tamper_field(wire: &str, index: usize, f: impl FnOnce(&mut Vec<u8>)) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    let mut fields: Vec<String> = wire.split('|').map(str::to_string).collect();
    let mut bytes = STANDARD.decode(&fields[index]).expect("test input is valid base64");
    f(&mut bytes);
    fields[index] = STANDARD.encode(&bytes);
    fields.join("|")
}

/// Route crate logs through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
