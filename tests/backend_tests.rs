//! tests/backend_tests.rs
//! NIST SP 800-38A vectors and backend substitutability

mod common;

use aesenvelope_rs::{
    AesEnvelopeError, AesVariant, BackendChoice, CipherBackend, CipherConfig, EnvelopeCipher,
    LegacyBackend, Mode, ModernBackend,
};
use common::{constant_rng, secret, COMPOSITIONS, TEST_SECRET, TEST_STRING};

const KEY_128: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const KEY_192: &str = "8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b";
const KEY_256: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";
const IV: &str = "000102030405060708090a0b0c0d0e0f";
const PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a";

struct Vector {
    variant: AesVariant,
    mode: Mode,
    key: &'static str,
    /// First 16 bytes of output for the first plaintext block.
    expected: &'static str,
}

const VECTORS: &[Vector] = &[
    Vector { variant: AesVariant::Aes128, mode: Mode::Cbc, key: KEY_128, expected: "7649abac8119b246cee98e9b12e9197d" },
    Vector { variant: AesVariant::Aes128, mode: Mode::Ecb, key: KEY_128, expected: "3ad77bb40d7a3660a89ecaf32466ef97" },
    Vector { variant: AesVariant::Aes128, mode: Mode::Cfb, key: KEY_128, expected: "3b3fd92eb72dad20333449f8e83cfb4a" },
    Vector { variant: AesVariant::Aes128, mode: Mode::Cfb8, key: KEY_128, expected: "3b79424c9c0dd436bace9e0ed4586a4f" },
    Vector { variant: AesVariant::Aes128, mode: Mode::Ofb, key: KEY_128, expected: "3b3fd92eb72dad20333449f8e83cfb4a" },
    Vector { variant: AesVariant::Aes192, mode: Mode::Cbc, key: KEY_192, expected: "4f021db243bc633d7178183a9fa071e8" },
    Vector { variant: AesVariant::Aes192, mode: Mode::Ecb, key: KEY_192, expected: "bd334f1d6e45f25ff712a214571fa5cc" },
    Vector { variant: AesVariant::Aes192, mode: Mode::Cfb, key: KEY_192, expected: "cdc80d6fddf18cab34c25909c99a4174" },
    Vector { variant: AesVariant::Aes256, mode: Mode::Cbc, key: KEY_256, expected: "f58c4c04d6e5f1ba779eabfb5f7bfbd6" },
    Vector { variant: AesVariant::Aes256, mode: Mode::Ecb, key: KEY_256, expected: "f3eed1bdb5d2a03c064b5a7e3db181f8" },
    Vector { variant: AesVariant::Aes256, mode: Mode::Cfb, key: KEY_256, expected: "dc7e84bfda79164b7ecd8486985d3860" },
    Vector { variant: AesVariant::Aes256, mode: Mode::Ofb, key: KEY_256, expected: "dc7e84bfda79164b7ecd8486985d3860" },
];

fn backends(config: CipherConfig) -> [Box<dyn CipherBackend>; 2] {
    [
        Box::new(ModernBackend::new(config)),
        Box::new(LegacyBackend::new(config)),
    ]
}

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("test vector is valid hex")
}

#[test]
fn nist_first_block_vectors() {
    let plaintext = unhex(PLAINTEXT);

    for v in VECTORS {
        let config = CipherConfig::new(v.variant, v.mode);
        let key = unhex(v.key);
        let iv = if v.mode == Mode::Ecb { Vec::new() } else { unhex(IV) };

        for backend in backends(config) {
            let desc = format!("{config} {}", backend.name());
            let ct = backend.encrypt(&key, &plaintext, &iv).unwrap();

            // Padded modes append a full PKCS#7 block to block-aligned input.
            let expected_len = if v.mode.is_padded() { 32 } else { 16 };
            assert_eq!(ct.len(), expected_len, "{desc}");
            assert_eq!(hex::encode(&ct[..16]), v.expected, "{desc}");

            let pt = backend.decrypt(&key, &ct, &iv).unwrap();
            assert_eq!(pt, plaintext, "{desc}");
        }
    }
}

#[test]
fn backends_agree_on_every_config_and_length() {
    let lengths = [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 1000];

    for config in CipherConfig::all() {
        let key: Vec<u8> = (0..config.variant.key_len() as u8).collect();
        let iv: Vec<u8> = (0..config.iv_len() as u8).map(|b| b.wrapping_mul(7)).collect();
        let [modern, legacy] = backends(config);

        for len in lengths {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
            let a = modern.encrypt(&key, &plaintext, &iv).unwrap();
            let b = legacy.encrypt(&key, &plaintext, &iv).unwrap();
            assert_eq!(a, b, "{config} len {len}");

            if config.mode.is_padded() {
                assert_eq!(a.len() % 16, 0, "{config} len {len}");
                assert!(a.len() > len, "{config} len {len}");
            } else {
                assert_eq!(a.len(), len, "{config} len {len}");
            }

            assert_eq!(legacy.decrypt(&key, &a, &iv).unwrap(), plaintext);
            assert_eq!(modern.decrypt(&key, &b, &iv).unwrap(), plaintext);
        }
    }
}

#[test]
fn backends_reject_bad_arguments() {
    let config = CipherConfig::new(AesVariant::Aes256, Mode::Cbc);

    for backend in backends(config) {
        let name = backend.name();
        assert_eq!(backend.iv_size(), 16);

        let err = backend.encrypt(&[0u8; 16], b"data", &[0u8; 16]).unwrap_err();
        assert!(matches!(err, AesEnvelopeError::Cipher(_)), "{name}: {err:?}");

        let err = backend.encrypt(&[0u8; 32], b"data", &[0u8; 8]).unwrap_err();
        assert!(
            matches!(err, AesEnvelopeError::IvSizeMismatch { expected: 16, actual: 8 }),
            "{name}: {err:?}"
        );

        let err = backend.decrypt(&[0u8; 32], &[0u8; 20], &[0u8; 16]).unwrap_err();
        assert!(matches!(err, AesEnvelopeError::Cipher(_)), "{name}: {err:?}");
    }
}

#[test]
fn create_iv_matches_mode() {
    let rng = aesenvelope_rs::OsRandom;
    for config in CipherConfig::all() {
        for backend in backends(config) {
            let iv = backend.create_iv(&rng).unwrap();
            assert_eq!(iv.len(), config.iv_len(), "{config} {}", backend.name());
        }
    }
}

#[test]
fn engines_with_either_backend_emit_identical_envelopes() {
    for config in CipherConfig::all() {
        for composition in COMPOSITIONS {
            let build = |backend| {
                EnvelopeCipher::builder()
                    .with_cipher(config)
                    .with_composition(composition)
                    .with_backend(backend)
                    .with_rng(constant_rng(0x5a))
                    .build(&secret(TEST_SECRET))
                    .unwrap()
            };
            let modern = build(BackendChoice::Modern);
            let legacy = build(BackendChoice::Legacy);

            assert_eq!(modern.backend_name(), "modern");
            assert_eq!(legacy.backend_name(), "legacy");
            assert_eq!(
                modern.encrypt(TEST_STRING).unwrap(),
                legacy.encrypt(TEST_STRING).unwrap(),
                "{config} {composition:?}"
            );
        }
    }
}
