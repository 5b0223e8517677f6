//! benches/kdf.rs
//! Key derivation per scheme. Runs once per engine, so this is construction cost.
use aesenvelope_rs::aliases::SecretString;
use aesenvelope_rs::crypto::kdf::DerivedKeys;
use aesenvelope_rs::{AesVariant, KeyScheme, MacKeyScheme};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");

    let passphrase = SecretString::new("benchmark-secret".to_string());
    let hex_key = SecretString::new("ab".repeat(32));

    for variant in AesVariant::ALL {
        group.bench_with_input(
            BenchmarkId::new("sha256_truncated", variant),
            &variant,
            |b, &variant| {
                b.iter(|| {
                    black_box(
                        DerivedKeys::derive(
                            black_box(&passphrase),
                            variant,
                            KeyScheme::Sha256Truncated,
                            MacKeyScheme::CipherKey,
                        )
                        .unwrap(),
                    )
                });
            },
        );
    }

    group.bench_function("raw_hex_hex_tail", |b| {
        b.iter(|| {
            black_box(
                DerivedKeys::derive(
                    black_box(&hex_key),
                    AesVariant::Aes256,
                    KeyScheme::RawHex,
                    MacKeyScheme::HexTail,
                )
                .unwrap(),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, kdf_benches);
criterion_main!(benches);
