// Signing & verification benchmarks for the ledger codec.
//
// Covers key generation, raw scheme sign/verify for both algorithms, full
// transaction signing, and multi-signature assembly at various signer counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledger_codec::crypto::{scheme_for, KeyType, PrivateKey};
use ledger_codec::logging::{try_init_logging, LogFormat};
use ledger_codec::transaction::SigningPipeline;
use ledger_codec::types::{AccountId, Amount, StObject};

const KEY_TYPES: [KeyType; 2] = [KeyType::Ed25519, KeyType::Secp256k1];

fn payment() -> StObject {
    StObject::new()
        .with("TransactionType", 0u16)
        .with("Flags", 0x8000_0000u32)
        .with("Account", AccountId::new([0x11; 20]))
        .with("Destination", AccountId::new([0x22; 20]))
        .with("Amount", Amount::drops(1_000_000).unwrap())
        .with("Fee", Amount::drops(10).unwrap())
        .with("Sequence", 42u32)
}

fn bench_key_generation(c: &mut Criterion) {
    // Quiet by default; RUST_LOG=ledger_codec=trace shows the codec's events.
    let _ = try_init_logging("warn", LogFormat::Pretty);
    for key_type in KEY_TYPES {
        c.bench_function(&format!("{key_type}/key_generate"), |b| {
            b.iter(|| PrivateKey::generate(key_type));
        });
    }
}

fn bench_scheme(c: &mut Criterion) {
    let message = b"STX\0canonical transaction bytes go here";
    for key_type in KEY_TYPES {
        let key = PrivateKey::generate(key_type);
        let public = key.public_key();
        let scheme = scheme_for(key_type);
        let signature = scheme.sign(message, &key).unwrap();

        c.bench_function(&format!("{key_type}/sign_message"), |b| {
            b.iter(|| scheme.sign(message, &key).unwrap());
        });
        c.bench_function(&format!("{key_type}/verify_message"), |b| {
            b.iter(|| scheme.verify(message, signature.as_bytes(), &public).unwrap());
        });
    }
}

fn bench_sign_transaction(c: &mut Criterion) {
    let pipeline = SigningPipeline::default();
    let tx = payment();
    for key_type in KEY_TYPES {
        let key = PrivateKey::generate(key_type);
        let signed = pipeline.sign(&tx, &key).unwrap();
        let public = key.public_key();

        c.bench_function(&format!("{key_type}/sign_transaction"), |b| {
            b.iter(|| pipeline.sign(&tx, &key).unwrap());
        });
        c.bench_function(&format!("{key_type}/verify_transaction"), |b| {
            b.iter(|| pipeline.verify(signed.signed(), &public).unwrap());
        });
    }
}

fn bench_multisign(c: &mut Criterion) {
    let pipeline = SigningPipeline::default();
    let tx = payment();
    let mut group = c.benchmark_group("multisign/combine_and_verify");

    for size in [1u8, 4, 8, 32] {
        let entries: Vec<_> = (0..size)
            .map(|i| {
                let key = PrivateKey::generate(KeyType::Ed25519);
                pipeline
                    .multi_sign(&tx, &key, AccountId::new([i; 20]))
                    .unwrap()
            })
            .collect();

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let combined = pipeline.combine_multisigned(&tx, entries.clone()).unwrap();
                assert!(pipeline.verify_multisigned(combined.signed()).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_generation,
    bench_scheme,
    bench_sign_transaction,
    bench_multisign,
);
criterion_main!(benches);
