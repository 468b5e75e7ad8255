use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use sealshare::{codec, recover_secret, split_secret, Options, SecretSharing, Share};

const SECRET: &[u8; 32] = &[0x5a; 32];

fn split(c: &mut Criterion) {
    let sss = SecretSharing::new(10, 255).unwrap();

    c.bench_function("split_32_bytes_10_of_255", |b| {
        b.iter(|| sss.split(black_box(SECRET)))
    });
    c.bench_function("split_secret_authenticated_3_of_5", |b| {
        b.iter(|| split_secret(black_box(SECRET), 3, 5, &Options::authenticated()))
    });
}

fn recover(c: &mut Criterion) {
    let sss = SecretSharing::new(255, 255).unwrap();
    let shares = sss.split(SECRET);

    c.bench_function("recover_32_bytes_255_shares", |b| {
        b.iter(|| SecretSharing::recover(black_box(&shares)))
    });

    let options = Options::authenticated();
    let records = split_secret(SECRET, 3, 5, &options).unwrap();
    c.bench_function("recover_secret_authenticated_3_of_5", |b| {
        b.iter(|| recover_secret(black_box(&records[..3]), &options))
    });
}

fn record(c: &mut Criterion) {
    let share = Share {
        index: 1,
        threshold: 2,
        total: 3,
        payload: SECRET.to_vec(),
    };
    let text = codec::encode_share(&share).unwrap();

    c.bench_function("share_to_record", |b| {
        b.iter(|| codec::encode_share(black_box(&share)))
    });
    c.bench_function("share_from_record", |b| {
        b.iter(|| codec::decode(black_box(&text)))
    });
}

criterion_group!(benches, split, recover, record);
criterion_main!(benches);
