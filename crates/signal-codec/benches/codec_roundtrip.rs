// SPDX-License-Identifier: MIT OR Apache-2.0
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use signal_codec::{decode, decode_many, encode, encode_many};
use signal_core::Signal;

fn signal(i: usize) -> Signal {
    Signal::builder("user.profile.updated")
        .source(format!("svc.users/{i}"))
        .subject(format!("user-{i}"))
        .data(serde_json::json!({"field": "email", "value": format!("user{i}@example.com")}))
        .build()
        .unwrap()
}

fn bench_encode_signal(c: &mut Criterion) {
    let s = signal(0);
    c.bench_function("encode_signal", |b| {
        b.iter(|| encode(black_box(&s)).unwrap());
    });
}

fn bench_decode_signal(c: &mut Criterion) {
    let s = signal(0);
    let json = encode(&s).unwrap();
    c.bench_function("decode_signal", |b| {
        b.iter(|| decode(black_box(&json)).unwrap());
    });
}

fn bench_encode_many_100(c: &mut Criterion) {
    let signals: Vec<Signal> = (0..100).map(signal).collect();
    c.bench_function("encode_many_100", |b| {
        b.iter(|| encode_many(black_box(&signals)).unwrap());
    });
}

fn bench_decode_many_100(c: &mut Criterion) {
    let signals: Vec<Signal> = (0..100).map(signal).collect();
    let json = encode_many(&signals).unwrap();
    c.bench_function("decode_many_100", |b| {
        b.iter(|| {
            let decoded = decode_many(black_box(&json)).unwrap();
            assert_eq!(decoded.len(), 100);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_signal,
    bench_decode_signal,
    bench_encode_many_100,
    bench_decode_many_100,
);
criterion_main!(benches);
