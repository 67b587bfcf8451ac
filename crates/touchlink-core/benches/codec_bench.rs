//! Criterion benchmarks for the touchlink wire codec.
//!
//! Framing sits on the event hot path — every processed gesture event turns
//! into one frame — so encode latency here bounds end-to-end input latency.
//!
//! Run with:
//! ```bash
//! cargo bench --package touchlink-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use touchlink_core::protocol::codec::{
    decode_event_body, decode_frame, decode_gesture_list, encode_frame, encode_gesture_list,
};
use touchlink_core::protocol::messages::{GestureDescriptor, MessageType};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A typical event payload: group ID plus a 24-byte event blob.
fn make_event_payload() -> Vec<u8> {
    let mut payload = Vec::with_capacity(28);
    payload.extend_from_slice(&7i32.to_be_bytes());
    payload.extend_from_slice(&[0xAB; 24]);
    payload
}

fn make_id_list(len: i32) -> Vec<GestureDescriptor> {
    (0..len).map(GestureDescriptor::Id).collect()
}

fn make_mixed_list() -> Vec<GestureDescriptor> {
    vec![
        GestureDescriptor::Id(0),
        GestureDescriptor::Name("org.example.PinchGesture".to_string()),
        GestureDescriptor::Id(5),
        GestureDescriptor::Name("org.example.SwipeGesture".to_string()),
        GestureDescriptor::Name("org.example.RotateGesture".to_string()),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `encode_frame` across payload sizes.
fn bench_encode_frame(c: &mut Criterion) {
    let payloads: &[(&str, Vec<u8>)] = &[
        ("empty", Vec::new()),
        ("event_28b", make_event_payload()),
        ("blob_1k", vec![0x5A; 1024]),
    ];

    let mut group = c.benchmark_group("encode_frame");
    for (name, payload) in payloads {
        group.bench_with_input(BenchmarkId::new("payload", name), payload, |b, payload| {
            b.iter(|| encode_frame(black_box(MessageType::Event), black_box(payload)))
        });
    }
    group.finish();
}

/// Benchmarks gesture list encode and decode across list shapes.
fn bench_gesture_list(c: &mut Criterion) {
    let lists: &[(&str, Vec<GestureDescriptor>)] = &[
        ("ids_8", make_id_list(8)),
        ("ids_64", make_id_list(64)),
        ("mixed_5", make_mixed_list()),
    ];

    let mut group = c.benchmark_group("gesture_list");
    for (name, list) in lists {
        group.bench_with_input(BenchmarkId::new("encode", name), list, |b, list| {
            b.iter(|| encode_gesture_list(black_box(list)).expect("encode must succeed"))
        });

        let reply = encode_gesture_list(list).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("decode", name), &reply, |b, reply| {
            b.iter(|| decode_gesture_list(black_box(reply)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks the event hot path: frame an event payload, then decode it back.
fn bench_event_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_hot_path");

    let payload = make_event_payload();
    group.bench_function("encode_frame", |b| {
        b.iter(|| encode_frame(black_box(MessageType::Event), black_box(&payload)))
    });

    let frame_bytes = encode_frame(MessageType::Event, &payload);
    group.bench_function("decode_frame_and_body", |b| {
        b.iter(|| {
            let (frame, _) = decode_frame(black_box(&frame_bytes)).unwrap();
            decode_event_body(black_box(&frame.payload)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_frame,
    bench_gesture_list,
    bench_event_roundtrip
);
criterion_main!(benches);
