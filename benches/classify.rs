//! Log batch classification benchmark.
//!
//! Measures decode + classify + emit for one poll batch at different sizes
//! and traffic mixes.
//!
//! Run with: cargo bench --bench classify
//! Results saved to: target/criterion/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;

use chrome_ws_listener::protocol::{WEBSOCKET_CREATED, WEBSOCKET_FRAME_RECEIVED, WEBSOCKET_FRAME_SENT};
use chrome_ws_listener::{LogEntry, MalformedEntryPolicy, MessageQueue, Relay};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const BATCH_SIZES: &[usize] = &[10, 100, 1000];
const CONNECTIONS: usize = 8;

// ============================================================================
// Fixtures
// ============================================================================

/// A batch dominated by frames, with a creation event per connection and
/// some unrelated network noise.
fn mixed_batch(size: usize) -> Vec<LogEntry> {
    let mut entries = Vec::with_capacity(size);

    for conn in 0..CONNECTIONS.min(size) {
        entries.push(LogEntry::performance(
            WEBSOCKET_CREATED,
            json!({ "requestId": format!("{conn}.1"), "url": format!("wss://feed{conn}.example.com/ws") }),
        ));
    }

    let mut i = entries.len();
    while entries.len() < size {
        let conn = i % CONNECTIONS;
        let method = match i % 5 {
            0 => "Network.requestWillBeSent",
            1 | 2 => WEBSOCKET_FRAME_SENT,
            _ => WEBSOCKET_FRAME_RECEIVED,
        };
        entries.push(LogEntry::performance(
            method,
            json!({
                "requestId": format!("{conn}.1"),
                "timestamp": i as f64 * 0.001,
                "response": { "opcode": 1, "mask": false, "payloadData": format!("{{\"seq\":{i},\"op\":\"tick\"}}") }
            }),
        ));
        i += 1;
    }

    entries
}

// ============================================================================
// Benchmark: Batch Processing
// ============================================================================

fn bench_process_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_batch");

    for &size in BATCH_SIZES {
        let batch = mixed_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| {
                let queue = MessageQueue::new();
                let mut relay = Relay::new(queue.clone(), false);
                relay
                    .process_batch(batch, MalformedEntryPolicy::Fatal)
                    .expect("well-formed batch");
                queue.drain()
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Classification Only
// ============================================================================

fn bench_classify_entry(c: &mut Criterion) {
    let entry = LogEntry::performance(
        WEBSOCKET_FRAME_RECEIVED,
        json!({ "requestId": "1.1", "timestamp": 12.5, "response": { "payloadData": "x".repeat(512) } }),
    );

    c.bench_function("classify_frame_512b", |b| {
        b.iter(|| entry.classify().expect("classify"));
    });
}

criterion_group!(benches, bench_process_batch, bench_classify_entry);
criterion_main!(benches);
