//! Benchmarks for port-search validation overhead

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use port_search::adapter::MemoryAdapter;
use port_search::port::{bind, AdapterEnv};
use port_search::{ContractSchema, Operation};

/// Generate a query reply with `count` matches
fn generate_matches(count: usize) -> Value {
    let matches: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "title": format!("Document {}", i),
                "tags": ["search", "index", "port"],
            })
        })
        .collect();
    json!({"ok": true, "matches": matches})
}

/// Benchmark argument validation of a point read
fn bench_validate_args(c: &mut Criterion) {
    let schema = ContractSchema::search_port();
    let get_doc = schema.get(Operation::GetDoc);
    let valid = json!({"index": "books", "key": "42"});
    let invalid = json!({"index": 123, "key": "42"});

    c.bench_function("validate_get_doc_args", |b| {
        b.iter(|| black_box(get_doc.args.validate(black_box(&valid)).is_ok()));
    });

    c.bench_function("validate_get_doc_args_mismatch", |b| {
        b.iter(|| black_box(get_doc.args.validate(black_box(&invalid)).is_err()));
    });
}

/// Benchmark result validation for growing query replies
fn bench_validate_query_result(c: &mut Criterion) {
    let query = ContractSchema::search_port().get(Operation::Query);
    let mut group = c.benchmark_group("validate_query_result");

    for count in [10, 100, 1000] {
        let reply = generate_matches(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &reply, |b, reply| {
            b.iter(|| black_box(query.result.validate(reply).is_ok()));
        });
    }

    group.finish();
}

/// Benchmark binding an adapter
fn bench_bind(c: &mut Criterion) {
    let adapter = Arc::new(MemoryAdapter::new());

    c.bench_function("bind_memory_adapter", |b| {
        b.iter(|| black_box(bind(Arc::clone(&adapter), AdapterEnv::default()).is_ok()));
    });
}

/// Benchmark a full validated call through the port
fn bench_bound_call(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let port = bind(Arc::new(MemoryAdapter::new()), AdapterEnv::default()).unwrap();
    let args = json!({"index": "books", "key": "42"});

    c.bench_function("bound_get_doc", |b| {
        b.iter(|| {
            let reply = runtime.block_on(port.call(Operation::GetDoc, args.clone()));
            black_box(reply.is_ok())
        });
    });
}

criterion_group!(
    benches,
    bench_validate_args,
    bench_validate_query_result,
    bench_bind,
    bench_bound_call,
);
criterion_main!(benches);
