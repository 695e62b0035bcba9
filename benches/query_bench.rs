// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use yellowlab::{ParamValue, QuerySerializer};

fn flat_query_benchmark(c: &mut Criterion) {
    let serializer = QuerySerializer::default();
    let params = ParamValue::map()
        .with("q", "rust")
        .with("page", 2)
        .with("per_page", 50)
        .with("sort", "stars");

    c.bench_function("serialize_flat", |b| {
        b.iter(|| black_box(serializer.serialize(black_box(&params))))
    });
}

fn nested_query_benchmark(c: &mut Criterion) {
    let serializer = QuerySerializer::new("filter");
    let params = ParamValue::from(json!({
        "name": "Test",
        "person": {
            "age": 50,
            "address": { "city": "Helsinki", "zip": "00100" },
            "tags": ["a", "b", "c"]
        },
        "active": true
    }));

    c.bench_function("serialize_nested", |b| {
        b.iter(|| black_box(serializer.serialize(black_box(&params))))
    });
}

criterion_group!(benches, flat_query_benchmark, nested_query_benchmark);
criterion_main!(benches);
