use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use safe_stringify::{
    serialize, serialize_with_options, to_value, Array, Object, StringifyOptions, Value,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn products(size: usize) -> Value {
    let items: Vec<Product> = (0..size)
        .map(|i| Product {
            sku: format!("SKU-{:04}", i),
            name: format!("Product {}", i),
            price: 9.99 + i as f64,
            quantity: (i % 10) as u32,
        })
        .collect();
    to_value(&items).unwrap_or_default()
}

/// A chain `depth` objects long whose tail points back at the head.
fn cyclic_chain(depth: usize) -> Value {
    let head = Object::new();
    let mut current = head.clone();
    for i in 0..depth {
        let next = Object::new();
        next.set("index", i as i32);
        current.set("next", next.clone());
        current = next;
    }
    current.set("next", head.clone());
    head.into()
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let value = to_value(&user()).unwrap_or_default();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| serialize(black_box(&value)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let value = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| serialize(black_box(value)))
        });
    }

    group.finish();
}

fn benchmark_compact_vs_pretty(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let value = products(100);
    let compact = StringifyOptions::new().with_indent(0);
    let pretty = StringifyOptions::new().with_indent(4);

    group.bench_function("compact", |b| {
        b.iter(|| serialize_with_options(black_box(&value), &compact))
    });
    group.bench_function("pretty", |b| {
        b.iter(|| serialize_with_options(black_box(&value), &pretty))
    });

    group.finish();
}

fn benchmark_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("cyclic_chain");
    let options = StringifyOptions::new().with_max_depth(64);

    for depth in [8, 32, 64].iter() {
        let value = cyclic_chain(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &value, |b, value| {
            b.iter(|| serialize_with_options(black_box(value), &options))
        });
    }

    group.finish();
}

fn benchmark_wide_array(c: &mut Criterion) {
    let arr: Array = (0..1000).map(|i| Value::from(i as f64 * 0.5)).collect();
    let value = Value::from(arr);

    c.bench_function("serialize_wide_numeric_array", |b| {
        b.iter(|| serialize(black_box(&value)))
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_serialize_array,
    benchmark_compact_vs_pretty,
    benchmark_cycles,
    benchmark_wide_array
);
criterion_main!(benches);
