use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_properties::{from_str, parse_slice, parse_str, to_string, PropertyTable};

#[derive(Serialize, Deserialize, Clone)]
struct Server {
    host: String,
    port: u16,
    secure: bool,
    aliases: Vec<String>,
}

fn document(entries: usize) -> String {
    let mut text = String::from("# generated\n");
    for i in 0..entries {
        text.push_str(&format!(
            "section{}.key{} = value number {} with \\u00e9scapes \\\n    and a continuation\n",
            i % 7,
            i,
            i
        ));
    }
    text
}

fn benchmark_decode_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_document");

    for size in [10, 100, 1000].iter() {
        let text = document(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_slice(black_box(text.as_bytes())))
        });
    }
    group.finish();
}

fn benchmark_render_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_canonical");

    for size in [10, 100, 1000].iter() {
        let table: PropertyTable = parse_str(&document(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(table).to_canonical_string())
        });
    }
    group.finish();
}

fn benchmark_typed_round_trip(c: &mut Criterion) {
    let server = Server {
        host: "example.org".to_string(),
        port: 8443,
        secure: true,
        aliases: vec!["www".to_string(), "api".to_string()],
    };
    let text = to_string(&server).unwrap();

    c.bench_function("serialize_struct", |b| {
        b.iter(|| to_string(black_box(&server)))
    });

    c.bench_function("deserialize_struct", |b| {
        b.iter(|| from_str::<Server>(black_box(&text)))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let table: PropertyTable = parse_str(&document(100)).unwrap();
    let json = serde_json::to_string(&table).unwrap();
    let properties = table.to_canonical_string();

    let mut group = c.benchmark_group("format_comparison");

    group.bench_function("properties_decode", |b| {
        b.iter(|| parse_str(black_box(&properties)))
    });

    group.bench_function("json_decode", |b| {
        b.iter(|| serde_json::from_str::<PropertyTable>(black_box(&json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_document,
    benchmark_render_canonical,
    benchmark_typed_round_trip,
    benchmark_comparison_with_json
);
criterion_main!(benches);
