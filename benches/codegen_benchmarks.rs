//! Performance benchmarks for estree-codegen
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Loading ESTree JSON into typed nodes
//! - Pretty and compact generation of a mid-sized program
//! - Source map overhead
//! - Scaling with statement count and expression depth

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use estree_codegen::{ast, generate, GenerationOptions};
use serde_json::{json, Value};

fn id(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn loc(line: u32) -> Value {
    json!({ "start": { "line": line, "column": 0 }, "end": { "line": line, "column": 10 } })
}

/// `function fN(a, b) { if (a > b) { return a * N; } return b + 'N'; }`
fn function_decl(n: usize) -> Value {
    let body = json!([
        {
            "type": "IfStatement",
            "test": { "type": "BinaryExpression", "operator": ">", "left": id("a"), "right": id("b") },
            "consequent": { "type": "BlockStatement", "body": [{
                "type": "ReturnStatement",
                "argument": { "type": "BinaryExpression", "operator": "*", "left": id("a"),
                              "right": { "type": "Literal", "value": n } }
            }]}
        },
        {
            "type": "ReturnStatement",
            "argument": { "type": "BinaryExpression", "operator": "+", "left": id("b"),
                          "right": { "type": "Literal", "value": n.to_string() } }
        }
    ]);
    json!({
        "type": "FunctionDeclaration",
        "id": id(&format!("f{}", n)),
        "params": [id("a"), id("b")],
        "body": { "type": "BlockStatement", "body": body },
        "loc": loc(n as u32 + 1)
    })
}

fn program(statements: usize) -> Value {
    let body: Vec<Value> = (0..statements).map(function_decl).collect();
    json!({ "type": "Program", "sourceType": "script", "body": body })
}

/// `x + x + ... + x`, left-nested `depth` times
fn addition_chain(depth: usize) -> Value {
    (0..depth).fold(id("x"), |left, _| {
        json!({ "type": "BinaryExpression", "operator": "+", "left": left, "right": id("x") })
    })
}

/// Benchmark: JSON loading
fn bench_load(c: &mut Criterion) {
    let json = program(100).to_string();
    c.bench_function("load_json", |b| b.iter(|| ast::from_json(black_box(&json)).unwrap()));
}

/// Benchmark: Layout modes
fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let tree = ast::from_value(program(100)).unwrap();

    group.bench_function("pretty", |b| {
        let options = GenerationOptions::default();
        b.iter(|| generate(black_box(&tree), &options).unwrap())
    });

    group.bench_function("compact", |b| {
        let options = GenerationOptions::compact();
        b.iter(|| generate(black_box(&tree), &options).unwrap())
    });

    group.finish();
}

/// Benchmark: Source map generation
fn bench_source_map(c: &mut Criterion) {
    let tree = ast::from_value(program(100)).unwrap();
    let options = GenerationOptions::default()
        .with_source_map("input.js")
        .with_source_map_with_code(true);
    c.bench_function("source_map", |b| b.iter(|| generate(black_box(&tree), &options).unwrap()));
}

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(50);

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("statements", size), size, |b, &size| {
            let tree = ast::from_value(program(size)).unwrap();
            let options = GenerationOptions::default();
            b.iter(|| generate(black_box(&tree), &options).unwrap())
        });
    }

    for depth in [10, 100, 400].iter() {
        group.bench_with_input(BenchmarkId::new("expression_depth", depth), depth, |b, &depth| {
            let tree = ast::from_value(addition_chain(depth)).unwrap();
            let options = GenerationOptions::default();
            b.iter(|| generate(black_box(&tree), &options).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_layouts, bench_source_map, bench_scalability);

criterion_main!(benches);
