//! Extraction throughput over large synthetic namespaces.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Write;

use symcat::namespace::{ClassInfo, ClassRef, FunctionInfo, Module, RuntimeValue, Signature};
use symcat::{Extractor, load_module};

/// `n` classes in chains of depth 4, each bound once more under an alias,
/// plus `n` functions.
fn synthetic(n: usize) -> Module {
    let mut builder = Module::builder("bench.synthetic").version("1.0");
    let mut parent: Option<ClassRef> = None;

    for i in 0..n {
        let mut class = ClassInfo::new(format!("Class{i}"), "bench.synthetic")
            .init(
                Signature::new()
                    .param("units")
                    .param_default("scale", 1.0)
                    .param_default("name", RuntimeValue::None),
            )
            .method(
                "__call__",
                Signature::method().param("inputs").returns("Tensor"),
            );
        if i % 4 != 0 {
            if let Some(parent) = parent.take() {
                class = class.base(parent);
            }
        }
        let class = class.into_ref();
        parent = Some(class.clone());
        builder = builder
            .class(format!("Class{i}"), class.clone())
            .class(format!("class_{i}"), class);

        builder = builder.function(FunctionInfo::new(
            format!("fn_{i}"),
            "bench.synthetic",
            Signature::new().param("x").param_default("axis", -1),
        ));
    }

    builder.build().expect("synthetic module builds")
}

fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::default();
    let mut group = c.benchmark_group("extract");

    for n in [100, 1_000] {
        let module = synthetic(n);
        group.bench_with_input(BenchmarkId::new("classes", n), &module, |b, module| {
            b.iter(|| extractor.extract_classes(black_box(module)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("functions", n), &module, |b, module| {
            b.iter(|| extractor.extract_functions(black_box(module)).unwrap())
        });
    }
    group.finish();
}

fn bench_descriptor(c: &mut Criterion) {
    let functions: Vec<_> = (0..1_000)
        .map(|i| {
            serde_json::json!({
                "name": format!("fn_{i}"),
                "params": [{"name": "x"}, {"name": "alpha", "default": 0.1}]
            })
        })
        .collect();
    let doc = serde_json::json!({"name": "bench.descriptor", "functions": functions});

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(doc.to_string().as_bytes()).unwrap();

    c.bench_function("load_descriptor_1000", |b| {
        b.iter(|| load_module(black_box(file.path())).unwrap())
    });
}

criterion_group!(benches, bench_extract, bench_descriptor);
criterion_main!(benches);
