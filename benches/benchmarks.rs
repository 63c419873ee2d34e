//! Performance benchmarks for treecat

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::io;
use treecat::concat::concatenate_to_writer;
use treecat::test_utils::TestTree;
use treecat::{ConcatRequest, Preset, generate_secret};

const JS_SOURCE: &str = r#"/**
 * Main application module
 * Provides core functionality
 */

function main() {
    console.log("Hello, world!");
}
"#;

fn create_project_with_files(file_count: usize) -> TestTree {
    let tree = TestTree::new();
    tree.add_node_project("server");

    for i in 0..file_count {
        tree.add_file(&format!("server/src/module_{}/index.js", i % 20), JS_SOURCE);
        tree.add_file(&format!("server/src/module_{}/file_{}.js", i % 20, i), JS_SOURCE);
        tree.add_file(
            &format!("server/node_modules/dep_{}/index.js", i),
            JS_SOURCE,
        );
    }

    tree
}

fn bench_concatenate(c: &mut Criterion) {
    let mut group = c.benchmark_group("concatenate");

    for &count in &[10usize, 100, 500] {
        let tree = create_project_with_files(count);
        let request = ConcatRequest::from_preset(
            Preset::Node,
            tree.path().join("server"),
            tree.path().join("out.txt"),
        );

        group.bench_function(format!("{}_files", count), |b| {
            b.iter(|| concatenate_to_writer(black_box(&request), &mut io::sink()).unwrap())
        });
    }

    group.finish();
}

fn bench_generate_secret(c: &mut Criterion) {
    c.bench_function("generate_secret_50", |b| {
        b.iter(|| generate_secret(black_box(50)).unwrap())
    });
}

criterion_group!(benches, bench_concatenate, bench_generate_secret);
criterion_main!(benches);
