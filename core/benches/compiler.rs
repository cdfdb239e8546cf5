//! Benchmarks for the expression compiler.
//!
//! Run with: `cargo bench --bench compiler` in the core/ directory.
//!
//! Benchmark groups:
//! 1. deep_conditionals: nested ternaries over comparisons and `or`
//! 2. array_literal: large primitive array literals

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stackgen_core::{
    bytecode::Code,
    compiler::ExpressionCompiler,
    expr::{Expr, ExprBuilder},
    references::LocalVariable,
    types,
};

/// `n > 0 || n == k ? k : <next>`, `depth` levels deep.
fn deep_conditional<'a>(b: ExprBuilder<'a>, n: &'a LocalVariable, depth: i32) -> &'a Expr<'a> {
    let mut expr = b.int(-1);
    for k in 0..depth {
        let test = b.or(
            b.gt(b.load(n), b.int(k), &types::INT),
            b.eq(b.load(n), b.int(k * 1000), &types::INT),
        );
        expr = b.ternary(test, b.int(k), expr);
    }
    expr
}

fn bench_deep_conditionals(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_conditionals");
    let n = LocalVariable::new(1, types::INT.clone());

    for depth in [10, 100, 1000] {
        let arena = Bump::new();
        let expr = deep_conditional(ExprBuilder::new(&arena), &n, depth);

        group.bench_with_input(BenchmarkId::from_parameter(depth), expr, |bench, expr| {
            bench.iter(|| {
                let mut compiler = ExpressionCompiler::new(Code::new());
                compiler.compile(black_box(expr)).unwrap();
                black_box(compiler.finish().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_array_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_literal");

    for len in [16, 256, 4096] {
        let arena = Bump::new();
        let b = ExprBuilder::new(&arena);
        let elements: Vec<&Expr<'_>> = (0..len).map(|i| b.int(i * 37)).collect();
        let expr = b.new_array(&types::INT, &elements);

        group.bench_with_input(BenchmarkId::from_parameter(len), expr, |bench, expr| {
            bench.iter(|| ExpressionCompiler::compile_to_code(black_box(expr)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_deep_conditionals, bench_array_literal);
criterion_main!(benches);
