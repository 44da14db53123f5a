use circuit_sat::circuit::Circuit;
use circuit_sat::sat::dpll::Dpll;
use circuit_sat::sat::engine::solve_formula;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Builds a balanced expression tree of the given depth over eight named
/// signals, cycling through the gate operators.
fn balanced_expression(depth: u32, counter: &mut u32) -> String {
    *counter += 1;
    if depth == 0 {
        return format!("s{}", *counter % 8);
    }

    let op = match *counter % 3 {
        0 => "&",
        1 => "|",
        _ => "^",
    };
    let lhs = balanced_expression(depth - 1, counter);
    let rhs = balanced_expression(depth - 1, counter);
    if *counter % 5 == 0 {
        format!("~({lhs} {op} {rhs})")
    } else {
        format!("({lhs} {op} {rhs})")
    }
}

fn bench_parse(c: &mut Criterion) {
    let text = balanced_expression(10, &mut 0);

    c.bench_function("parse_depth_10", |b| {
        b.iter(|| Circuit::parse(black_box(&text)).expect("parse failed"));
    });
}

fn bench_encode(c: &mut Criterion) {
    let text = balanced_expression(10, &mut 0);

    c.bench_function("encode_depth_10", |b| {
        b.iter(|| {
            let circuit = Circuit::parse(black_box(&text)).expect("parse failed");
            black_box(circuit.compile())
        });
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let text = balanced_expression(6, &mut 0);

    c.bench_function("solve_depth_6", |b| {
        b.iter(|| {
            let compiled = Circuit::parse(black_box(&text))
                .expect("parse failed")
                .compile();
            solve_formula(compiled.cnf(), &mut Dpll::new()).expect("engine failed")
        });
    });
}

criterion_group!(benches, bench_parse, bench_encode, bench_pipeline);
criterion_main!(benches);
