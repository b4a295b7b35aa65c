use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schemelet::Interpreter;

fn factorial_benchmark(c: &mut Criterion) {
    let mut interp = Interpreter::new();
    interp
        .run("(define (fact n) (if (<= n 1) 1 (* n (fact (- n 1)))))")
        .unwrap();

    c.bench_function("fact 20", |b| {
        b.iter(|| interp.run(black_box("(fact 20)")).unwrap())
    });
}

criterion_group!(benches, factorial_benchmark);
criterion_main!(benches);
