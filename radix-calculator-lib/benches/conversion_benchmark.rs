use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use radix_calculator::interpreter::evaluate;
use radix_calculator::radix::{from_base, to_base, Radix};

fn evaluation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let expressions = [
        "2+3*4",
        "2(3+4)pi",
        "sqrt(2)^3 + sin(1)cos(2) - 7 % 3",
        "0xFF * 1.5e-3 + 10!",
        "2 1/3",
    ];
    for expression in expressions {
        group.throughput(Throughput::Bytes(expression.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(expression),
            &expression,
            |bencher, expression| {
                bencher.iter(|| evaluate(black_box(expression)));
            },
        );
    }
}

fn conversion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_base");
    for radix in Radix::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(radix), &radix, |bencher, radix| {
            bencher.iter(|| to_base(black_box(123_456.789), radix.base(), 10));
        });
    }
    group.finish();

    c.bench_function("from_base", |bencher| {
        bencher.iter(|| from_base(black_box("1E240.C9FBE76C8B"), 16));
    });
}

criterion_group!(benches, evaluation_benchmark, conversion_benchmark);
criterion_main!(benches);
