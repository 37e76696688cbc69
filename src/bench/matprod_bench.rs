use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use matprod::init::RandomStream;
use matprod::{
    BenchConfig, ColMajor, ExecutionConfig, ExecutionSpace, Layout, Problem, RowMajor, matrix_product,
};

fn bench_layout<LA: Layout, LB: Layout>(c: &mut Criterion, label: &str) {
    let space = ExecutionSpace::new(&ExecutionConfig::default()).unwrap();
    let mut group = c.benchmark_group(format!("matrix_product/{}", label));

    for size in [64, 128, 256] {
        let config = BenchConfig::new(size, size, size);
        let mut stream = RandomStream::new(config.seed);
        let problem = Problem::<LA, LB>::new(&space, &config, &mut stream).unwrap();

        group.throughput(Throughput::Elements((2 * size * size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &problem, |bencher, p| {
            bencher.iter_batched_ref(
                || p.c.clone(),
                |out| space.install(|| matrix_product(p.alpha, &p.a, &p.b, p.beta, out)),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_layouts(c: &mut Criterion) {
    bench_layout::<RowMajor, RowMajor>(c, "right_right");
    bench_layout::<RowMajor, ColMajor>(c, "right_left");
    bench_layout::<ColMajor, RowMajor>(c, "left_right");
    bench_layout::<ColMajor, ColMajor>(c, "left_left");
}

fn bench_init(c: &mut Criterion) {
    let space = ExecutionSpace::new(&ExecutionConfig::default()).unwrap();
    let mut group = c.benchmark_group("fill");
    for size in [256, 1024] {
        let mut m = matprod::DenseMatrix::<ColMajor>::new("A", size, size).unwrap();
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| space.install(|| matprod::fill(&mut RandomStream::new(42), &mut m)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layouts, bench_init);
criterion_main!(benches);
