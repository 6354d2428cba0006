use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sk_general::data::{
    dict_to_iter, iter_to_dict, ConversionOptions, DataHandler, DataHandling, Shape, Value,
};

fn sequence(n: usize) -> Value {
    Value::Seq((0..n as i64).map(Value::Int).collect())
}

fn bench_iter_to_dict(c: &mut Criterion) {
    let options = ConversionOptions::default();
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("iter_to_dict", size), size, |b, &n| {
            let data = sequence(n);
            b.iter(|| {
                let out = iter_to_dict(black_box(data.clone()), &options).unwrap();
                black_box(out);
            });
        });
    }
}

fn bench_dict_to_iter(c: &mut Criterion) {
    let options = ConversionOptions::new().with_prepend_keys(true);
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("dict_to_iter", size), size, |b, &n| {
            let data = iter_to_dict(sequence(n), &ConversionOptions::default()).unwrap();
            b.iter(|| {
                let out = dict_to_iter(black_box(data.clone()), &options).unwrap();
                black_box(out);
            });
        });
    }
}

fn bench_handler_run(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("handler_run", size), size, |b, &n| {
            let mut handler = DataHandler::builder()
                .input_type(Shape::ITER)
                .transformation_type(Shape::DICT)
                .output_type(Shape::ITER)
                .transformer(|data| Ok(data))
                .build();
            let data = sequence(n);
            b.iter(|| {
                let out = handler.run(black_box(data.clone())).unwrap();
                black_box(out);
            });
        });
    }
}

criterion_group!(
    benches,
    bench_iter_to_dict,
    bench_dict_to_iter,
    bench_handler_run
);
criterion_main!(benches);
