use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image4d::{index, translate, Extent, ImageView, ImageViewMut, Slice, TypedImage};

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    group.bench_function("scalar", |b| b.iter(|| translate(black_box((3, 1, 0, 2)))));
    group.bench_function("view", |b| {
        b.iter(|| translate(black_box(index![1.., ..=5, -1])))
    });
    group.bench_function("parse", |b| {
        b.iter(|| black_box("10:20, ::-1, 0").parse::<image4d::IndexExpr>())
    });
    group.finish();
}

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");
    for size in [64usize, 512] {
        let extent = Extent::new(size, size, 1, 3);
        let mut image = TypedImage::<f32>::new(extent);
        let reversed = Slice::full().with_step(-1);

        group.bench_with_input(BenchmarkId::new("read_scalar", size), &size, |b, _| {
            b.iter(|| image.read(black_box((5, 7, 0, 1))).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("read_view", size), &size, |b, _| {
            b.iter(|| image.read((reversed, 1..)).unwrap())
        });

        let row = vec![1f32; size];
        group.bench_with_input(BenchmarkId::new("write_broadcast", size), &size, |b, &size| {
            b.iter(|| {
                let value = image4d::ArrayRef::new(&[size], &row).unwrap();
                image.write((.., ..), value).unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("add_scalar", size), &size, |b, _| {
            b.iter(|| image.add_scalar(0.5))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_translate, bench_access);
criterion_main!(benches);
