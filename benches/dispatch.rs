use std::hint::black_box;
use std::sync::mpsc;

use criterion::{Criterion, criterion_group, criterion_main};
use fractal_dispatch::{
    AreaSize, Batch, Dispatcher, DispatcherConfig, GenerationRequest, InlineWorkerPool,
    MoveOffset, NeverCancel, RayonWorkerPool, compute_row,
};

fn request() -> GenerationRequest {
    GenerationRequest::new(AreaSize::new(320, 240), MoveOffset::new(-0.75, 0.0), 0.01, 256)
}

fn bench_compute_row(c: &mut Criterion) {
    let req = request();

    c.bench_function("compute_row_320px", |b| {
        b.iter(|| compute_row(black_box(120), &req, &NeverCancel, 1))
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_320x240");
    group.sample_size(20);

    group.bench_function("inline", |b| {
        let dispatcher =
            Dispatcher::new(InlineWorkerPool, |_: Batch| {}, DispatcherConfig::default())
                .expect("default config is valid");
        let mut offset = 0.0;
        b.iter(|| {
            // vary the view so every iteration is a fresh generation
            offset += 1e-9;
            let mut req = request();
            req.move_offset.y = offset;
            dispatcher.submit_generation(req)
        })
    });

    group.bench_function("rayon", |b| {
        let (tx, rx) = mpsc::channel::<Batch>();
        let pool = RayonWorkerPool::new(None).expect("pool builds");
        let dispatcher =
            Dispatcher::new(pool, tx, DispatcherConfig::default()).expect("default config is valid");
        let mut offset = 0.0;
        b.iter(|| {
            offset += 1e-9;
            let mut req = request();
            req.move_offset.y = offset;
            let generation = dispatcher.submit_generation(req);
            while let Ok(batch) = rx.recv() {
                if Some(batch.generation) == generation && batch.completes_generation() {
                    break;
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_compute_row, bench_generation);
criterion_main!(benches);
