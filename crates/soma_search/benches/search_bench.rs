use criterion::{Criterion, black_box, criterion_group, criterion_main};
use soma_model::PhaseModel;
use soma_search::{SearchConfig, calculate_year};

fn year_scan_bench(c: &mut Criterion) {
    let model = PhaseModel::calibrated();
    let calibrated = SearchConfig::calibrated();
    let fast = SearchConfig::fast();

    let mut group = c.benchmark_group("search_year");
    group.sample_size(30);
    group.bench_function("calculate_year_calibrated", |b| {
        b.iter(|| {
            calculate_year(black_box(&model), black_box(2025), black_box(&calibrated))
                .expect("scan should succeed")
        })
    });
    group.bench_function("calculate_year_fast", |b| {
        b.iter(|| {
            calculate_year(black_box(&model), black_box(2025), black_box(&fast))
                .expect("scan should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, year_scan_bench);
criterion_main!(benches);
