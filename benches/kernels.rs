use criterion::{Criterion, criterion_group, criterion_main};

use textcol::{ContainsOptions, DType, StringColumn};

fn build_column(rows: usize) -> StringColumn {
    let values: Vec<Option<String>> = (0..rows)
        .map(|i| {
            if i % 7 == 0 {
                None
            } else {
                Some(format!("row-{}-payload", i % 1000))
            }
        })
        .collect();
    StringColumn::from_host("bench", &values).unwrap()
}

fn bench_contains(c: &mut Criterion) {
    let col = build_column(100_000);
    let opts = ContainsOptions {
        regex: false,
        ..Default::default()
    };
    c.bench_function("contains_literal_100k", |b| {
        b.iter(|| col.str().contains("payload", &opts).unwrap())
    });
}

fn bench_lower(c: &mut Criterion) {
    let col = build_column(100_000);
    c.bench_function("lower_100k", |b| b.iter(|| col.str().lower().unwrap()));
}

fn bench_sort(c: &mut Criterion) {
    let col = build_column(50_000);
    c.bench_function("order_50k", |b| {
        b.iter(|| col.storage().order(true, false).unwrap())
    });
}

fn bench_cast(c: &mut Criterion) {
    let values: Vec<Option<String>> = (0..100_000).map(|i| Some(i.to_string())).collect();
    let col = StringColumn::from_host("bench", &values).unwrap();
    c.bench_function("cast_int64_100k", |b| {
        b.iter(|| col.as_numerical_column(DType::Int64).unwrap())
    });
}

criterion_group!(benches, bench_contains, bench_lower, bench_sort, bench_cast);
criterion_main!(benches);
