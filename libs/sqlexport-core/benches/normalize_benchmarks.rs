use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlexport_core::{normalize_date, DateNormalizer, NaiveDate, RawDateValue};

fn sample_values() -> Vec<(&'static str, RawDateValue)> {
    vec![
        ("text_dotted", RawDateValue::from("04.02.1992")),
        ("text_month_name", RawDateValue::from("Tuesday, 28th of August 2018")),
        ("text_timestamp", RawDateValue::from("2018-08-28T10:14:47Z")),
        ("integer_epoch", RawDateValue::IntegerEpoch(1_535_516_087)),
        ("float_epoch", RawDateValue::FloatEpoch(1_535_516_087.322_354)),
        (
            "calendar",
            RawDateValue::Calendar(NaiveDate::from_ymd_opt(2018, 8, 28).unwrap()),
        ),
    ]
}

fn bench_single_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_single");

    for (name, value) in sample_values() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &value, |b, value| {
            b.iter(|| black_box(normalize_date(black_box(value))));
        });
    }

    group.finish();
}

fn bench_row_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_batch");
    let normalizer = DateNormalizer::new();

    for size in [100_usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let rows: Vec<RawDateValue> = (0..*size)
            .map(|i| match i % 3 {
                0 => RawDateValue::IntegerEpoch(1_535_516_087 + i as i64 * 86_400),
                1 => RawDateValue::from(format!("{:02}/{:02}/2018", i % 12 + 1, i % 28 + 1)),
                _ => RawDateValue::FloatEpoch(1_535_516_087.5 - i as f64 * 3_600.0),
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let normalized: Vec<_> = rows.iter().map(|row| normalizer.normalize(row)).collect();
                black_box(normalized);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_value, bench_row_batches);
criterion_main!(benches);
