use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use na_replace::replace::{ReplaceOptions, Replacement, ReplacementValues, replace_na};
use na_replace::types::{DataType, Series, Value};

fn float_series_with_gaps(len: usize, gap_every: usize) -> Series {
    let values = (0..len)
        .map(|i| {
            if i % gap_every == 0 {
                Value::Null
            } else {
                Value::Float64(i as f64)
            }
        })
        .collect();
    Series::new("reading", DataType::Float64, values)
}

fn categorical_series_with_gaps(len: usize, gap_every: usize) -> Series {
    let levels = vec!["low".to_string(), "mid".to_string(), "high".to_string()];
    let values = (0..len)
        .map(|i| {
            if i % gap_every == 0 {
                Value::Null
            } else {
                Value::Utf8(levels[i % levels.len()].clone())
            }
        })
        .collect();
    Series::categorical("band", values, levels)
}

fn bench_scalar_broadcast(c: &mut Criterion) {
    let base = float_series_with_gaps(10_000, 10);
    let options = ReplaceOptions::default();

    c.bench_function("scalar_broadcast_10k", |b| {
        b.iter_batched(
            || base.clone(),
            |series| replace_na(black_box(series), Some(Replacement::scalar(0.0)), &options),
            BatchSize::SmallInput,
        )
    });
}

fn bench_vector_positional(c: &mut Criterion) {
    let base = float_series_with_gaps(10_000, 10);
    let fill: Vec<Value> = (0..base.len()).map(|i| Value::Float64(i as f64)).collect();
    let options = ReplaceOptions::default();

    c.bench_function("vector_positional_10k", |b| {
        b.iter_batched(
            || (base.clone(), fill.clone()),
            |(series, fill)| {
                replace_na(
                    black_box(series),
                    Some(Replacement::vector(fill)),
                    &options,
                )
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_generator_mean(c: &mut Criterion) {
    let base = float_series_with_gaps(10_000, 10);
    let options = ReplaceOptions::default();

    c.bench_function("generator_mean_10k", |b| {
        b.iter_batched(
            || base.clone(),
            |series| {
                let mean = Replacement::generator(|s: &Series| {
                    let mut sum = 0.0;
                    let mut n = 0usize;
                    for v in s.values() {
                        if let Value::Float64(x) = v {
                            if !x.is_nan() {
                                sum += x;
                                n += 1;
                            }
                        }
                    }
                    ReplacementValues::One(Value::Float64(sum / n as f64))
                });
                replace_na(black_box(series), Some(mean), &options)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_categorical_sentinel(c: &mut Criterion) {
    let base = categorical_series_with_gaps(10_000, 10);
    let options = ReplaceOptions::default();

    c.bench_function("categorical_sentinel_10k", |b| {
        b.iter_batched(
            || base.clone(),
            |series| replace_na(black_box(series), None, &options),
            BatchSize::SmallInput,
        )
    });
}

fn bench_clean_input(c: &mut Criterion) {
    let values = (0..10_000).map(|i| Value::Float64(i as f64)).collect();
    let base = Series::new("reading", DataType::Float64, values);
    let options = ReplaceOptions::default();

    c.bench_function("clean_input_10k", |b| {
        b.iter_batched(
            || base.clone(),
            |series| replace_na(black_box(series), Some(Replacement::scalar(0.0)), &options),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_scalar_broadcast,
    bench_vector_positional,
    bench_generator_mean,
    bench_categorical_sentinel,
    bench_clean_input
);
criterion_main!(benches);
