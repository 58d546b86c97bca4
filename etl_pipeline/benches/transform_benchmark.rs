use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use etl_pipeline::core::Dataset;
use etl_pipeline::parsing::extract_from_json_str;
use etl_pipeline::transformations::{
    parse_percentage, transform, transform_df_json_based, FlattenSettings, PercentageSettings,
};
use polars::prelude::*;

fn schools(rows: usize) -> Dataset {
    let names: Vec<String> = (0..rows).map(|i| format!("School {}", i)).collect();
    let enrollment: Vec<Option<i64>> = (0..rows)
        .map(|i| if i % 7 == 0 { None } else { Some(i as i64) })
        .collect();
    let percents: Vec<Option<String>> = (0..rows)
        .map(|i| if i % 5 == 0 { None } else { Some(format!("{}.{}%", i % 100, i % 10)) })
        .collect();

    let frame = df!(
        "School Name" => names,
        "Student Enrollment" => enrollment,
        "Percent Black" => percents.clone(),
        "Percent Hispanic" => percents.clone(),
        "Percent Asian" => percents.clone(),
        "Percent Tested" => percents,
    )
    .unwrap();
    Dataset::from_frame(frame)
}

fn scores_json(rows: usize) -> String {
    let records: Vec<String> = (0..rows)
        .map(|i| {
            let writing = if i % 4 == 0 { "null".to_string() } else { (i % 100).to_string() };
            format!(
                r#""{}": {{"name": "S{}", "scores": {{"math": {}, "reading": {}, "writing": {}}}}}"#,
                i,
                i,
                i % 100,
                (i * 3) % 100,
                writing
            )
        })
        .collect();
    format!("{{{}}}", records.join(","))
}

fn bench_parse_percentage(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentage_parsing");

    group.bench_function("parse_percentage", |b| {
        b.iter(|| {
            for raw in ["12.5%", "0%", " 99.9%", "100%"] {
                black_box(parse_percentage(black_box(raw)));
            }
        });
    });

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let settings = PercentageSettings::default();

    for rows in [100usize, 10_000] {
        let dataset = schools(rows);
        group.bench_with_input(BenchmarkId::new("percentage", rows), &dataset, |b, input| {
            b.iter(|| black_box(transform(input, &settings).unwrap()));
        });

        let nested = extract_from_json_str(&scores_json(rows)).unwrap();
        group.bench_with_input(BenchmarkId::new("flatten_scores", rows), &nested, |b, input| {
            b.iter(|| black_box(transform_df_json_based(input, &FlattenSettings::default()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_percentage, bench_transforms);
criterion_main!(benches);
