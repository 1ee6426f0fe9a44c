//! Enrichment Performance Benchmarks
//!
//! Measures the per-response work done by the resolution layer:
//! - Rewriting attnum-keyed rows into name-keyed records
//! - Attaching linked record summaries
//! - Encoding name-keyed records for writes

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mathesar_client::{ColumnInfo, ColumnMap, RecordList};
use serde_json::{json, Map, Value};

const COLUMNS: i64 = 20;

fn column_map() -> ColumnMap {
    let columns: Vec<ColumnInfo> = (1..=COLUMNS)
        .map(|id| {
            serde_json::from_value(json!({
                "id": id,
                "name": format!("column_{id}"),
                "type": "text",
                "nullable": true,
                "primary_key": id == 1,
                "has_dependents": false,
                "current_role_priv": ["SELECT"]
            }))
            .expect("valid column")
        })
        .collect();
    ColumnMap::new(columns)
}

/// A page of `rows` records; column 2 links to another table on every row
fn record_list(rows: usize) -> RecordList {
    let results = (0..rows)
        .map(|row| {
            (1..=COLUMNS)
                .map(|attnum| (attnum.to_string(), json!(format!("value {row}-{attnum}"))))
                .collect::<Map<String, Value>>()
        })
        .collect();

    let linked_record_summaries = (0..rows)
        .map(|row| (row.to_string(), HashMap::from([("2".to_string(), format!("Summary {row}"))])))
        .collect();

    RecordList {
        count: rows as i64,
        results,
        grouping: None,
        linked_record_summaries: Some(linked_record_summaries),
        record_summaries: None,
        download_links: None,
    }
}

fn bench_enrich(c: &mut Criterion) {
    let columns = column_map();
    let mut group = c.benchmark_group("enrich");

    for rows in [10, 100, 1000] {
        let list = record_list(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &list, |b, list| {
            b.iter(|| columns.enrich(black_box(list.clone())));
        });
    }

    group.finish();
}

fn bench_encode_record(c: &mut Criterion) {
    let columns = column_map();
    let record: Map<String, Value> = (1..=COLUMNS)
        .map(|id| (format!("column_{id}"), json!(id)))
        .collect();

    c.bench_function("encode_record", |b| {
        b.iter(|| columns.encode_record(black_box(&record)).expect("known columns"));
    });
}

criterion_group!(benches, bench_enrich, bench_encode_record);
criterion_main!(benches);
