//! 解析、转换与查询性能基准测试

use std::io::Cursor;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flate2::Compression;

use iplocate::ingest::convert_stream;
use iplocate::ingest::progress::ConvertProgress;
use iplocate::ingest::record::parse_source_line;
use iplocate::services::LookupService;
use iplocate::storage::{MemoryRangeStore, RangeRecord};
use iplocate::utils::encode_ipv4;

fn synthetic_dataset(rows: u32) -> String {
    let mut out = String::from("\"IP_FROM\",\"IP_TO\",\"COUNTRY_CODE\",\"COUNTRY_NAME\",\"REGION\",\"CITY\"\n");
    for i in 0..rows {
        let lower = i * 256;
        out.push_str(&format!(
            "\"{}\",\"{}\",\"KR\",\"Korea, Republic of\",\"Seoul\",\"Jung-gu, block {}\"\n",
            lower,
            lower + 255,
            i
        ));
    }
    out
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("codec/encode_ipv4", |b| {
        b.iter(|| encode_ipv4(std::hint::black_box("203.0.113.195")))
    });
}

fn bench_parse_line(c: &mut Criterion) {
    let line = r#""16777216","16777471","KR","Korea, Republic of","Seoul","Jung-gu, ""Old"" Town""#;
    c.bench_function("record/parse_source_line", |b| {
        b.iter(|| parse_source_line(std::hint::black_box(line)))
    });
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/stream");

    for rows in [1_000u32, 10_000] {
        let dataset = synthetic_dataset(rows);
        group.throughput(Throughput::Bytes(dataset.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &dataset, |b, dataset| {
            b.iter(|| {
                let progress = ConvertProgress::default();
                convert_stream(
                    Cursor::new(dataset.as_bytes()),
                    Vec::new(),
                    Compression::fast(),
                    &progress,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = MemoryRangeStore::from_records((0..1_000_000u32).map(|i| RangeRecord {
        lower_bound: i * 4096,
        upper_bound: i * 4096 + 2047,
        country_code: "US".to_string(),
        region: "Texas".to_string(),
        city: "Austin".to_string(),
    }));
    let service = LookupService::new(Arc::new(store));

    let hit = service.clone();
    c.bench_function("lookup/hit", |b| {
        b.to_async(&rt).iter(|| {
            let s = hit.clone();
            async move { s.resolve(2_000_000_000).await }
        });
    });

    let gap = service.clone();
    c.bench_function("lookup/gap", |b| {
        b.to_async(&rt).iter(|| {
            let s = gap.clone();
            async move { s.resolve(4096 + 3000).await }
        });
    });
}

criterion_group!(benches, bench_encode, bench_parse_line, bench_convert, bench_lookup);
criterion_main!(benches);
