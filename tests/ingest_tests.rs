//! 数据集转换端到端测试

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use flate2::read::GzDecoder;
use tempfile::TempDir;

use iplocate::ingest::progress::ConvertProgress;
use iplocate::ingest::{ConvertOptions, convert_dataset, run_conversion};
use iplocate::services::{LookupService, SeedLoader, SeedOptions, SeedOutcome};
use iplocate::storage::{MemoryRangeStore, RangeStore};
use iplocate::utils::encode_ipv4;

const HEADER: &str = "\"IP_FROM\",\"IP_TO\",\"COUNTRY_CODE\",\"COUNTRY_NAME\",\"REGION\",\"CITY\"";

fn gunzip_file(path: &Path) -> String {
    let mut out = String::new();
    GzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn options(dir: &TempDir, input: &str) -> ConvertOptions {
    let input_path = dir.path().join("IP2LOCATION-LITE-DB11.CSV");
    fs::write(&input_path, input).unwrap();
    ConvertOptions {
        input_path,
        output_path: dir.path().join("out").join("ip_blocks.tsv.gz"),
        compression_level: 6,
    }
}

#[test]
fn test_three_valid_rows_and_one_missing_region() {
    let dir = TempDir::new().unwrap();
    let input = [
        r#""16777216","16777471","AU","Australia","Queensland","Brisbane""#,
        r#""16777472","16778239","CN","China","Fujian","Fuzhou""#,
        r#""16778240","16779263","AU","Australia","","Melbourne""#,
        r#""16779264","16781311","CN","China","Guangdong","Guangzhou""#,
    ]
    .join("\n");
    let options = options(&dir, &input);

    let stats = convert_dataset(&options, &ConvertProgress::default()).unwrap();
    assert_eq!((stats.read, stats.written, stats.skipped), (4, 3, 1));

    let output = gunzip_file(&options.output_path);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "16777216\t16777471\tAU\tQueensland\tBrisbane",
            "16777472\t16778239\tCN\tFujian\tFuzhou",
            "16779264\t16781311\tCN\tGuangdong\tGuangzhou",
        ]
    );
    assert!(output.ends_with('\n'));
    // 成功后不留下中间文件
    assert!(!dir.path().join("out").join("ip_blocks.tsv.gz.partial").exists());
}

#[test]
fn test_header_and_quoted_commas() {
    let dir = TempDir::new().unwrap();
    let input = format!(
        "{HEADER}\r\n{}\r\n{}\r\n",
        r#""1","2","KR","Korea, Republic of","Seoul-teukbyeolsi","Jung-gu, ""Old"" Town""#,
        r#""3","4","-","-","-","-""#,
    );
    let options = options(&dir, &input);

    let stats = convert_dataset(&options, &ConvertProgress::default()).unwrap();
    assert_eq!((stats.read, stats.written, stats.skipped), (3, 1, 2));
    assert_eq!(
        gunzip_file(&options.output_path),
        "1\t2\tKR\tSeoul-teukbyeolsi\tJung-gu, \"Old\" Town\n"
    );
}

#[test]
fn test_missing_input_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let options = ConvertOptions {
        input_path: dir.path().join("absent.csv"),
        output_path: dir.path().join("ip_blocks.tsv.gz"),
        compression_level: 9,
    };

    assert!(convert_dataset(&options, &ConvertProgress::default()).is_err());
    assert!(!options.output_path.exists());
}

#[tokio::test]
async fn test_convert_seed_lookup_pipeline() {
    let dir = TempDir::new().unwrap();
    let input = [
        HEADER,
        r#""0","16777215","-","-","-","-""#,
        r#""16777216","16777471","AU","Australia","Queensland","Brisbane""#,
        r#""134744064","134744319","US","United States of America","California","Mountain View""#,
    ]
    .join("\n");
    let options = options(&dir, &input);
    let output_path = options.output_path.clone();

    let stats = run_conversion(options, Duration::from_millis(50)).await.unwrap();
    assert_eq!(stats.written, 2);

    let store: Arc<dyn RangeStore> = Arc::new(MemoryRangeStore::new());
    let outcome = SeedLoader::new(store.clone())
        .run(&SeedOptions {
            name: "pipeline:v1".to_string(),
            file_path: output_path,
            batch_size: 1,
            progress_interval: Duration::ZERO,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SeedOutcome::Loaded(s) if s.inserted == 2 && s.batches == 2));

    let lookup = LookupService::new(store);
    let google = lookup
        .resolve(encode_ipv4("8.8.8.8").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(google.country_code, "US");
    assert_eq!(google.city, "Mountain View");

    // 占位行被跳过，0.0.0.1 不可解析
    assert!(lookup.resolve(1).await.unwrap().is_none());
}
