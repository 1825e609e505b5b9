//! 配置加载测试

use std::fs;

use tempfile::TempDir;

use iplocate::config::StaticConfig;

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("iplocate.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8088

[database]
database_url = "memory://"

[seed]
enabled = false
name = "iptracking:ip_blocks:v2"
batch_size = 2500
"#,
    )
    .unwrap();

    let config = StaticConfig::load_from(path.to_str().unwrap());
    assert!(!config.seed.enabled);
    assert_eq!(config.seed.name, "iptracking:ip_blocks:v2");
    assert_eq!(config.seed.batch_size, 2500);
    // 未出现的段落使用默认值
    assert_eq!(config.convert.compression_level, 9);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = StaticConfig::load_from("/nonexistent/iplocate.toml");
    assert_eq!(config.seed.batch_size, 10_000);
    assert_eq!(config.database.retry_count, 3);
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = StaticConfig::default();
    config.seed.file_path = "/srv/data/ip_blocks.tsv.gz".to_string();
    config.save_to_file(&path).unwrap();

    let reloaded: StaticConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.seed.file_path, "/srv/data/ip_blocks.tsv.gz");
}
