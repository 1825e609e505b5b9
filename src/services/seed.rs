//! 幂等的批量导入
//!
//! 流程：
//! 1. 检查导入标记，已存在则直接返回（不触碰文件）
//! 2. blocking 线程解压并逐行解析紧凑格式，按 batch_size 组批
//! 3. 批次经容量为 1 的有界通道交给异步端，逐批 `bulk_insert`
//! 4. 全部批次成功后才写入导入标记
//!
//! 通道满时读取线程阻塞在 `blocking_send` 上，内存占用为 O(batch_size)。
//! 中途失败不会写标记，下次启动会重新完整导入（可能产生重复行）。

use std::fs::File;
use std::io::BufReader;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SeedConfig;
use crate::errors::{IplocateError, Result};
use crate::ingest::compact::{compact_reader, parse_compact_record};
use crate::ingest::progress::{ProgressReporter, SeedProgress};
use crate::storage::{RangeRecord, RangeStore};

/// 当前数据集版本；更换数据集时修改此值以触发重新导入
pub const DEFAULT_SEED_NAME: &str = "iptracking:ip_blocks:v1";

pub const DEFAULT_BATCH_SIZE: usize = 10_000;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub name: String,
    pub file_path: PathBuf,
    pub batch_size: usize,
    pub progress_interval: Duration,
}

impl From<&SeedConfig> for SeedOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            name: config.name.clone(),
            file_path: PathBuf::from(&config.file_path),
            batch_size: config.batch_size,
            progress_interval: Duration::from_secs(config.progress_interval_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    /// 读到的记录数；空行被 csv reader 直接跳过，不计入
    pub read: u64,
    pub inserted: u64,
    pub rejected: u64,
    pub batches: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// 标记已存在，未做任何导入
    AlreadyApplied { applied_at: DateTime<Utc> },
    Loaded(SeedStats),
}

pub struct SeedLoader {
    store: Arc<dyn RangeStore>,
}

impl SeedLoader {
    pub fn new(store: Arc<dyn RangeStore>) -> Self {
        Self { store }
    }

    pub async fn run(&self, options: &SeedOptions) -> Result<SeedOutcome> {
        self.run_with_progress(options, Arc::new(SeedProgress::default()))
            .await
    }

    /// 同 `run`，计数写入调用方提供的 `SeedProgress`，便于外部观察导入进度
    pub async fn run_with_progress(
        &self,
        options: &SeedOptions,
        progress: Arc<SeedProgress>,
    ) -> Result<SeedOutcome> {
        if let Some(marker) = self.store.seed_marker(&options.name).await? {
            info!(
                "Seed '{}' already applied at {}, skipping",
                marker.name,
                marker.applied_at.to_rfc3339()
            );
            return Ok(SeedOutcome::AlreadyApplied {
                applied_at: marker.applied_at,
            });
        }

        info!(
            "Seeding '{}' from {}",
            options.name,
            options.file_path.display()
        );
        let started = Instant::now();
        let batch_size = options.batch_size.max(1);

        let _reporter = ProgressReporter::spawn(progress.clone(), options.progress_interval);

        let (tx, mut rx) = mpsc::channel::<Vec<RangeRecord>>(1);
        let path = options.file_path.clone();
        let reader_progress = progress.clone();
        let reader = tokio::task::spawn_blocking(move || {
            read_batches(&path, batch_size, &tx, &reader_progress)
        });

        let mut batches = 0u64;
        while let Some(batch) = rx.recv().await {
            if let Err(e) = self.store.bulk_insert(&batch).await {
                // 关闭接收端让读取线程尽快退出
                drop(rx);
                if let Err(join_err) = reader.await {
                    warn!("Seed reader task failed: {}", join_err);
                }
                return Err(e);
            }
            batches += 1;
            progress.record_inserted(batch.len());
            debug!("Inserted batch {} ({} rows)", batches, batch.len());
        }

        reader
            .await
            .map_err(|e| IplocateError::file_operation(format!("导入读取任务异常终止: {}", e)))??;

        self.store.mark_seed_applied(&options.name).await?;

        let (read, inserted, rejected) = progress.snapshot();
        let stats = SeedStats {
            read,
            inserted,
            rejected,
            batches,
            elapsed: started.elapsed(),
        };
        info!(
            read = stats.read,
            inserted = stats.inserted,
            rejected = stats.rejected,
            batches = stats.batches,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Seed '{}' applied",
            options.name
        );
        Ok(SeedOutcome::Loaded(stats))
    }
}

/// 读取线程：解压、解析、组批并发送
///
/// 接收端关闭时提前返回 Ok，由异步端报告自身的错误。
fn read_batches(
    path: &Path,
    batch_size: usize,
    tx: &mpsc::Sender<Vec<RangeRecord>>,
    progress: &SeedProgress,
) -> Result<()> {
    let file = File::open(path).map_err(|e| {
        IplocateError::file_operation(format!("无法打开导入文件 {}: {}", path.display(), e))
    })?;
    let mut reader = compact_reader(GzDecoder::new(BufReader::new(file)));

    let mut batch = Vec::with_capacity(batch_size);
    for result in reader.records() {
        progress.record_read();

        match result {
            Ok(row) => match parse_compact_record(&row) {
                Some(record) => batch.push(record),
                None => {
                    progress.record_rejected();
                    debug!("Rejected seed line {:?}", row.position().map(|p| p.line()));
                }
            },
            Err(e) if e.is_io_error() => {
                return Err(IplocateError::compression(format!(
                    "读取 {} 失败: {}",
                    path.display(),
                    e
                )));
            }
            Err(e) => {
                progress.record_rejected();
                debug!("Rejected seed line: {}", e);
            }
        }

        if batch.len() >= batch_size {
            let full = mem::replace(&mut batch, Vec::with_capacity(batch_size));
            if tx.blocking_send(full).is_err() {
                return Ok(());
            }
        }
    }

    if !batch.is_empty() {
        let _ = tx.blocking_send(batch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRangeStore;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn write_seed_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("ranges.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::fast());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
        path
    }

    fn options(path: PathBuf, batch_size: usize) -> SeedOptions {
        SeedOptions {
            name: "test:ranges:v1".to_string(),
            file_path: path,
            batch_size,
            progress_interval: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_loads_batches_and_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_seed_file(
            dir.path(),
            "0\t99\tUS\tTexas\tAustin\n\
             100\t199\tKR\tSeoul\tJung-gu\n\
             bad\tline\n\
             200\t299\tJP\tTokyo\tChiyoda\n",
        );
        let store = Arc::new(MemoryRangeStore::new());
        let loader = SeedLoader::new(store.clone());

        let outcome = loader.run(&options(path, 2)).await.unwrap();
        let SeedOutcome::Loaded(stats) = outcome else {
            panic!("expected a fresh load");
        };
        assert_eq!(stats.read, 4);
        assert_eq!(stats.inserted, 3);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.batches, 2);
        assert_eq!(store.count().await.unwrap(), 3);
        assert!(store.seed_applied("test:ranges:v1").await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_lines_are_not_counted_as_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_seed_file(
            dir.path(),
            "0\t99\tUS\tTexas\tAustin\n\n\n100\t199\tKR\tSeoul\tJung-gu\n\n",
        );
        let store = Arc::new(MemoryRangeStore::new());

        let outcome = SeedLoader::new(store).run(&options(path, 10)).await.unwrap();
        let SeedOutcome::Loaded(stats) = outcome else {
            panic!("expected a fresh load");
        };
        assert_eq!(stats.read, 2);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.inserted, 2);
    }

    #[tokio::test]
    async fn test_gate_is_checked_before_file_io() {
        let store = Arc::new(MemoryRangeStore::new());
        store.mark_seed_applied("test:ranges:v1").await.unwrap();

        let outcome = SeedLoader::new(store)
            .run(&options(PathBuf::from("/nonexistent/ranges.tsv.gz"), 10))
            .await
            .unwrap();
        assert!(matches!(outcome, SeedOutcome::AlreadyApplied { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_leaves_no_marker() {
        let store = Arc::new(MemoryRangeStore::new());
        let result = SeedLoader::new(store.clone())
            .run(&options(PathBuf::from("/nonexistent/ranges.tsv.gz"), 10))
            .await;

        assert!(matches!(result, Err(IplocateError::FileOperation(_))));
        assert!(!store.seed_applied("test:ranges:v1").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_gzip_leaves_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tsv.gz");
        // 合法的 gzip 头 + 保留块类型 0b11
        std::fs::write(&path, b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x00\x03\x07\xff\xff").unwrap();

        let store = Arc::new(MemoryRangeStore::new());
        let result = SeedLoader::new(store.clone()).run(&options(path, 10)).await;

        assert!(result.is_err());
        assert!(!store.seed_applied("test:ranges:v1").await.unwrap());
    }
}
