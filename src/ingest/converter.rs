//! 原始数据集 → 紧凑格式
//!
//! 写入路径是同步的：压缩器缓冲区满时 `write` 会阻塞，直到底层文件写完，
//! 读取端在此期间不会继续读入新行，内存占用与文件大小无关。
//! 异步调用方通过 `run_conversion` 在 blocking 线程上执行。

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, info, warn};

use super::compact::compact_writer;
use super::lines::Lines;
use super::progress::{ConvertProgress, ProgressReporter};
use super::record::parse_source_line;
use crate::config::ConvertConfig;
use crate::errors::{IplocateError, Result};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// 0-9，超出范围按 9 处理
    pub compression_level: u32,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            input_path: PathBuf::from(&config.input_path),
            output_path: PathBuf::from(&config.output_path),
            compression_level: config.compression_level,
        }
    }
}

impl ConvertOptions {
    fn compression(&self) -> Compression {
        Compression::new(self.compression_level.min(9))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub read: u64,
    pub written: u64,
    /// 表头 + 所有被拒绝的行
    pub skipped: u64,
    pub elapsed: Duration,
}

/// 核心转换：逐行读入、解析、写入 gzip 压缩的紧凑格式
///
/// 返回 gzip 流结束后的底层 sink，由调用方负责 flush/sync。
pub fn convert_stream<R: BufRead, W: Write>(
    reader: R,
    sink: W,
    level: Compression,
    progress: &ConvertProgress,
) -> Result<W> {
    let mut writer = compact_writer(GzEncoder::new(sink, level));

    for (index, line) in Lines::new(reader).enumerate() {
        let line = line.map_err(|e| {
            IplocateError::file_operation(format!("读取第 {} 行失败: {}", index + 1, e))
        })?;
        progress.record_read();

        match parse_source_line(&line) {
            Ok(record) => {
                writer.serialize(&record)?;
                progress.record_written();
            }
            Err(rejection) => {
                progress.record_skipped();
                debug!("Skipping line {}: {}", index + 1, rejection);
            }
        }
    }

    let encoder = writer
        .into_inner()
        .map_err(|e| IplocateError::file_operation(format!("写入输出失败: {}", e.error())))?;
    encoder
        .finish()
        .map_err(|e| IplocateError::compression(format!("gzip 结束失败: {}", e)))
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

/// 转换文件
///
/// 先写入 `<output>.partial`，落盘后再原子重命名；失败时不会留下看似有效的输出。
pub fn convert_dataset(options: &ConvertOptions, progress: &ConvertProgress) -> Result<ConvertStats> {
    let started = Instant::now();

    let input = File::open(&options.input_path).map_err(|e| {
        IplocateError::file_operation(format!(
            "无法打开输入文件 {}: {}",
            options.input_path.display(),
            e
        ))
    })?;

    if let Some(parent) = options.output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let staging = partial_path(&options.output_path);
    let output = File::create(&staging).map_err(|e| {
        IplocateError::file_operation(format!("无法创建输出文件 {}: {}", staging.display(), e))
    })?;

    let result = convert_stream(
        BufReader::new(input),
        BufWriter::new(output),
        options.compression(),
        progress,
    )
    .and_then(|buffered| {
        let file = buffered
            .into_inner()
            .map_err(|e| IplocateError::file_operation(e.error().to_string()))?;
        file.sync_all()?;
        Ok(())
    });

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&staging) {
            warn!("Failed to remove {}: {}", staging.display(), cleanup);
        }
        return Err(e);
    }

    fs::rename(&staging, &options.output_path)?;

    let (read, written, skipped) = progress.snapshot();
    Ok(ConvertStats {
        read,
        written,
        skipped,
        elapsed: started.elapsed(),
    })
}

/// 异步入口：blocking 线程执行转换，同时按间隔输出进度
pub async fn run_conversion(options: ConvertOptions, report_every: Duration) -> Result<ConvertStats> {
    info!(
        "Converting {} -> {}",
        options.input_path.display(),
        options.output_path.display()
    );

    let progress = Arc::new(ConvertProgress::default());
    let _reporter = ProgressReporter::spawn(progress.clone(), report_every);

    let worker_progress = progress.clone();
    let stats = tokio::task::spawn_blocking(move || convert_dataset(&options, &worker_progress))
        .await
        .map_err(|e| IplocateError::file_operation(format!("转换任务异常终止: {}", e)))??;

    info!(
        read = stats.read,
        written = stats.written,
        skipped = stats.skipped,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "Conversion complete"
    );
    Ok(stats)
}
