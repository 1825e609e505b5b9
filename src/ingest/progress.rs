//! 进度计数
//!
//! 计数器放在一个上下文对象里，由流式操作更新、由定时任务读取并输出日志。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::info;

pub trait ProgressReport: Send + Sync + 'static {
    fn report(&self, elapsed: Duration);
}

#[derive(Debug, Default)]
pub struct ConvertProgress {
    read: AtomicU64,
    written: AtomicU64,
    skipped: AtomicU64,
}

impl ConvertProgress {
    pub fn record_read(&self) {
        self.read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// (read, written, skipped)
    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.read.load(Ordering::Relaxed),
            self.written.load(Ordering::Relaxed),
            self.skipped.load(Ordering::Relaxed),
        )
    }
}

impl ProgressReport for ConvertProgress {
    fn report(&self, elapsed: Duration) {
        let (read, written, skipped) = self.snapshot();
        info!(
            read,
            written,
            skipped,
            elapsed_secs = elapsed.as_secs(),
            "Converting dataset"
        );
    }
}

#[derive(Debug, Default)]
pub struct SeedProgress {
    read: AtomicU64,
    inserted: AtomicU64,
    rejected: AtomicU64,
}

impl SeedProgress {
    pub fn record_read(&self) {
        self.read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inserted(&self, rows: usize) {
        self.inserted.fetch_add(rows as u64, Ordering::Relaxed);
    }

    /// (read, inserted, rejected)
    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.read.load(Ordering::Relaxed),
            self.inserted.load(Ordering::Relaxed),
            self.rejected.load(Ordering::Relaxed),
        )
    }
}

impl ProgressReport for SeedProgress {
    fn report(&self, elapsed: Duration) {
        let (read, inserted, rejected) = self.snapshot();
        info!(
            read,
            inserted,
            rejected,
            elapsed_secs = elapsed.as_secs(),
            "Seeding ip ranges"
        );
    }
}

/// 定时输出进度的后台任务，drop 时停止
pub struct ProgressReporter {
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// interval 为 0 时不启动
    pub fn spawn<P: ProgressReport>(progress: Arc<P>, interval: Duration) -> Option<Self> {
        if interval.is_zero() {
            return None;
        }

        let started = Instant::now();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // 第一次 tick 立即返回
            ticker.tick().await;
            loop {
                ticker.tick().await;
                progress.report(started.elapsed());
            }
        });

        Some(Self { handle })
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
