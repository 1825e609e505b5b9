//! 启动流程：连接存储 → 迁移 → 导入（若启用）
//!
//! 任一步失败都终止启动，HTTP 端口不会在数据就绪前绑定。

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{DatabaseConfig, StaticConfig};
use crate::services::{LookupService, SeedLoader, SeedOptions, SeedOutcome};
use crate::storage::{RangeStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn RangeStore>,
    pub lookup: LookupService,
}

/// 创建存储并执行迁移
pub async fn prepare_storage(config: &DatabaseConfig) -> Result<Arc<dyn RangeStore>> {
    let store = StorageFactory::create(config)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let started = Instant::now();
    info!("Running migrations...");
    store.migrate().await.context("Failed to run migrations")?;
    info!("Migrations complete in {} ms", started.elapsed().as_millis());

    Ok(store)
}

/// 准备服务器启动所需的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let started = Instant::now();
    debug!("Starting pre-startup processing...");

    let store = prepare_storage(&config.database).await?;

    if config.seed.enabled {
        let outcome = SeedLoader::new(store.clone())
            .run(&SeedOptions::from(&config.seed))
            .await
            .with_context(|| format!("Failed to seed '{}'", config.seed.name))?;
        if let SeedOutcome::Loaded(stats) = outcome {
            debug!("Seed inserted {} rows", stats.inserted);
        }
    } else {
        info!("Seeding disabled, serving existing ranges");
    }

    let lookup = LookupService::new(store.clone());
    info!(
        "Pre-startup processing completed in {} ms",
        started.elapsed().as_millis()
    );

    Ok(StartupContext { store, lookup })
}
