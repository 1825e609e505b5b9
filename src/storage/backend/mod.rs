//! SeaORM storage backend
//!
//! This module provides range storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{IplocateError, Result};
use crate::storage::{RangeRecord, RangeStore, SeedMarker};
use crate::utils::AddressId;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, model_to_seed_marker, record_to_active_model};
pub use mutations::INSERT_CHUNK_ROWS;

/// 从数据库 URL 推断后端类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(IplocateError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://, memory://",
            database_url
        )))
    }
}

/// SeaORM-based range store
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// 建立连接（不执行迁移，迁移由 `RangeStore::migrate` 负责）
    pub async fn new(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        let database_url = &config.database_url;
        if database_url.is_empty() {
            return Err(IplocateError::database_config("DATABASE_URL 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size).await?
        };

        info!("{} storage connected", backend_name.to_uppercase());

        Ok(SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config: retry::RetryConfig::from(config),
        })
    }
}

#[async_trait]
impl RangeStore for SeaOrmStorage {
    async fn migrate(&self) -> Result<()> {
        debug!("Running migrations on {}", self.backend_name);
        run_migrations(&self.db).await
    }

    async fn bulk_insert(&self, records: &[RangeRecord]) -> Result<()> {
        self.insert_ranges(records).await
    }

    async fn floor(&self, target: AddressId) -> Result<Option<RangeRecord>> {
        self.find_floor(target).await
    }

    async fn seed_marker(&self, name: &str) -> Result<Option<SeedMarker>> {
        self.find_seed_marker(name).await
    }

    async fn mark_seed_applied(&self, name: &str) -> Result<()> {
        self.insert_seed_marker(name).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_ranges().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
