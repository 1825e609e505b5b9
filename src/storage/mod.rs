//! IP 段存储
//!
//! `RangeStore` 是存储能力接口：迁移、批量追加、floor 查询、导入标记。
//! 任何支持有序范围扫描的引擎都可以作为后端：
//! - `SeaOrmStorage`: SQLite / MySQL / PostgreSQL
//! - `MemoryRangeStore`: 进程内有序表（测试、小数据集）

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::utils::AddressId;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStorage;
pub use memory::MemoryRangeStore;
pub use models::{Location, RangeRecord, SeedMarker};

#[async_trait]
pub trait RangeStore: Send + Sync {
    /// 建立表结构和索引；可重复调用
    async fn migrate(&self) -> Result<()>;

    /// 在一次原子操作中追加全部记录，空输入直接返回
    async fn bulk_insert(&self, records: &[RangeRecord]) -> Result<()>;

    /// lower_bound <= target 的记录中 lower_bound 最大的一条
    async fn floor(&self, target: AddressId) -> Result<Option<RangeRecord>>;

    async fn seed_marker(&self, name: &str) -> Result<Option<SeedMarker>>;

    /// 写入导入标记；同名重复写入不报错
    async fn mark_seed_applied(&self, name: &str) -> Result<()>;

    /// 已存储的记录数
    async fn count(&self) -> Result<u64>;

    fn backend_name(&self) -> &str;

    async fn seed_applied(&self, name: &str) -> Result<bool> {
        Ok(self.seed_marker(name).await?.is_some())
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据 database_url 创建存储后端（未执行迁移）
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn RangeStore>> {
        let database_url = &config.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        if backend_type == "memory" {
            return Ok(Arc::new(MemoryRangeStore::new()));
        }

        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
