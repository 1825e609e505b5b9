//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::trace;

use super::converters::{model_to_record, model_to_seed_marker};
use super::{SeaOrmStorage, retry};
use crate::errors::{IplocateError, Result};
use crate::storage::{RangeRecord, SeedMarker};
use crate::utils::AddressId;

use migration::entities::{ip_block, seed_run};

impl SeaOrmStorage {
    /// `WHERE ip_from <= target ORDER BY ip_from DESC LIMIT 1`，走 idx_ip_blocks_from
    pub async fn find_floor(&self, target: AddressId) -> Result<Option<RangeRecord>> {
        let db = &self.db;
        let target_key = i64::from(target);

        let model = retry::with_retry(&format!("floor({})", target), self.retry_config, || async move {
            ip_block::Entity::find()
                .filter(ip_block::Column::IpFrom.lte(target_key))
                .order_by_desc(ip_block::Column::IpFrom)
                .one(db)
                .await
        })
        .await
        .map_err(|e| IplocateError::database_operation(format!("floor 查询失败: {}", e)))?;

        trace!("floor({}) -> {:?}", target, model.as_ref().map(|m| m.id));
        model.map(model_to_record).transpose()
    }

    pub async fn find_seed_marker(&self, name: &str) -> Result<Option<SeedMarker>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("seed_marker({})", name), self.retry_config, || async move {
            seed_run::Entity::find_by_id(name.to_string()).one(db).await
        })
        .await
        .map_err(|e| IplocateError::database_operation(format!("查询导入标记失败: {}", e)))?;

        Ok(model.map(model_to_seed_marker))
    }

    pub async fn count_ranges(&self) -> Result<u64> {
        ip_block::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| IplocateError::database_operation(format!("统计记录数失败: {}", e)))
    }
}
