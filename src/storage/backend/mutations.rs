//! Mutation operations for SeaOrmStorage
//!
//! ip_blocks 只追加；seed_runs 只插入、冲突忽略。

use chrono::Utc;
use sea_orm::{DbErr, EntityTrait, TransactionTrait, sea_query::OnConflict};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::record_to_active_model;
use super::retry;
use crate::errors::{IplocateError, Result};
use crate::storage::RangeRecord;

use migration::entities::{ip_block, seed_run};

/// 单条 INSERT 语句的最大行数（5 列 × 1000 行，低于各驱动的绑定参数上限）
pub const INSERT_CHUNK_ROWS: usize = 1_000;

impl SeaOrmStorage {
    /// 在单个事务中追加一批记录；失败时整批回滚
    pub async fn insert_ranges(&self, records: &[RangeRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let db = &self.db;
        retry::with_retry(
            &format!("bulk_insert({} rows)", records.len()),
            self.retry_config,
            || async move {
                let txn = db.begin().await?;
                for chunk in records.chunks(INSERT_CHUNK_ROWS) {
                    ip_block::Entity::insert_many(chunk.iter().map(record_to_active_model))
                        .exec(&txn)
                        .await?;
                }
                txn.commit().await
            },
        )
        .await
        .map_err(|e| IplocateError::database_operation(format!("批量插入失败: {}", e)))?;

        debug!("Inserted batch of {} ranges", records.len());
        Ok(())
    }

    /// 写入导入标记（insert-if-absent）
    pub async fn insert_seed_marker(&self, name: &str) -> Result<()> {
        let db = &self.db;

        retry::with_retry(&format!("mark_seed_applied({})", name), self.retry_config, || {
            async move {
                let marker = seed_run::ActiveModel {
                    name: sea_orm::ActiveValue::Set(name.to_string()),
                    applied_at: sea_orm::ActiveValue::Set(Utc::now()),
                };

                match seed_run::Entity::insert(marker)
                    .on_conflict(
                        OnConflict::column(seed_run::Column::Name)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec(db)
                    .await
                {
                    Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
                    Err(e) => Err(e),
                }
            }
        })
        .await
        .map_err(|e| IplocateError::database_operation(format!("写入导入标记失败: {}", e)))
    }
}
