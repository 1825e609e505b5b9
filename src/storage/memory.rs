//! 进程内 IP 段存储
//!
//! 以 lower_bound 为键的 `BTreeMap`，floor 查询为 O(log n)。
//! 同一 lower_bound 允许多条记录（与数据库后端一样只追加、不去重），
//! floor 返回最后写入的那条。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{RangeRecord, RangeStore, SeedMarker};
use crate::errors::Result;
use crate::utils::AddressId;

#[derive(Default)]
pub struct MemoryRangeStore {
    ranges: RwLock<BTreeMap<AddressId, Vec<RangeRecord>>>,
    seeds: RwLock<HashMap<String, SeedMarker>>,
}

impl MemoryRangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接由记录构建（测试用）
    pub fn from_records(records: impl IntoIterator<Item = RangeRecord>) -> Self {
        let store = Self::new();
        {
            let mut ranges = store.ranges.write();
            for record in records {
                ranges.entry(record.lower_bound).or_default().push(record);
            }
        }
        store
    }
}

#[async_trait]
impl RangeStore for MemoryRangeStore {
    async fn migrate(&self) -> Result<()> {
        Ok(())
    }

    async fn bulk_insert(&self, records: &[RangeRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        // 整批在同一把写锁内完成，读者要么看到整批，要么看不到
        let mut ranges = self.ranges.write();
        for record in records {
            ranges
                .entry(record.lower_bound)
                .or_default()
                .push(record.clone());
        }
        Ok(())
    }

    async fn floor(&self, target: AddressId) -> Result<Option<RangeRecord>> {
        let ranges = self.ranges.read();
        Ok(ranges
            .range(..=target)
            .next_back()
            .and_then(|(_, records)| records.last().cloned()))
    }

    async fn seed_marker(&self, name: &str) -> Result<Option<SeedMarker>> {
        Ok(self.seeds.read().get(name).cloned())
    }

    async fn mark_seed_applied(&self, name: &str) -> Result<()> {
        self.seeds
            .write()
            .entry(name.to_string())
            .or_insert_with(|| SeedMarker {
                name: name.to_string(),
                applied_at: Utc::now(),
            });
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let ranges = self.ranges.read();
        Ok(ranges.values().map(|records| records.len() as u64).sum())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
