use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::AddressId;

/// 一条 IP 段记录：[lower_bound, upper_bound] → 国家 / 地区 / 城市
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRecord {
    pub lower_bound: AddressId,
    pub upper_bound: AddressId,
    pub country_code: String,
    pub region: String,
    pub city: String,
}

impl RangeRecord {
    pub fn contains(&self, target: AddressId) -> bool {
        self.lower_bound <= target && target <= self.upper_bound
    }

    /// 只暴露地理位置，不暴露区间边界
    pub fn into_location(self) -> Location {
        Location {
            country_code: self.country_code,
            region: self.region,
            city: self.city,
        }
    }
}

/// 查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country_code: String,
    pub region: String,
    pub city: String,
}

/// 已完成的批量导入标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMarker {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}
