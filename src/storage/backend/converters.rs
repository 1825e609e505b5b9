use crate::errors::{IplocateError, Result};
use crate::storage::{RangeRecord, SeedMarker};
use migration::entities::{ip_block, seed_run};

/// 将 ip_blocks Model 转换为 RangeRecord
///
/// 边界以 BIGINT 存储，超出 u32 范围说明数据已损坏
pub fn model_to_record(model: ip_block::Model) -> Result<RangeRecord> {
    let bound = |value: i64| {
        u32::try_from(value).map_err(|_| {
            IplocateError::database_operation(format!(
                "ip_blocks row {} has out-of-range bound {}",
                model.id, value
            ))
        })
    };

    Ok(RangeRecord {
        lower_bound: bound(model.ip_from)?,
        upper_bound: bound(model.ip_to)?,
        country_code: model.country_code,
        region: model.region,
        city: model.city,
    })
}

/// 将 RangeRecord 转换为 ActiveModel（id 由数据库生成）
pub fn record_to_active_model(record: &RangeRecord) -> ip_block::ActiveModel {
    use sea_orm::ActiveValue::*;

    ip_block::ActiveModel {
        id: NotSet,
        ip_from: Set(i64::from(record.lower_bound)),
        ip_to: Set(i64::from(record.upper_bound)),
        country_code: Set(record.country_code.clone()),
        region: Set(record.region.clone()),
        city: Set(record.city.clone()),
    }
}

pub fn model_to_seed_marker(model: seed_run::Model) -> SeedMarker {
    SeedMarker {
        name: model.name,
        applied_at: model.applied_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn create_test_model(ip_from: i64, ip_to: i64) -> ip_block::Model {
        ip_block::Model {
            id: 7,
            ip_from,
            ip_to,
            country_code: "DE".to_string(),
            region: "Berlin".to_string(),
            city: "Berlin".to_string(),
        }
    }

    #[test]
    fn test_model_to_record() {
        let record = model_to_record(create_test_model(0, 4_294_967_295)).unwrap();
        assert_eq!(record.lower_bound, 0);
        assert_eq!(record.upper_bound, u32::MAX);
        assert_eq!(record.country_code, "DE");
    }

    #[test]
    fn test_model_to_record_rejects_corrupt_bounds() {
        assert!(model_to_record(create_test_model(-1, 10)).is_err());
        assert!(model_to_record(create_test_model(0, 4_294_967_296)).is_err());
    }

    #[test]
    fn test_record_to_active_model_leaves_id_unset() {
        let record = model_to_record(create_test_model(16, 31)).unwrap();
        let active = record_to_active_model(&record);

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.ip_from, ActiveValue::Set(16)));
        assert!(matches!(active.ip_to, ActiveValue::Set(31)));
    }
}
