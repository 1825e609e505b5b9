//! 业务服务层
//!
//! HTTP、CLI 和启动流程共用：
//! - `SeedLoader`: 幂等的批量导入
//! - `LookupService`: floor-and-verify 查询

pub mod lookup;
pub mod seed;

pub use lookup::{IpQuery, LookupError, LookupService, parse_ip_query};
pub use seed::{SeedLoader, SeedOptions, SeedOutcome, SeedStats};
