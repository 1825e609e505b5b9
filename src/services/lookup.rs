//! IP → 地理位置查询
//!
//! floor-and-verify：取 lower_bound <= target 的最大记录，再校验 target <= upper_bound。
//! 数据集中的区间互不相交且有序，所以不会回头检查更早的记录；
//! 落在两段之间的地址直接返回未找到。

use std::fmt;
use std::sync::Arc;

use tracing::{error, trace};

use crate::errors::IplocateError;
use crate::storage::{Location, RangeStore};
use crate::utils::{AddressId, encode_ipv4};

/// "255.255.255.255" 的长度
pub const MAX_IP_TEXT_LEN: usize = 15;

pub const MISSING_IP: &str = "Missing ip";
pub const INVALID_IP: &str = "Invalid ip";

/// 查询失败的两类原因；"未找到"不是错误，用 `Ok(None)` 表示
#[derive(Debug)]
pub enum LookupError {
    /// 输入无法解析为 IPv4 地址
    InvalidInput(String),
    /// 存储层故障
    Internal(IplocateError),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::InvalidInput(reason) => f.write_str(reason),
            LookupError::Internal(e) => write!(f, "internal error: {}", e),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<IplocateError> for LookupError {
    fn from(err: IplocateError) -> Self {
        LookupError::Internal(err)
    }
}

/// 通过校验的查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpQuery {
    pub ip: String,
    pub ip_id: AddressId,
}

fn has_dotted_quad_shape(text: &str) -> bool {
    let mut segments = 0;
    for segment in text.split('.') {
        segments += 1;
        if segment.is_empty() || segment.len() > 3 || !segment.bytes().all(|b| b.is_ascii_digit())
        {
            return false;
        }
    }
    segments == 4
}

/// 校验查询参数：去空白 → 非空 → 长度与形状 → 编码
pub fn parse_ip_query(raw: Option<&str>) -> Result<IpQuery, LookupError> {
    let ip = raw.map(str::trim).unwrap_or_default();
    if ip.is_empty() {
        return Err(LookupError::InvalidInput(MISSING_IP.to_string()));
    }

    let placeholder = ip.chars().all(|c| c == '.' || c == '-');
    if ip.len() > MAX_IP_TEXT_LEN || placeholder || !has_dotted_quad_shape(ip) {
        return Err(LookupError::InvalidInput(INVALID_IP.to_string()));
    }

    let ip_id = encode_ipv4(ip).map_err(|e| {
        trace!("Rejected ip {:?}: {}", ip, e);
        LookupError::InvalidInput(INVALID_IP.to_string())
    })?;

    Ok(IpQuery {
        ip: ip.to_string(),
        ip_id,
    })
}

/// 无可变状态，可被多个请求并发调用
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn RangeStore>,
}

impl LookupService {
    pub fn new(store: Arc<dyn RangeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RangeStore> {
        &self.store
    }

    pub async fn resolve(&self, target: AddressId) -> crate::errors::Result<Option<Location>> {
        let Some(candidate) = self.store.floor(target).await? else {
            trace!("No range starts at or below {}", target);
            return Ok(None);
        };

        if !candidate.contains(target) {
            trace!(
                "{} falls in the gap after [{}, {}]",
                target, candidate.lower_bound, candidate.upper_bound
            );
            return Ok(None);
        }

        Ok(Some(candidate.into_location()))
    }

    /// 文本查询入口：无效输入、未找到、内部错误三者互不混淆
    pub async fn lookup(&self, raw: Option<&str>) -> Result<Option<Location>, LookupError> {
        let query = parse_ip_query(raw)?;
        self.resolve(query.ip_id).await.map_err(|e| {
            error!("Lookup for {} failed: {}", query.ip, e);
            LookupError::Internal(e)
        })
    }
}
