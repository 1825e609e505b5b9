//! IPv4 点分十进制与 32 位地址 ID 的互转
//!
//! 严格校验：
//! - 必须恰好 4 段
//! - 每段为 1-3 位十进制数字，范围 0-255
//! - 不允许前导零（`01`）、空段、符号或空白

use std::fmt;

/// 32 位无符号地址 ID，与点分十进制一一对应
pub type AddressId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    Empty,
    SegmentCount(usize),
    InvalidOctet(String),
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::Empty => write!(f, "empty address"),
            AddressParseError::SegmentCount(n) => {
                write!(f, "expected 4 octets, found {}", n)
            }
            AddressParseError::InvalidOctet(octet) => write!(f, "invalid octet '{}'", octet),
        }
    }
}

impl std::error::Error for AddressParseError {}

fn parse_octet(segment: &str) -> Result<u32, AddressParseError> {
    let invalid = || AddressParseError::InvalidOctet(segment.to_string());

    if segment.is_empty() || segment.len() > 3 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(invalid());
    }

    let value: u32 = segment.parse().map_err(|_| invalid())?;
    if value > 255 {
        return Err(invalid());
    }
    Ok(value)
}

/// 点分十进制 → 地址 ID
///
/// `octet0 * 2^24 + octet1 * 2^16 + octet2 * 2^8 + octet3`
pub fn encode_ipv4(text: &str) -> Result<AddressId, AddressParseError> {
    if text.is_empty() {
        return Err(AddressParseError::Empty);
    }

    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() != 4 {
        return Err(AddressParseError::SegmentCount(segments.len()));
    }

    segments
        .iter()
        .try_fold(0u32, |acc, segment| Ok((acc << 8) | parse_octet(segment)?))
}

/// 地址 ID → 点分十进制
pub fn decode_ipv4(id: AddressId) -> String {
    let [a, b, c, d] = id.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}
