//! 原始数据集行解析
//!
//! 输入为带引号、逗号分隔的六列：
//! `ip_from, ip_to, country_code, country_name, region, city`，
//! country_name 读取后丢弃。

use std::fmt;

use crate::storage::RangeRecord;
use crate::utils::AddressId;

/// 表头行同时包含这两个标记
pub const HEADER_TOKENS: [&str; 2] = ["IP_FROM", "IP_TO"];

/// 数据集中表示"未知国家"的占位值
pub const UNKNOWN_COUNTRY: &str = "-";

const FIELD_COUNT: usize = 6;

/// 被拒绝的原因。拒绝只计数跳过，从不中断流
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Header,
    MissingBound,
    InvalidBound,
    InvertedBounds,
    UnknownCountry,
    MissingLocation,
    /// 字段中含制表符或换行，无法写入紧凑格式
    ControlCharacter,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Empty => "empty line",
            Rejection::Header => "header line",
            Rejection::MissingBound => "missing range bound",
            Rejection::InvalidBound => "range bound is not a 32-bit unsigned integer",
            Rejection::InvertedBounds => "lower bound exceeds upper bound",
            Rejection::UnknownCountry => "country code missing or unknown",
            Rejection::MissingLocation => "region or city missing",
            Rejection::ControlCharacter => "field contains tab or line break",
        };
        f.write_str(reason)
    }
}

pub fn is_header(line: &str) -> bool {
    HEADER_TOKENS.iter().all(|token| line.contains(token))
}

/// 引号感知的逗号切分
///
/// 引号内的逗号不切分；引号内连续两个引号表示一个字面引号。
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// 去空白、去外层引号、合并连续双引号
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.replace("\"\"", "\"")
}

fn parse_bound(field: Option<&String>) -> Result<AddressId, Rejection> {
    let field = field.map(String::as_str).unwrap_or_default();
    if field.is_empty() {
        return Err(Rejection::MissingBound);
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::InvalidBound);
    }
    field.parse().map_err(|_| Rejection::InvalidBound)
}

fn has_control(field: &str) -> bool {
    field.contains(['\t', '\n', '\r'])
}

/// 解析一行原始数据
///
/// 校验顺序：边界 → 国家代码 → 地区/城市，首个失败即拒绝，不产生部分记录。
pub fn parse_source_line(line: &str) -> Result<RangeRecord, Rejection> {
    if line.trim().is_empty() {
        return Err(Rejection::Empty);
    }
    if is_header(line) {
        return Err(Rejection::Header);
    }

    let fields: Vec<String> = split_quoted(line)
        .iter()
        .map(|raw| clean_field(raw))
        .collect();

    let lower_bound = parse_bound(fields.first())?;
    let upper_bound = parse_bound(fields.get(1))?;
    if lower_bound > upper_bound {
        return Err(Rejection::InvertedBounds);
    }

    let country_code = fields.get(2).cloned().unwrap_or_default();
    if country_code.is_empty() || country_code == UNKNOWN_COUNTRY {
        return Err(Rejection::UnknownCountry);
    }

    let region = fields.get(4).cloned().unwrap_or_default();
    let city = fields.get(5).cloned().unwrap_or_default();
    if region.is_empty() || city.is_empty() {
        return Err(Rejection::MissingLocation);
    }

    if [&country_code, &region, &city]
        .iter()
        .any(|field| has_control(field))
    {
        return Err(Rejection::ControlCharacter);
    }

    Ok(RangeRecord {
        lower_bound,
        upper_bound,
        country_code,
        region,
        city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_row() {
        let record = parse_source_line(
            r#""16777216","16777471","AU","Australia","Queensland","Brisbane""#,
        )
        .unwrap();
        assert_eq!(record.lower_bound, 16_777_216);
        assert_eq!(record.upper_bound, 16_777_471);
        assert_eq!(record.country_code, "AU");
        assert_eq!(record.region, "Queensland");
        assert_eq!(record.city, "Brisbane");
    }

    #[test]
    fn test_embedded_comma_stays_in_field() {
        let record = parse_source_line(
            r#""1","2","KR","Korea, Republic of","Seoul","Jung-gu, Seoul""#,
        )
        .unwrap();
        assert_eq!(record.city, "Jung-gu, Seoul");
        assert_eq!(record.region, "Seoul");
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        let fields = split_quoted(r#""a ""b"" c",d"#);
        assert_eq!(fields, vec![r#"a "b" c"#, "d"]);
    }

    #[test]
    fn test_unquoted_fields_are_trimmed() {
        let record = parse_source_line(" 10 , 20 , US , United States , Texas , Austin ").unwrap();
        assert_eq!(record.lower_bound, 10);
        assert_eq!(record.country_code, "US");
        assert_eq!(record.city, "Austin");
    }

    #[test]
    fn test_header_is_rejected() {
        let header = r#""IP_FROM","IP_TO","COUNTRY_CODE","COUNTRY_NAME","REGION","CITY""#;
        assert!(is_header(header));
        assert_eq!(parse_source_line(header), Err(Rejection::Header));
    }

    #[test]
    fn test_rejections_in_validation_order() {
        assert_eq!(parse_source_line(""), Err(Rejection::Empty));
        assert_eq!(
            parse_source_line(r#""","5","US","x","r","c""#),
            Err(Rejection::MissingBound)
        );
        assert_eq!(
            parse_source_line(r#""abc","5","-","x","","""#),
            Err(Rejection::InvalidBound)
        );
        assert_eq!(
            parse_source_line(r#""-1","5","US","x","r","c""#),
            Err(Rejection::InvalidBound)
        );
        assert_eq!(
            parse_source_line(r#""0","4294967296","US","x","r","c""#),
            Err(Rejection::InvalidBound)
        );
        assert_eq!(
            parse_source_line(r#""9","5","US","x","r","c""#),
            Err(Rejection::InvertedBounds)
        );
        assert_eq!(
            parse_source_line(r#""0","5","-","-","-","-""#),
            Err(Rejection::UnknownCountry)
        );
        assert_eq!(
            parse_source_line(r#""0","5","US","United States","","Austin""#),
            Err(Rejection::MissingLocation)
        );
        assert_eq!(
            parse_source_line(r#""0","5","US","United States","Texas""#),
            Err(Rejection::MissingLocation)
        );
    }

    #[test]
    fn test_tab_in_field_is_rejected() {
        assert_eq!(
            parse_source_line("0,5,US,United States,Te\txas,Austin"),
            Err(Rejection::ControlCharacter)
        );
    }
}
