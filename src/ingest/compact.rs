//! 紧凑格式：gzip 压缩的 TSV，无表头、无引号
//!
//! `lower_bound \t upper_bound \t country_code \t region \t city \n`

use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::storage::RangeRecord;
use crate::utils::AddressId;

pub const DELIMITER: u8 = b'\t';

pub fn compact_writer<W: Write>(sink: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink)
}

/// 宽松读取：字段数不一致的行交给 `parse_compact_record` 拒绝，空行直接跳过
pub fn compact_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(source)
}

/// 任一字段缺失或为空、边界不是 u32、lower > upper 都返回 None
pub fn parse_compact_record(record: &StringRecord) -> Option<RangeRecord> {
    let field = |index: usize| record.get(index).map(str::trim).filter(|f| !f.is_empty());

    let lower_bound: AddressId = field(0)?.parse().ok()?;
    let upper_bound: AddressId = field(1)?.parse().ok()?;
    if lower_bound > upper_bound {
        return None;
    }

    Some(RangeRecord {
        lower_bound,
        upper_bound,
        country_code: field(2)?.to_string(),
        region: field(3)?.to_string(),
        city: field(4)?.to_string(),
    })
}
