//! 数据集转换与解析
//!
//! - `record`: 原始 CSV 行解析（引号感知）
//! - `compact`: gzip TSV 紧凑格式的读写
//! - `lines`: 兼容 `\n` / `\r\n` / `\r` 的逐行读取
//! - `converter`: 原始数据集 → 紧凑格式的流式转换
//! - `progress`: 进度计数与定时汇报

pub mod compact;
pub mod converter;
pub mod lines;
pub mod progress;
pub mod record;

pub use converter::{ConvertOptions, ConvertStats, convert_dataset, convert_stream, run_conversion};
pub use record::{Rejection, parse_source_line};
