//! 用户接口（命令行）

#[cfg(feature = "cli")]
pub mod cli;
