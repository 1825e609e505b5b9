//! 运行模式
//!
//! - server: HTTP 查询服务（无子命令时的默认模式）
//! - cli: convert / seed / lookup / config

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
