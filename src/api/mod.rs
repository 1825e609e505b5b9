//! HTTP 查询接口与中间件

pub mod middleware;
pub mod services;
