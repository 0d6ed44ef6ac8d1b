//! 共享库
//!
//! 包含配置加载、数据库连接池、日志初始化、重试执行器等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod retry;
