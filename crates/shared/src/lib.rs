//! 共享库
//!
//! 包含控制服务与命令行共用的配置加载和可观测性基础设施。

pub mod config;
pub mod observability;
