//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `serve` - 启动 HTTP 决策服务
//! - `evaluate` - 对一组家居事实做一次决策并输出
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务
//! aircon-controller serve --port 8080
//!
//! # 单次评估
//! aircon-controller evaluate --temperature 30 --humidity 70 --occupancy OCCUPIED
//!
//! # 指定规则文件并输出 JSON
//! aircon-controller evaluate --rules ./rules.json --windows-open --json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
