//! 规则驱动的智能家居空调控制器
//!
//! 采集家居事实，按 JSON 规则文件做出空调设置决策，
//! 通过 HTTP API 和命令行对外提供。

pub mod cli;
pub mod dto;
pub mod error;
pub mod facts;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod service;
pub mod state;

pub use error::ApiError;
pub use facts::{HomeFacts, Occupancy, TimeOfDay};
pub use routes::router;
pub use state::AppState;
