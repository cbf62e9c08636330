//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::facts::{HomeFacts, Occupancy, TimeOfDay};

/// 规则驱动的空调控制器
#[derive(Parser, Debug)]
#[command(name = "aircon-controller")]
#[command(version, about = "基于 IF-THEN 规则的智能家居空调控制器")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 HTTP 决策服务
    Serve {
        /// 监听地址，默认取配置
        #[arg(long)]
        host: Option<String>,

        /// 服务端口，默认取配置
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 对一组家居事实做一次决策
    Evaluate(EvaluateArgs),
}

/// evaluate 子命令参数
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// 规则 JSON 文件，默认取配置
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// 温度（°C，-10.0 到 60.0）
    #[arg(short, long, default_value_t = 22.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// 相对湿度（%，0 到 100）
    #[arg(long, default_value_t = 46)]
    pub humidity: u32,

    /// 在室状态
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Occupancy::Occupied)]
    pub occupancy: Occupancy,

    /// 时段
    #[arg(long, value_enum, ignore_case = true, default_value_t = TimeOfDay::Night)]
    pub time_of_day: TimeOfDay,

    /// 窗户是否打开
    #[arg(short, long)]
    pub windows_open: bool,

    /// 输出每条触发规则的评估追踪
    #[arg(long)]
    pub trace: bool,

    /// 以 JSON 格式输出
    #[arg(long)]
    pub json: bool,
}

impl EvaluateArgs {
    pub fn home_facts(&self) -> HomeFacts {
        HomeFacts {
            temperature: self.temperature,
            humidity: self.humidity,
            occupancy: self.occupancy,
            time_of_day: self.time_of_day,
            windows_open: self.windows_open,
        }
    }
}
