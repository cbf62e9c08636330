//! 空调控制器入口
//!
//! `serve` 启动 HTTP 决策服务，`evaluate` 做一次性决策。

use aircon_controller::cli::{Cli, CommandRunner, Commands};
use aircon_shared::config::AppConfig;
use aircon_shared::observability;
use anyhow::Result;
use clap::Parser;

const SERVICE_NAME: &str = "aircon-controller";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 统一加载配置：从 config/{service_name}.toml 加载，包含可观测性配置
    let config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let mut obs_config = config
        .observability
        .clone()
        .with_service_name(SERVICE_NAME);
    if let Some(level) = &cli.log_level {
        obs_config = obs_config.with_log_level(level);
    }

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Serve { host, port } => {
            let guard = observability::init(&obs_config)?;
            runner.run_serve(host, port, guard.metrics_handle()).await?;
        }
        Commands::Evaluate(args) => {
            // 单次评估不需要 Prometheus recorder
            obs_config.metrics_enabled = false;
            let _guard = observability::init(&obs_config)?;
            println!("{}", runner.run_evaluate(&args).await?);
        }
    }

    Ok(())
}
