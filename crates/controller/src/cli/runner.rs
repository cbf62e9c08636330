//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::net::SocketAddr;

use aircon_shared::config::AppConfig;
use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use validator::Validate;

use super::commands::EvaluateArgs;
use crate::render::render_report;
use crate::routes::router;
use crate::service;
use crate::state::AppState;

/// 命令执行器
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 执行 serve 命令
    pub async fn run_serve(
        &self,
        host: Option<String>,
        port: Option<u16>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<()> {
        let mut config = self.config.clone();
        if let Some(host) = host {
            config.server.host = host;
        }
        if let Some(port) = port {
            config.server.port = port;
        }
        let addr: SocketAddr = config
            .server_addr()
            .parse()
            .with_context(|| format!("无效的监听地址: {}", config.server_addr()))?;

        let state = AppState::new(self.config.rules.path.clone()).with_metrics(metrics);
        let app = router(state);

        let listener = TcpListener::bind(addr).await?;
        info!(
            %addr,
            rules = %self.config.rules.path.display(),
            "Aircon controller listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Service shutdown complete");
        Ok(())
    }

    /// 执行 evaluate 命令，返回待输出的文本
    pub async fn run_evaluate(&self, args: &EvaluateArgs) -> Result<String> {
        let home = args.home_facts();
        home.validate().context("家居事实超出允许范围")?;

        let rules_path = args
            .rules
            .clone()
            .unwrap_or_else(|| self.config.rules.path.clone());
        let loaded = service::load_rules(&rules_path).await;
        let facts = home.to_facts();

        if args.json {
            let response = service::evaluate_with(&loaded, facts, args.trace);
            return Ok(serde_json::to_string_pretty(&response)?);
        }

        let decision = service::decide(&loaded, &facts, args.trace);
        let mut report = render_report(&facts, &loaded, &decision);

        if args.trace {
            for fired in &decision.fired {
                report.push_str(&format!("\n-- trace: {} --\n", fired.rule.display_name()));
                for line in &fired.result.evaluation_trace {
                    report.push_str(line);
                    report.push('\n');
                }
            }
        }

        Ok(report)
    }
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
