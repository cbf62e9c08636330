//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集。
//! 指标由 HTTP 服务的 `/metrics` 端点渲染，供 Prometheus 抓取。

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// 全局 Prometheus handle，用于渲染指标
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// 安装 Prometheus recorder 并注册指标描述
pub fn init(service_name: &str) -> Result<PrometheusHandle> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROMETHEUS_HANDLE.set(handle.clone());

    register_common_metrics(service_name);

    Ok(handle)
}

/// 注册通用指标
fn register_common_metrics(service_name: &str) {
    // 这些描述会出现在 /metrics 端点的 HELP 注释中
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!("rule_decisions_total", "Total number of rule decisions");
    metrics::describe_histogram!(
        "rule_decision_duration_seconds",
        "Rule decision duration in seconds"
    );
    metrics::describe_histogram!("rule_fired_count", "Number of rules fired per decision");

    metrics::describe_counter!(
        "rule_load_failures_total",
        "Total number of rule file load failures"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录一次决策
///
/// `outcome` 为 matched / no_rule_matched / missing_action
#[inline]
pub fn record_decision(outcome: &str, fired_count: usize, duration_secs: f64) {
    metrics::counter!("rule_decisions_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!("rule_decision_duration_seconds").record(duration_secs);
    metrics::histogram!("rule_fired_count").record(fired_count as f64);
}

/// 记录规则文件加载失败
#[inline]
pub fn record_rule_load_failure() {
    metrics::counter!("rule_load_failures_total").increment(1);
}
