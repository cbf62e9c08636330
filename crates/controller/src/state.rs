//! 应用状态

use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};

/// 应用共享状态
///
/// 只保存规则文件路径，规则在每次评估时重新读取。
#[derive(Clone)]
pub struct AppState {
    rules_path: PathBuf,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(rules_path: impl Into<PathBuf>) -> Self {
        Self {
            rules_path: rules_path.into(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    pub fn rules_path(&self) -> &Path {
        &self.rules_path
    }

    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}
