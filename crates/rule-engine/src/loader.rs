//! 规则加载器
//!
//! 从 JSON 文件加载规则集。顶层必须是数组，每个元素必须是规则对象；
//! 加载失败时由 [`RuleLoader::load_or_fallback`] 退回空规则集，
//! 此时所有决策都是 `REVIEW`。

use crate::error::{Result, RuleError};
use crate::models::{Rule, value_type_name};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument, warn};

/// 加载失败时使用的规则来源描述
pub const FALLBACK_SOURCE: &str = "Fallback rules (empty)";

/// 一次加载的结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedRules {
    pub rules: Vec<Rule>,
    /// 规则来源描述
    pub source: String,
    /// 加载失败的原因（已退回空规则集）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadedRules {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// 规则加载器
pub struct RuleLoader;

impl RuleLoader {
    /// 从文件加载
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Vec<Rule>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串加载
    pub fn from_json(json: &str) -> Result<Vec<Rule>> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// 从已解析的 JSON 值加载
    pub fn from_value(value: Value) -> Result<Vec<Rule>> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(RuleError::NotAnArray(value_type_name(&other).to_string())),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(RuleError::InvalidRule {
                        index,
                        message: format!("需要对象，实际为 {}", value_type_name(&item)),
                    });
                }
                serde_json::from_value::<Rule>(item).map_err(|e| RuleError::InvalidRule {
                    index,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// 加载规则，失败时退回空规则集并保留错误信息
    pub fn load_or_fallback(path: &Path) -> LoadedRules {
        Self::finish(path, Self::from_path(path))
    }

    /// 将一次加载结果整理为 [`LoadedRules`]，失败时退回空规则集
    ///
    /// 供自行读取文件的调用方（如异步读取）使用。
    pub fn finish(path: &Path, result: Result<Vec<Rule>>) -> LoadedRules {
        match result {
            Ok(rules) => {
                info!(path = %path.display(), count = rules.len(), "规则已加载");
                LoadedRules {
                    rules,
                    source: format!("Loaded from: {}", path.display()),
                    error: None,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "规则加载失败，使用空规则集");
                LoadedRules {
                    rules: Vec::new(),
                    source: FALLBACK_SOURCE.to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
