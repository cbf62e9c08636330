//! 规则匹配器
//!
//! 对规则的全部条件做逻辑与（短路求值），返回匹配结果和评估追踪信息。

use crate::evaluator::ConditionEvaluator;
use crate::models::{Facts, Rule};
use serde::Serialize;
use tracing::debug;

/// 单条规则的匹配结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    pub matched_conditions: Vec<String>,
    pub evaluation_trace: Vec<String>,
}

/// 规则匹配器
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleMatcher {
    /// 是否记录详细评估追踪
    trace_enabled: bool,
}

impl RuleMatcher {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    /// 规则是否匹配，空条件列表恒为 true
    pub fn matches(&self, facts: &Facts, rule: &Rule) -> bool {
        rule.conditions
            .iter()
            .all(|cond| ConditionEvaluator::evaluate(facts, cond))
    }

    /// 执行规则匹配并记录追踪
    pub fn execute(&self, facts: &Facts, rule: &Rule) -> MatchResult {
        let mut result = MatchResult::default();

        if rule.conditions.is_empty() {
            if self.trace_enabled {
                result
                    .evaluation_trace
                    .push("conditions: 空条件列表，无条件匹配".to_string());
            }
            result.matched = true;
            return result;
        }

        for (i, cond) in rule.conditions.iter().enumerate() {
            let path = format!("conditions[{}]", i);

            let matched = match ConditionEvaluator::try_evaluate(facts, cond) {
                Ok(matched) => {
                    if self.trace_enabled {
                        result.evaluation_trace.push(format!(
                            "{}: {} => {}",
                            path,
                            cond,
                            if matched { "MATCHED" } else { "NOT_MATCHED" }
                        ));
                    }
                    matched
                }
                Err(e) => {
                    debug!(rule = rule.display_name(), condition = %cond, error = %e, "条件评估失败，视为不满足");
                    if self.trace_enabled {
                        result
                            .evaluation_trace
                            .push(format!("{}: {} => ERROR ({})", path, cond, e));
                    }
                    false
                }
            };

            if !matched {
                if self.trace_enabled {
                    result
                        .evaluation_trace
                        .push(format!("AND 短路 - 条件 {} 不满足", i));
                }
                return result;
            }

            result.matched_conditions.push(cond.to_string());
        }

        if self.trace_enabled {
            result.evaluation_trace.push("AND 全部满足".to_string());
        }
        result.matched = true;
        result
    }
}
