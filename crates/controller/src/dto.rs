//! API 响应 DTO 定义

use rule_engine::{Action, ConditionSpec, Decision, DecisionOutcome, Facts, LoadedRules};
use serde::{Deserialize, Serialize};

use crate::render::{self, ActionSummary};

/// 触发规则的展示视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiredRuleView {
    /// 按优先级排序后的名次，从 1 开始
    pub rank: usize,
    pub name: String,
    pub priority: i64,
    /// 规则缺少 action 时为空对象
    pub action: Action,
    pub conditions: Vec<ConditionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluation_trace: Vec<String>,
}

/// 决策响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub facts: Facts,
    /// 如 `AC Mode: COOL | Fan Speed: HIGH | Setpoint: 24°C`
    pub summary: String,
    pub reason: String,
    pub outcome: DecisionOutcome,
    pub action: Action,
    pub fired_rules: Vec<FiredRuleView>,
    pub rules_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_error: Option<String>,
}

impl DecisionResponse {
    pub fn build(facts: Facts, loaded: &LoadedRules, decision: &Decision<'_>) -> Self {
        let fired_rules = decision
            .fired
            .iter()
            .enumerate()
            .map(|(i, fired)| FiredRuleView {
                rank: i + 1,
                name: fired.rule.display_name().to_string(),
                priority: fired.rule.priority,
                action: fired.rule.action.clone().unwrap_or_default(),
                conditions: fired.rule.conditions.clone(),
                evaluation_trace: fired.result.evaluation_trace.clone(),
            })
            .collect();

        Self {
            facts,
            summary: ActionSummary(&decision.action).to_string(),
            reason: render::reason(&decision.action),
            outcome: decision.outcome,
            action: decision.action.clone(),
            fired_rules,
            rules_source: loaded.source.clone(),
            rules_error: loaded.error.clone(),
        }
    }
}
