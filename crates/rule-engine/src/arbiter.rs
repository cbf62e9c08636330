//! 决策裁决器
//!
//! 对整个规则集运行匹配器，收集所有触发的规则，按优先级裁决出胜出动作。
//!
//! 裁决规则：
//! 1. 过滤出匹配的规则，保留原始顺序
//! 2. 无匹配时返回 `REVIEW` 哨兵动作和空列表
//! 3. 按 `priority` 降序做稳定排序，同优先级保持原始顺序
//! 4. 取第一条规则的 action，缺失时返回 "No action" 替代动作

use crate::matcher::{MatchResult, RuleMatcher};
use crate::models::{Action, Facts, Rule};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::trace;

/// 触发的规则
#[derive(Debug, Clone, Serialize)]
pub struct FiredRule<'a> {
    /// 在原始规则集中的位置
    pub index: usize,
    pub rule: &'a Rule,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// 决策结果类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// 有规则胜出且带有 action
    Matched,
    /// 没有任何规则匹配
    NoRuleMatched,
    /// 胜出规则缺少 action
    MissingAction,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NoRuleMatched => "no_rule_matched",
            Self::MissingAction => "missing_action",
        }
    }
}

/// 决策结果
#[derive(Debug, Clone, Serialize)]
pub struct Decision<'a> {
    pub action: Action,
    /// 按优先级降序排列的全部触发规则
    pub fired: Vec<FiredRule<'a>>,
    pub outcome: DecisionOutcome,
}

impl<'a> Decision<'a> {
    /// 胜出规则
    pub fn winner(&self) -> Option<&'a Rule> {
        self.fired.first().map(|f| f.rule)
    }

    /// 拆分为 `(action, fired_rules)`
    pub fn into_parts(self) -> (Action, Vec<&'a Rule>) {
        let rules = self.fired.into_iter().map(|f| f.rule).collect();
        (self.action, rules)
    }
}

/// 决策裁决器
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionArbiter {
    matcher: RuleMatcher,
}

impl DecisionArbiter {
    pub fn new() -> Self {
        Self {
            matcher: RuleMatcher::new(),
        }
    }

    /// 为每条触发规则记录评估追踪
    pub fn with_trace(mut self) -> Self {
        self.matcher = self.matcher.with_trace();
        self
    }

    pub fn decide<'a>(&self, facts: &Facts, rules: &'a [Rule]) -> Decision<'a> {
        let mut fired: Vec<FiredRule<'a>> = rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let result = self.matcher.execute(facts, rule);
                trace!(index, rule = rule.display_name(), matched = result.matched, "规则匹配结果");
                result.matched.then_some(FiredRule {
                    index,
                    rule,
                    result,
                })
            })
            .collect();

        if fired.is_empty() {
            return Decision {
                action: Action::no_rule_matched(),
                fired,
                outcome: DecisionOutcome::NoRuleMatched,
            };
        }

        // sort_by_key 是稳定排序，同优先级保持原始顺序
        fired.sort_by_key(|f| Reverse(f.rule.priority));

        let (action, outcome) = match &fired[0].rule.action {
            Some(action) => (action.clone(), DecisionOutcome::Matched),
            None => (Action::no_action(), DecisionOutcome::MissingAction),
        };

        Decision {
            action,
            fired,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Operator;
    use serde_json::json;

    fn mode(m: &str) -> Action {
        Action::default().with("ac_mode", m)
    }

    fn names(decision: &Decision<'_>) -> Vec<String> {
        decision
            .fired
            .iter()
            .map(|f| f.rule.display_name().to_string())
            .collect()
    }

    #[test]
    fn test_highest_priority_wins() {
        let facts = Facts::default()
            .with("temperature", 30)
            .with("humidity", 70)
            .with("occupancy", "OCCUPIED");
        let rules = vec![
            Rule::new("dehumidify")
                .with_condition("humidity", Operator::Gt, 60)
                .with_priority(3)
                .with_action(mode("DEHUMIDIFY")),
            Rule::new("cool")
                .with_condition("temperature", Operator::Gt, 28)
                .with_priority(5)
                .with_action(mode("COOL")),
        ];

        let decision = DecisionArbiter::new().decide(&facts, &rules);

        assert_eq!(decision.outcome, DecisionOutcome::Matched);
        assert_eq!(decision.action, mode("COOL"));
        assert_eq!(names(&decision), vec!["cool", "dehumidify"]);
        assert_eq!(decision.fired[0].index, 1);
        assert_eq!(decision.winner().map(Rule::display_name), Some("cool"));
    }

    #[test]
    fn test_no_match_returns_review() {
        let facts = Facts::default().with("temperature", 20);
        let rules = vec![
            Rule::new("cool")
                .with_condition("temperature", Operator::Gt, 28)
                .with_action(mode("COOL")),
        ];

        let decision = DecisionArbiter::new().decide(&facts, &rules);

        assert_eq!(decision.outcome, DecisionOutcome::NoRuleMatched);
        assert!(decision.fired.is_empty());
        assert!(decision.winner().is_none());
        assert_eq!(decision.action, Action::no_rule_matched());
    }

    #[test]
    fn test_empty_rule_set() {
        let decision = DecisionArbiter::new().decide(&Facts::default(), &[]);
        assert_eq!(decision.outcome, DecisionOutcome::NoRuleMatched);
        assert_eq!(
            decision.action.get("reason"),
            Some(&json!("No rule matched"))
        );
    }

    #[test]
    fn test_equal_priority_keeps_input_order() {
        let facts = Facts::default().with("temperature", 30);
        let rules = vec![
            Rule::new("first")
                .with_condition("temperature", Operator::Gte, 25)
                .with_priority(2)
                .with_action(mode("COOL")),
            Rule::new("second")
                .with_condition("temperature", Operator::Gte, 20)
                .with_priority(2)
                .with_action(mode("FAN")),
        ];

        let decision = DecisionArbiter::new().decide(&facts, &rules);
        assert_eq!(decision.action, mode("COOL"));
        assert_eq!(names(&decision), vec!["first", "second"]);
    }

    #[test]
    fn test_winner_missing_action() {
        let facts = Facts::default().with("temperature", 30);
        let rules = vec![
            Rule::new("low").with_priority(1).with_action(mode("FAN")),
            Rule::new("broken")
                .with_condition("temperature", Operator::Gt, 28)
                .with_priority(9),
        ];

        let decision = DecisionArbiter::new().decide(&facts, &rules);

        assert_eq!(decision.outcome, DecisionOutcome::MissingAction);
        assert_eq!(decision.action, Action::no_action());
        assert_eq!(names(&decision), vec!["broken", "low"]);
    }

    #[test]
    fn test_negative_priority_catch_all() {
        let facts = Facts::default().with("temperature", 22);
        let rules = vec![
            Rule::new("fallback").with_priority(-1).with_action(mode("AUTO")),
            Rule::new("default_prio").with_action(mode("FAN")),
        ];

        let decision = DecisionArbiter::new().decide(&facts, &rules);
        assert_eq!(decision.action, mode("FAN"));
        assert_eq!(names(&decision), vec!["default_prio", "fallback"]);
    }

    #[test]
    fn test_into_parts() {
        let rules = vec![Rule::new("only").with_action(mode("AUTO"))];
        let (action, fired) = DecisionArbiter::new()
            .decide(&Facts::default(), &rules)
            .into_parts();

        assert_eq!(action, mode("AUTO"));
        assert_eq!(fired, vec![&rules[0]]);
    }

    #[test]
    fn test_trace_recorded_for_fired_rules() {
        let facts = Facts::default().with("temperature", 30);
        let rules = vec![
            Rule::new("cool")
                .with_condition("temperature", Operator::Gt, 28)
                .with_action(mode("COOL")),
        ];

        let decision = DecisionArbiter::new().with_trace().decide(&facts, &rules);
        assert!(
            decision.fired[0]
                .result
                .evaluation_trace
                .iter()
                .any(|t| t.contains("MATCHED"))
        );
    }
}
