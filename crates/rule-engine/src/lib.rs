//! 空调规则引擎
//!
//! 根据一组输入事实（温度、湿度、在室状态等）匹配 IF-THEN 规则，
//! 并按优先级裁决出唯一的输出动作：
//! - 条件评估（单个 `[field, operator, value]` 三元组）
//! - 规则匹配（条件的逻辑与）
//! - 优先级裁决（稳定排序，平局保留原始顺序）
//! - JSON 规则文件加载

pub mod arbiter;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod operators;

pub use arbiter::{Decision, DecisionArbiter, DecisionOutcome, FiredRule};
pub use error::{Result, RuleError};
pub use evaluator::ConditionEvaluator;
pub use loader::{LoadedRules, RuleLoader};
pub use matcher::{MatchResult, RuleMatcher};
pub use models::{Action, Condition, ConditionSpec, Facts, Rule, value_type_name};
pub use operators::Operator;

/// 使用默认裁决器（不记录追踪）对事实和规则集做出决策
pub fn decide<'a>(facts: &Facts, rules: &'a [Rule]) -> Decision<'a> {
    DecisionArbiter::new().decide(facts, rules)
}
