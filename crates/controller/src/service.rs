//! 决策服务
//!
//! 一个评估周期：读取规则文件（失败时退回空规则集）、裁决、记录指标。
//! HTTP 处理器和命令行共用。

use std::path::Path;
use std::time::Instant;

use aircon_shared::observability::metrics;
use rule_engine::{Decision, DecisionArbiter, Facts, LoadedRules, RuleError, RuleLoader};
use tracing::{info, instrument};

use crate::dto::DecisionResponse;
use crate::render;

/// 异步读取规则文件，失败时退回空规则集并记录指标
pub async fn load_rules(path: &Path) -> LoadedRules {
    let result = match tokio::fs::read_to_string(path).await {
        Ok(content) => RuleLoader::from_json(&content),
        Err(e) => Err(RuleError::Io(e)),
    };

    let loaded = RuleLoader::finish(path, result);
    if loaded.is_fallback() {
        metrics::record_rule_load_failure();
    }
    loaded
}

/// 对事实运行一次完整的评估周期
#[instrument(skip_all, fields(facts = facts.data().len()))]
pub async fn evaluate(rules_path: &Path, facts: Facts, trace: bool) -> DecisionResponse {
    let loaded = load_rules(rules_path).await;
    evaluate_with(&loaded, facts, trace)
}

/// 使用已加载的规则评估，返回 API 响应
pub fn evaluate_with(loaded: &LoadedRules, facts: Facts, trace: bool) -> DecisionResponse {
    let decision = decide(loaded, &facts, trace);
    DecisionResponse::build(facts, loaded, &decision)
}

/// 裁决并记录决策指标和日志
pub fn decide<'a>(loaded: &'a LoadedRules, facts: &Facts, trace: bool) -> Decision<'a> {
    let arbiter = if trace {
        DecisionArbiter::new().with_trace()
    } else {
        DecisionArbiter::new()
    };

    let start = Instant::now();
    let decision = arbiter.decide(facts, &loaded.rules);
    let elapsed = start.elapsed();

    metrics::record_decision(
        decision.outcome.as_str(),
        decision.fired.len(),
        elapsed.as_secs_f64(),
    );

    info!(
        outcome = decision.outcome.as_str(),
        fired = decision.fired.len(),
        winner = decision.winner().map(|r| r.display_name()),
        summary = %render::ActionSummary(&decision.action),
        "决策完成"
    );

    decision
}
