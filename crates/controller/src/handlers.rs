//! API 处理器

use axum::{
    Json,
    extract::{Query, State},
};
use rule_engine::{Facts, LoadedRules, value_type_name};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::dto::DecisionResponse;
use crate::error::{ApiError, Result};
use crate::facts::HomeFacts;
use crate::service;
use crate::state::AppState;

/// 评估查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EvaluateQuery {
    /// 是否返回每条触发规则的评估追踪
    #[serde(default)]
    pub trace: bool,
}

/// 健康检查
pub async fn health() -> &'static str {
    "OK"
}

/// 查看当前规则文件内容
pub async fn list_rules(State(state): State<AppState>) -> Json<LoadedRules> {
    Json(service::load_rules(state.rules_path()).await)
}

/// 对任意扁平事实对象做决策
pub async fn evaluate(
    State(state): State<AppState>,
    Query(query): Query<EvaluateQuery>,
    Json(body): Json<Value>,
) -> Result<Json<DecisionResponse>> {
    let facts = match body {
        Value::Object(map) => Facts::new(map),
        other => return Err(ApiError::InvalidFacts(value_type_name(&other).to_string())),
    };

    Ok(Json(
        service::evaluate(state.rules_path(), facts, query.trace).await,
    ))
}

/// 对家居表单事实做决策
pub async fn evaluate_home(
    State(state): State<AppState>,
    Query(query): Query<EvaluateQuery>,
    Json(home): Json<HomeFacts>,
) -> Result<Json<DecisionResponse>> {
    home.validate()?;

    Ok(Json(
        service::evaluate(state.rules_path(), home.to_facts(), query.trace).await,
    ))
}

/// Prometheus 指标
pub async fn metrics(State(state): State<AppState>) -> Result<String> {
    state
        .metrics()
        .map(|handle| handle.render())
        .ok_or(ApiError::MetricsDisabled)
}
