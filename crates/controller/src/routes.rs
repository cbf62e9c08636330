//! 路由配置

use axum::{
    Router, middleware,
    routing::{get, post},
};

use aircon_shared::observability::middleware::http_tracing;

use crate::handlers;
use crate::state::AppState;

/// 构建 API 路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/rules", get(handlers::list_rules))
        .route("/api/evaluate", post(handlers::evaluate))
        .route("/api/home/evaluate", post(handlers::evaluate_home))
        .layer(middleware::from_fn(http_tracing))
        .with_state(state)
}
