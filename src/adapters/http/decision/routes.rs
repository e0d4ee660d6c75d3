//! HTTP routes for decision endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{decide, get_history, get_today, DecisionHandlers};

/// Creates the decision router, to be nested under `/api`.
pub fn decision_routes(handlers: DecisionHandlers) -> Router {
    Router::new()
        .route("/decide", post(decide))
        .route("/history", get(get_history))
        .route("/decisions/today", get(get_today))
        .with_state(handlers)
}
