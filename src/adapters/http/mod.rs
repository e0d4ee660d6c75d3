//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles the public routes:
//!
//! - `GET /health` - liveness, no auth
//! - `/api/...` - decision endpoints behind `auth_middleware`

pub mod decision;
pub mod middleware;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

pub use decision::{decision_routes, DecisionHandlers};
pub use middleware::{auth_middleware, AuthState, RequireAuth};

/// Builds the application router without transport layers.
pub fn api_router(handlers: DecisionHandlers, auth: AuthState) -> Router {
    let api = decision_routes(handlers).layer(from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
