//! HTTP handlers for decision endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::decision::{
    DecideCommand, DecideHandler, GetHistoryHandler, GetHistoryQuery, GetTodayDecisionHandler,
};
use crate::domain::decision::DecisionError;

use super::dto::{
    DecideRequest, DecideResponse, DecisionRecordResponse, ErrorResponse, HistoryResponse,
    TodayResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DecisionHandlers {
    decide_handler: Arc<DecideHandler>,
    history_handler: Arc<GetHistoryHandler>,
    today_handler: Arc<GetTodayDecisionHandler>,
}

impl DecisionHandlers {
    pub fn new(
        decide_handler: Arc<DecideHandler>,
        history_handler: Arc<GetHistoryHandler>,
        today_handler: Arc<GetTodayDecisionHandler>,
    ) -> Self {
        Self {
            decide_handler,
            history_handler,
            today_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/decide - Pick today's dish
///
/// The body is optional. An empty or unparseable body decides over the
/// whole catalog.
pub async fn decide(
    State(handlers): State<DecisionHandlers>,
    RequireAuth(user): RequireAuth,
    body: Bytes,
) -> Response {
    let req = parse_decide_request(&body);

    let cmd = DecideCommand {
        user_id: user.id,
        menu_ids: req.menu_ids(),
    };

    match handlers.decide_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(DecideResponse::from(result))).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// GET /api/history - Decisions of the last five days
pub async fn get_history(
    State(handlers): State<DecisionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetHistoryQuery { user_id: user.id };

    match handlers.history_handler.handle(query).await {
        Ok(history) => (StatusCode::OK, Json(HistoryResponse::from(history))).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// GET /api/decisions/today - Today's decision, if any
pub async fn get_today(
    State(handlers): State<DecisionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.today_handler.handle(user.id).await {
        Ok(entry) => {
            let response = TodayResponse {
                record: entry.map(DecisionRecordResponse::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

fn parse_decide_request(body: &[u8]) -> DecideRequest {
    if body.iter().all(u8::is_ascii_whitespace) {
        return DecideRequest::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unparseable decide body, using whole catalog");
        DecideRequest::default()
    })
}

fn handle_decision_error(error: DecisionError) -> Response {
    let status = match &error {
        DecisionError::NoCandidates | DecisionError::ValidationFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        DecisionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Decision request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
