//! HTTP DTOs for decision endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::decision::{DecideResult, DecisionHistory, HistoryEntry};
use crate::domain::decision::{DecisionError, MenuItem, Outcome};
use crate::domain::foundation::MenuItemId;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /api/decide`.
///
/// `menu_ids` may be absent, `null` or empty; all three mean "any menu".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecideRequest {
    #[serde(default)]
    pub menu_ids: Option<Vec<i64>>,
}

impl DecideRequest {
    pub fn menu_ids(&self) -> Vec<MenuItemId> {
        self.menu_ids
            .iter()
            .flatten()
            .map(|id| MenuItemId::new(*id))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub id: i64,
    pub restaurant_id: i64,
    pub dish_name: String,
    pub restaurant: RestaurantResponse,
}

impl From<&MenuItem> for MenuResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id().value(),
            restaurant_id: item.restaurant().id.value(),
            dish_name: item.dish_name().to_string(),
            restaurant: RestaurantResponse {
                id: item.restaurant().id.value(),
                name: item.restaurant().name.clone(),
            },
        }
    }
}

/// Response for `POST /api/decide`.
#[derive(Debug, Clone, Serialize)]
pub struct DecideResponse {
    pub menu: MenuResponse,
    pub message: String,
    pub outcome: Outcome,
    pub decided_at: String,
}

impl From<DecideResult> for DecideResponse {
    fn from(result: DecideResult) -> Self {
        Self {
            menu: MenuResponse::from(&result.menu),
            message: result.message().to_string(),
            outcome: result.outcome,
            decided_at: result.record.decided_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One stored decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecordResponse {
    pub id: String,
    pub user_id: i64,
    pub menu_id: i64,
    pub decided_at: String,
    pub decided_on: String,
    /// `None` when the menu has been removed since.
    pub menu: Option<MenuResponse>,
}

impl From<HistoryEntry> for DecisionRecordResponse {
    fn from(entry: HistoryEntry) -> Self {
        let record = entry.record;
        Self {
            id: record.id().to_string(),
            user_id: record.user_id().value(),
            menu_id: record.menu_id().value(),
            decided_at: record.decided_at().as_datetime().to_rfc3339(),
            decided_on: record.decided_on().to_string(),
            menu: entry.menu.as_ref().map(MenuResponse::from),
        }
    }
}

/// Response for `GET /api/history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<DecisionRecordResponse>,
    pub total: usize,
}

impl From<DecisionHistory> for HistoryResponse {
    fn from(history: DecisionHistory) -> Self {
        Self {
            records: history.entries.into_iter().map(Into::into).collect(),
            total: history.total,
        }
    }
}

/// Response for `GET /api/decisions/today`.
#[derive(Debug, Clone, Serialize)]
pub struct TodayResponse {
    pub record: Option<DecisionRecordResponse>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

impl From<&DecisionError> for ErrorResponse {
    fn from(error: &DecisionError) -> Self {
        match error {
            DecisionError::Infrastructure(_) => Self::internal("决策失败"),
            other => Self {
                code: other.code().to_string(),
                message: other.message(),
            },
        }
    }
}
