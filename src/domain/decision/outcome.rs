//! The message shown alongside a decision.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::MenuItemId;

use super::DecisionRecord;

pub const REPEAT_MESSAGE: &str = "虽然最近吃过，但命运让你再吃一次！";
pub const FRESH_MESSAGE: &str = "就决定是你了！";

/// Whether the picked item was among the user's recent decisions.
///
/// Judged against the recency list read *before* the new decision was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Fresh,
    Repeat,
}

impl Outcome {
    pub fn assess(selected: MenuItemId, recent: &[DecisionRecord]) -> Self {
        if recent.iter().any(|record| record.menu_id() == selected) {
            Outcome::Repeat
        } else {
            Outcome::Fresh
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Fresh => FRESH_MESSAGE,
            Outcome::Repeat => REPEAT_MESSAGE,
        }
    }
}
