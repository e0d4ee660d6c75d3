//! Decision command and query handlers.

mod decide;
mod get_history;
mod get_today;

pub use decide::{DecideCommand, DecideHandler, DecideResult};
pub use get_history::{DecisionHistory, GetHistoryHandler, GetHistoryQuery, HistoryEntry};
pub use get_today::GetTodayDecisionHandler;
