//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod decision;

pub use decision::{
    DecideCommand, DecideHandler, DecideResult, DecisionHistory, GetHistoryHandler,
    GetHistoryQuery, GetTodayDecisionHandler, HistoryEntry,
};
