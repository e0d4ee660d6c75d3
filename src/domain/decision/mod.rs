//! Decision module - picking a dish and remembering one choice per day.
//!
//! - `selector` - recency-penalizing weighted random selection
//! - `calendar` - civil-day bucketing under an explicit UTC offset
//! - `record` - the day-keyed `DecisionRecord`
//! - `outcome` - fresh/repeat message for a decision

mod calendar;
mod errors;
mod menu;
mod outcome;
mod record;
pub mod selector;

pub use calendar::CivilCalendar;
pub use errors::DecisionError;
pub use menu::{MenuItem, RestaurantRef};
pub use outcome::{Outcome, FRESH_MESSAGE, REPEAT_MESSAGE};
pub use record::DecisionRecord;
pub use selector::{WeightedSelection, FRESH_WEIGHT, RECENCY_WINDOW, RECENT_WEIGHT};

/// Length of the trailing window served by the history query, in days.
pub const HISTORY_WINDOW_DAYS: i64 = 5;
