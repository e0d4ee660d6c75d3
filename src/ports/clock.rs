//! Clock port.
//!
//! Handlers ask the clock for "now" instead of reading the system time, so
//! tests can pin decisions to specific instants and civil days.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
