//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth identity)
//! - `decision` - Weighted selection, civil-day records and outcome messages

pub mod decision;
pub mod foundation;
