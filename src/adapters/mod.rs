//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - menu catalog and decision storage
//! - `in_memory` - test doubles for the same ports
//! - `auth` - bearer token validation
//! - `clock` - system and fixed clocks
//! - `http` - axum routes and middleware

pub mod auth;
pub mod clock;
pub mod http;
pub mod in_memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
