//! What To Eat - meal decision service
//!
//! Picks a dish for a user by weighted random draw, favouring dishes that
//! were not chosen recently, and remembers one decision per user per day.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
