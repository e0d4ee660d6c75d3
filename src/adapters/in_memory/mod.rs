//! In-memory adapters.
//!
//! Back the handler and integration tests. State lives for the lifetime of
//! the process only.

mod decision_repository;
mod menu_catalog;

pub use decision_repository::InMemoryDecisionRepository;
pub use menu_catalog::InMemoryMenuCatalog;
