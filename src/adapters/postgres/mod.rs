//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDecisionRepository` - day-keyed decision records
//! - `PostgresMenuCatalog` - active menus joined with their restaurant

mod decision_repository;
mod menu_catalog;

pub use decision_repository::PostgresDecisionRepository;
pub use menu_catalog::PostgresMenuCatalog;
