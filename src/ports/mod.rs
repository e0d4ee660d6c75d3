//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MenuCatalog` - candidate source for decisions
//! - `DecisionRepository` - day-keyed decision storage, recency and history reads
//! - `Clock` - source of "now"
//! - `SessionValidator` - bearer token verification

mod clock;
mod decision_repository;
mod menu_catalog;
mod session_validator;

pub use clock::Clock;
pub use decision_repository::DecisionRepository;
pub use menu_catalog::MenuCatalog;
pub use session_validator::SessionValidator;
