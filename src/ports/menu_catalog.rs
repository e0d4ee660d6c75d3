//! Menu catalog port (read side).
//!
//! Supplies the candidates a decision is drawn from. Catalog management
//! (creating restaurants, adding or removing dishes) happens elsewhere; the
//! decision engine only ever reads.

use async_trait::async_trait;

use crate::domain::decision::MenuItem;
use crate::domain::foundation::{DomainError, MenuItemId};

/// Reader port for selectable menu items.
///
/// Implementations must exclude removed items from both operations.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Every selectable item, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError>;

    /// The items among `ids` that exist.
    ///
    /// Unknown ids are skipped silently; duplicates in `ids` yield the item once.
    async fn list_by_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItem>, DomainError>;
}
