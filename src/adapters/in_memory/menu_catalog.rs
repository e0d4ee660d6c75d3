//! In-memory menu catalog.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::decision::MenuItem;
use crate::domain::foundation::{DomainError, MenuItemId};
use crate::ports::MenuCatalog;

/// Menu catalog backed by an ordered map, so listings come out by id.
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    items: RwLock<BTreeMap<MenuItemId, MenuItem>>,
}

impl InMemoryMenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<MenuItem>) -> Self {
        let catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Adds or replaces an item.
    pub fn insert(&self, item: MenuItem) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.id(), item);
    }

    /// Removes an item, as if it had been deleted from the menu.
    pub fn remove(&self, id: MenuItemId) -> Option<MenuItem> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MenuCatalog for InMemoryMenuCatalog {
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.values().cloned().collect())
    }

    async fn list_by_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items
            .values()
            .filter(|item| ids.contains(&item.id()))
            .cloned()
            .collect())
    }
}
