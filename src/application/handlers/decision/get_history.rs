//! GetHistoryHandler - Query handler for a user's recent decisions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::decision::{DecisionError, DecisionRecord, MenuItem, HISTORY_WINDOW_DAYS};
use crate::domain::foundation::{MenuItemId, UserId};
use crate::ports::{Clock, DecisionRepository, MenuCatalog};

/// Query for the decision history of a user.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub user_id: UserId,
}

/// A decision record joined with its menu item.
///
/// `menu` is `None` when the item has since been removed from the catalog.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub record: DecisionRecord,
    pub menu: Option<MenuItem>,
}

/// Decision history, newest first.
#[derive(Debug, Clone)]
pub struct DecisionHistory {
    pub entries: Vec<HistoryEntry>,
    pub total: usize,
}

/// Handler for history queries.
pub struct GetHistoryHandler {
    repository: Arc<dyn DecisionRepository>,
    catalog: Arc<dyn MenuCatalog>,
    clock: Arc<dyn Clock>,
}

impl GetHistoryHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        catalog: Arc<dyn MenuCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
        }
    }

    /// Records decided within the last five days.
    pub async fn handle(&self, query: GetHistoryQuery) -> Result<DecisionHistory, DecisionError> {
        let since = self.clock.now().minus_days(HISTORY_WINDOW_DAYS);
        let records = self.repository.by_user_since(query.user_id, since).await?;
        let entries = hydrate(self.catalog.as_ref(), records).await?;

        tracing::debug!(user_id = %query.user_id, total = entries.len(), "Loaded decision history");

        Ok(DecisionHistory {
            total: entries.len(),
            entries,
        })
    }

    /// The `limit` most recent records, without menu details.
    pub async fn recent(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<DecisionRecord>, DecisionError> {
        Ok(self.repository.recent_by_user(user_id, limit).await?)
    }
}

/// Joins records with their menu items using one catalog lookup.
pub(crate) async fn hydrate(
    catalog: &dyn MenuCatalog,
    records: Vec<DecisionRecord>,
) -> Result<Vec<HistoryEntry>, DecisionError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut ids: Vec<MenuItemId> = records.iter().map(DecisionRecord::menu_id).collect();
    ids.sort();
    ids.dedup();

    let menus: HashMap<MenuItemId, MenuItem> = catalog
        .list_by_ids(&ids)
        .await?
        .into_iter()
        .map(|item| (item.id(), item))
        .collect();

    Ok(records
        .into_iter()
        .map(|record| HistoryEntry {
            menu: menus.get(&record.menu_id()).cloned(),
            record,
        })
        .collect())
}
