//! GetTodayDecisionHandler - Query handler for the current day's decision.

use std::sync::Arc;

use crate::domain::decision::{CivilCalendar, DecisionError};
use crate::domain::foundation::UserId;
use crate::ports::{Clock, DecisionRepository, MenuCatalog};

use super::get_history::{hydrate, HistoryEntry};

/// Handler for "what did I pick today".
pub struct GetTodayDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
    catalog: Arc<dyn MenuCatalog>,
    clock: Arc<dyn Clock>,
    calendar: CivilCalendar,
}

impl GetTodayDecisionHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        catalog: Arc<dyn MenuCatalog>,
        clock: Arc<dyn Clock>,
        calendar: CivilCalendar,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
            calendar,
        }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Option<HistoryEntry>, DecisionError> {
        let today = self.calendar.day_of(&self.clock.now());
        let Some(record) = self.repository.find_for_day(user_id, today).await? else {
            return Ok(None);
        };
        Ok(hydrate(self.catalog.as_ref(), vec![record]).await?.pop())
    }
}
