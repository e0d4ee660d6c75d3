//! In-memory decision repository for tests and local runs.
//!
//! Records are keyed by `(user, civil day)`; the upsert happens inside one
//! write-lock section, which gives the same atomicity as the database
//! constraint in the PostgreSQL adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::decision::{CivilCalendar, DecisionRecord};
use crate::domain::foundation::{DomainError, MenuItemId, Timestamp, UserId};
use crate::ports::DecisionRepository;

#[derive(Debug)]
pub struct InMemoryDecisionRepository {
    calendar: CivilCalendar,
    records: RwLock<HashMap<(UserId, NaiveDate), DecisionRecord>>,
}

impl InMemoryDecisionRepository {
    pub fn new(calendar: CivilCalendar) -> Self {
        Self {
            calendar,
            records: RwLock::new(HashMap::new()),
        }
    }

    // === Test Helpers ===

    /// Every stored record, newest first.
    pub fn all_records(&self) -> Vec<DecisionRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        newest_first(records.values().cloned())
    }

    fn user_records(&self, user_id: UserId) -> Vec<DecisionRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        newest_first(
            records
                .values()
                .filter(|r| r.user_id() == user_id)
                .cloned(),
        )
    }
}

fn newest_first(records: impl Iterator<Item = DecisionRecord>) -> Vec<DecisionRecord> {
    let mut records: Vec<DecisionRecord> = records.collect();
    records.sort_by(|a, b| b.decided_at().cmp(a.decided_at()));
    records
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn record_decision(
        &self,
        user_id: UserId,
        menu_id: MenuItemId,
        decided_at: Timestamp,
    ) -> Result<DecisionRecord, DomainError> {
        let day = self.calendar.day_of(&decided_at);
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        let record = match records.get_mut(&(user_id, day)) {
            Some(existing) => {
                existing.refresh(menu_id, decided_at, &self.calendar)?;
                existing.clone()
            }
            None => {
                let record = DecisionRecord::new(user_id, menu_id, decided_at, &self.calendar);
                records.insert((user_id, day), record.clone());
                record
            }
        };

        Ok(record)
    }

    async fn recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<DecisionRecord>, DomainError> {
        let mut records = self.user_records(user_id);
        records.truncate(limit);
        Ok(records)
    }

    async fn by_user_since(
        &self,
        user_id: UserId,
        since: Timestamp,
    ) -> Result<Vec<DecisionRecord>, DomainError> {
        Ok(self
            .user_records(user_id)
            .into_iter()
            .filter(|r| !r.decided_at().is_before(&since))
            .collect())
    }

    async fn find_for_day(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<Option<DecisionRecord>, DomainError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&(user_id, day)).cloned())
    }
}
