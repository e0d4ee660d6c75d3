//! Decision repository port.
//!
//! Persists one `DecisionRecord` per user per civil day and serves the
//! recency and history reads.
//!
//! # Contract
//!
//! - **Atomic day upsert**: `record_decision` must insert-or-update keyed on
//!   `(user, civil day)` as a single storage operation. A read followed by a
//!   separate write is not acceptable: concurrent requests for the same user
//!   would both miss the existing row and insert two records for one day.
//! - **Newest first**: every list is ordered by `decided_at` descending.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{DomainError, MenuItemId, Timestamp, UserId};

/// Repository port for day-keyed decision records.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Stores `menu_id` as the user's decision for the civil day of `decided_at`.
    ///
    /// Replaces item and timestamp when a record for that day already exists,
    /// otherwise inserts one. Returns the stored record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn record_decision(
        &self,
        user_id: UserId,
        menu_id: MenuItemId,
        decided_at: Timestamp,
    ) -> Result<DecisionRecord, DomainError>;

    /// The `limit` most recent records for a user.
    async fn recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<DecisionRecord>, DomainError>;

    /// All records for a user decided at or after `since`.
    ///
    /// No upper bound is applied.
    async fn by_user_since(
        &self,
        user_id: UserId,
        since: Timestamp,
    ) -> Result<Vec<DecisionRecord>, DomainError>;

    /// The user's record for one civil day, if any.
    async fn find_for_day(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<Option<DecisionRecord>, DomainError>;
}
