//! PostgreSQL implementation of DecisionRepository.
//!
//! The day upsert relies on the unique index on `(user_id, decided_on)`:
//! `INSERT ... ON CONFLICT DO UPDATE` is a single statement, so concurrent
//! decisions for one user and day converge on one row.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::decision::{CivilCalendar, DecisionRecord};
use crate::domain::foundation::{
    DecisionId, DomainError, MenuItemId, Timestamp, UserId,
};
use crate::ports::DecisionRepository;

const RECORD_COLUMNS: &str = "id, user_id, menu_id, decided_at, decided_on";

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
    calendar: CivilCalendar,
}

impl std::fmt::Debug for PostgresDecisionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDecisionRepository")
            .field("pool", &"PgPool")
            .field("calendar", &self.calendar)
            .finish()
    }
}

impl PostgresDecisionRepository {
    /// Creates a repository that buckets decisions by `calendar` days.
    pub fn new(pool: PgPool, calendar: CivilCalendar) -> Self {
        Self { pool, calendar }
    }
}

/// Database row for decision records.
#[derive(Debug, sqlx::FromRow)]
struct DecisionRow {
    id: uuid::Uuid,
    user_id: i64,
    menu_id: i64,
    decided_at: DateTime<Utc>,
    decided_on: NaiveDate,
}

impl TryFrom<DecisionRow> for DecisionRecord {
    type Error = DomainError;

    fn try_from(row: DecisionRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id in decision row: {}", e)))?;

        Ok(DecisionRecord::reconstitute(
            DecisionId::from_uuid(row.id),
            user_id,
            MenuItemId::new(row.menu_id),
            Timestamp::from_datetime(row.decided_at),
            row.decided_on,
        ))
    }
}

fn into_records(rows: Vec<DecisionRow>) -> Result<Vec<DecisionRecord>, DomainError> {
    rows.into_iter().map(DecisionRecord::try_from).collect()
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn record_decision(
        &self,
        user_id: UserId,
        menu_id: MenuItemId,
        decided_at: Timestamp,
    ) -> Result<DecisionRecord, DomainError> {
        let candidate = DecisionRecord::new(user_id, menu_id, decided_at, &self.calendar);

        let row: DecisionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO decision_records (id, user_id, menu_id, decided_at, decided_on)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, decided_on) DO UPDATE SET
                menu_id = EXCLUDED.menu_id,
                decided_at = EXCLUDED.decided_at
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(candidate.id().as_uuid())
        .bind(user_id.value())
        .bind(menu_id.value())
        .bind(decided_at.as_datetime())
        .bind(candidate.decided_on())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert decision: {}", e)))?;

        row.try_into()
    }

    async fn recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<DecisionRecord>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<DecisionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM decision_records
            WHERE user_id = $1
            ORDER BY decided_at DESC
            LIMIT $2
            "#,
            RECORD_COLUMNS
        ))
        .bind(user_id.value())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch recent decisions: {}", e)))?;

        into_records(rows)
    }

    async fn by_user_since(
        &self,
        user_id: UserId,
        since: Timestamp,
    ) -> Result<Vec<DecisionRecord>, DomainError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM decision_records
            WHERE user_id = $1 AND decided_at >= $2
            ORDER BY decided_at DESC
            "#,
            RECORD_COLUMNS
        ))
        .bind(user_id.value())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch decision history: {}", e)))?;

        into_records(rows)
    }

    async fn find_for_day(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<Option<DecisionRecord>, DomainError> {
        let row: Option<DecisionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM decision_records
            WHERE user_id = $1 AND decided_on = $2
            "#,
            RECORD_COLUMNS
        ))
        .bind(user_id.value())
        .bind(day)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch decision for day: {}", e)))?;

        row.map(DecisionRecord::try_from).transpose()
    }
}
