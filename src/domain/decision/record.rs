//! The day-keyed decision record.

use chrono::NaiveDate;

use crate::domain::foundation::{DecisionId, MenuItemId, Timestamp, UserId, ValidationError};

use super::CivilCalendar;

/// One user's decision for one civil day.
///
/// The pair `(user_id, decided_on)` is unique across the store. A later
/// decision on the same day refreshes the record in place; records for
/// other days are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    id: DecisionId,
    user_id: UserId,
    menu_id: MenuItemId,
    decided_at: Timestamp,
    decided_on: NaiveDate,
}

impl DecisionRecord {
    /// Creates a fresh record, deriving its civil day from `decided_at`.
    pub fn new(
        user_id: UserId,
        menu_id: MenuItemId,
        decided_at: Timestamp,
        calendar: &CivilCalendar,
    ) -> Self {
        Self {
            id: DecisionId::new(),
            user_id,
            menu_id,
            decided_at,
            decided_on: calendar.day_of(&decided_at),
        }
    }

    /// Rebuilds a record from storage.
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        menu_id: MenuItemId,
        decided_at: Timestamp,
        decided_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            menu_id,
            decided_at,
            decided_on,
        }
    }

    /// Replaces the chosen item and timestamp within the same civil day.
    pub fn refresh(
        &mut self,
        menu_id: MenuItemId,
        decided_at: Timestamp,
        calendar: &CivilCalendar,
    ) -> Result<(), ValidationError> {
        let day = calendar.day_of(&decided_at);
        if day != self.decided_on {
            return Err(ValidationError::invalid_format(
                "decided_at",
                format!("{} belongs to {}, record is for {}", decided_at.as_datetime(), day, self.decided_on),
            ));
        }
        self.menu_id = menu_id;
        self.decided_at = decided_at;
        Ok(())
    }

    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn menu_id(&self) -> MenuItemId {
        self.menu_id
    }

    pub fn decided_at(&self) -> &Timestamp {
        &self.decided_at
    }

    pub fn decided_on(&self) -> NaiveDate {
        self.decided_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn user() -> UserId {
        UserId::new(1).unwrap()
    }

    #[test]
    fn new_record_derives_civil_day() {
        let calendar = CivilCalendar::from_offset_str("+08:00").unwrap();
        let record = DecisionRecord::new(user(), MenuItemId::new(3), at("2024-05-01T20:00:00Z"), &calendar);

        assert_eq!(record.decided_on(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(record.menu_id(), MenuItemId::new(3));
    }

    #[test]
    fn refresh_within_same_day_keeps_identity() {
        let calendar = CivilCalendar::utc();
        let mut record = DecisionRecord::new(user(), MenuItemId::new(1), at("2024-05-01T09:00:00Z"), &calendar);
        let id = *record.id();

        record
            .refresh(MenuItemId::new(2), at("2024-05-01T11:00:00Z"), &calendar)
            .unwrap();

        assert_eq!(record.id(), &id);
        assert_eq!(record.menu_id(), MenuItemId::new(2));
        assert_eq!(record.decided_at(), &at("2024-05-01T11:00:00Z"));
    }

    #[test]
    fn refresh_rejects_other_days() {
        let calendar = CivilCalendar::utc();
        let mut record = DecisionRecord::new(user(), MenuItemId::new(1), at("2024-05-01T09:00:00Z"), &calendar);

        let result = record.refresh(MenuItemId::new(2), at("2024-05-02T00:00:00Z"), &calendar);

        assert!(result.is_err());
        assert_eq!(record.menu_id(), MenuItemId::new(1));
    }
}
