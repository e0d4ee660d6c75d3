//! Civil calendar configuration

use serde::Deserialize;

use crate::domain::decision::CivilCalendar;

use super::error::ValidationError;

/// Which UTC offset defines a "day" for decisions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarConfig {
    /// Offset such as `+08:00`; the host's offset at startup when unset
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl CalendarConfig {
    pub fn civil_calendar(&self) -> Result<CivilCalendar, ValidationError> {
        match &self.utc_offset {
            Some(raw) => CivilCalendar::from_offset_str(raw)
                .map_err(|_| ValidationError::InvalidUtcOffset(raw.clone())),
            None => Ok(CivilCalendar::host_local()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.civil_calendar().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_offset() {
        let config = CalendarConfig {
            utc_offset: Some("+08:00".to_string()),
        };
        let calendar = config.civil_calendar().unwrap();
        assert_eq!(calendar.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_default_is_host_offset() {
        let calendar = CalendarConfig::default().civil_calendar().unwrap();
        assert_eq!(calendar, CivilCalendar::host_local());
    }

    #[test]
    fn test_invalid_offset() {
        let config = CalendarConfig {
            utc_offset: Some("Asia/Shanghai".to_string()),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset(_))
        ));
    }

    #[test]
    fn test_non_ascii_offset_is_a_validation_error() {
        let config = CalendarConfig {
            utc_offset: Some("+aéb".to_string()),
        };
        assert!(matches!(
            config.civil_calendar(),
            Err(ValidationError::InvalidUtcOffset(_))
        ));
    }
}
