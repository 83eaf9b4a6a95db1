//! HH:MM time inputs on the entry form.

use chrono::NaiveTime;
use std::fmt;

use crate::domain::clock::Clock;
use crate::domain::errors::ValidationError;

const TIME_FORMAT: &str = "%H:%M";

/// Which of the two time inputs is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    In,
    Out,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSlot::In => write!(f, "in time"),
            TimeSlot::Out => write!(f, "out time"),
        }
    }
}

/// A 24-hour `HH:MM` value that can be typed or stamped from the clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeField {
    value: String,
}

impl TimeField {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw text as the user sees it
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Mutable access for text-edit widgets
    pub fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }

    /// Manual edit; the text is kept as typed until submit
    pub fn set(&mut self, raw: impl Into<String>) {
        self.value = raw.into();
    }

    /// Stamp the field with the clock's local time, zero padded
    pub fn set_now(&mut self, clock: &dyn Clock) {
        self.value = clock.now().format(TIME_FORMAT).to_string();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Parsed time, if the text is a valid `HH:MM`
    pub fn parsed(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.value.trim(), TIME_FORMAT).ok()
    }

    /// Check the field; blank passes unless `required`
    pub fn validate(&self, slot: TimeSlot, required: bool) -> Result<(), ValidationError> {
        if self.is_blank() {
            if required {
                return Err(ValidationError::Required(slot.into()));
            }
            return Ok(());
        }
        match self.parsed() {
            Some(_) => Ok(()),
            None => Err(ValidationError::InvalidTime {
                slot,
                value: self.value.clone(),
            }),
        }
    }

    /// Value written to the store: canonical `HH:MM`, or blank
    pub fn to_payload(&self) -> String {
        match self.parsed() {
            Some(time) => time.format(TIME_FORMAT).to_string(),
            None => self.value.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::entry_form::EntryField;

    #[test]
    fn test_set_now_zero_pads() {
        let clock = FixedClock::at("2026-10-19T14:05:00+05:30").unwrap();
        let mut field = TimeField::new();
        field.set_now(&clock);
        assert_eq!(field.value(), "14:05");

        let early = FixedClock::at("2026-10-19T07:03:59+05:30").unwrap();
        field.set_now(&early);
        assert_eq!(field.value(), "07:03");
    }

    #[test]
    fn test_manual_edit_and_validation() {
        let mut field = TimeField::new();
        assert_eq!(
            field.validate(TimeSlot::In, true),
            Err(ValidationError::Required(EntryField::InTime))
        );
        assert_eq!(field.validate(TimeSlot::Out, false), Ok(()));

        field.set("25:00");
        assert!(matches!(
            field.validate(TimeSlot::Out, false),
            Err(ValidationError::InvalidTime { slot: TimeSlot::Out, .. })
        ));

        field.set("9:30");
        assert_eq!(field.validate(TimeSlot::In, true), Ok(()));
        assert_eq!(field.to_payload(), "09:30");
    }

    #[test]
    fn test_clear() {
        let mut field = TimeField::new();
        field.set("10:15");
        field.clear();
        assert!(field.is_blank());
        assert_eq!(field, TimeField::default());
    }
}
