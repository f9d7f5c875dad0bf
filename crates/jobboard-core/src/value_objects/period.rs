//! Date ranges for work experience and education.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// A date interval; a missing end means the period is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Validates and builds a date range.
    ///
    /// # Errors
    ///
    /// Returns `date_range.end_before_start` when `end < start`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let Some(end) = end {
            if end < start {
                return Err(ValidationError::new(
                    "end",
                    "date_range.end_before_start",
                    format!("period ends {end} before it starts {start}"),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// First day of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period, if it has ended.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the period has no end date.
    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }
}
