//! Reporting period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a reporting period.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// The period runs backwards.
    #[error("Invalid period: from {from} is after to {to}")]
    InvalidRange {
        /// Requested start date.
        from: NaiveDate,
        /// Requested end date.
        to: NaiveDate,
    },
}

/// The date range a report covers, inclusive on both ends.
///
/// Validated at construction; every report entry point takes a period by
/// value, so a backwards range is rejected before any aggregation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period, rejecting `from_date > to_date`.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, PeriodError> {
        if from_date > to_date {
            return Err(PeriodError::InvalidRange {
                from: from_date,
                to: to_date,
            });
        }
        Ok(Self { from_date, to_date })
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }

    /// Returns true if the given date is strictly before this period.
    ///
    /// Transactions on such dates contribute to opening balances.
    #[must_use]
    pub fn precedes(&self, date: NaiveDate) -> bool {
        date < self.from_date
    }
}
