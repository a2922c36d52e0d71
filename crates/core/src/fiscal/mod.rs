//! Reporting period validation.

pub mod period;

pub use period::{PeriodError, ReportingPeriod};
