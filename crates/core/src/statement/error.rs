//! Statement error types.

use thiserror::Error;

/// Errors raised while building statements.
#[derive(Debug, Error)]
pub enum StatementError {
    /// A cancelled or timed-out run left some accounts unfinished.
    ///
    /// Fatal for the affected subset: the caller decides whether to retry
    /// only the named accounts or abort the whole report. A truncated
    /// report is never returned silently.
    #[error("Report incomplete: {} account(s) did not finish: {}", incomplete.len(), incomplete.join(", "))]
    PartialReport {
        /// Codes of the accounts that did not complete.
        incomplete: Vec<String>,
    },
}
