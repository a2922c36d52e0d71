//! Running-balance statements.
//!
//! One stable k-way merge turns per-kind transaction streams into a
//! chronological ledger with running balances. The same merge backs both
//! the single-ledger statement and the multi-account Receipts & Payments
//! report, which can optionally fan accounts out over a bounded worker
//! pool.

pub mod error;
pub mod merger;
pub mod receipts_payments;

#[cfg(test)]
mod tests;

pub use error::StatementError;
pub use merger::{AccountStreams, RunningLedger, StatementMerger, StatementRow};
pub use receipts_payments::{
    AccountInput, AccountStatement, ReceiptsPaymentsBuilder, ReceiptsPaymentsReport,
    ReceiptsPaymentsTotals, ReportContext,
};
