//! Multi-account Receipts & Payments report.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::StatementError;
use super::merger::{AccountStreams, RunningLedger, StatementMerger};
use crate::transaction::TransactionRecord;

/// One account's inputs for the report, constructed per request from
/// filtered transactions and discarded once the report is emitted.
#[derive(Debug, Clone)]
pub struct AccountInput {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance carried into the period.
    pub opening_balance: Decimal,
    /// Per-kind transaction streams, each ordered by date.
    pub streams: AccountStreams,
}

/// One account's section of the Receipts & Payments report.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatement {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance carried into the period.
    pub opening_balance: Decimal,
    /// The per-kind streams the section was built from.
    pub streams: AccountStreams,
    /// Sum of receipts.
    pub total_receipts: Decimal,
    /// Sum of payments.
    pub total_payments: Decimal,
    /// Sum of incoming transfers.
    pub total_contra_in: Decimal,
    /// Sum of outgoing transfers.
    pub total_contra_out: Decimal,
    /// Balance at the end of the period.
    pub closing_balance: Decimal,
    /// Chronological merged view with running balances.
    pub ledger: RunningLedger,
}

/// Report-wide totals across all accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReceiptsPaymentsTotals {
    /// Sum of opening balances.
    pub opening_balance: Decimal,
    /// Sum of receipts.
    pub total_receipts: Decimal,
    /// Sum of payments.
    pub total_payments: Decimal,
    /// Sum of incoming transfers.
    pub total_contra_in: Decimal,
    /// Sum of outgoing transfers.
    pub total_contra_out: Decimal,
    /// Sum of closing balances.
    pub closing_balance: Decimal,
}

/// The full Receipts & Payments report.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptsPaymentsReport {
    /// Per-account sections, in input order.
    pub accounts: Vec<AccountStatement>,
    /// Report-wide totals.
    pub grand_totals: ReceiptsPaymentsTotals,
}

/// Shared cancellation/deadline context for a report run.
///
/// Cloning shares the same cancellation flag; cancelling aborts only
/// not-yet-started account tasks, never a finished one.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl ReportContext {
    /// Context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that cancels itself once `timeout` has elapsed.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Requests cancellation of all in-flight work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true if cancelled or past the deadline.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Builds the Receipts & Payments report.
pub struct ReceiptsPaymentsBuilder;

impl ReceiptsPaymentsBuilder {
    /// Builds the report sequentially; account order matches input order.
    #[must_use]
    pub fn build(accounts: &[AccountInput]) -> ReceiptsPaymentsReport {
        let statements: Vec<AccountStatement> =
            accounts.iter().map(Self::account_statement).collect();
        Self::assemble(statements)
    }

    /// Builds the report with one merge task per account on a bounded pool.
    ///
    /// Accounts are independent, so tasks share no state; results fan back
    /// in by account index, keeping the output identical to the sequential
    /// builder. A cancellation or deadline hit skips not-yet-started
    /// accounts and surfaces [`StatementError::PartialReport`] naming them,
    /// never a silently truncated report.
    pub fn build_parallel(
        accounts: &[AccountInput],
        ctx: &ReportContext,
    ) -> Result<ReceiptsPaymentsReport, StatementError> {
        let workers = Self::worker_count(accounts.len());
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(err) => {
                // No pool, no parallelism; the sequential path is still correct.
                warn!(%err, "worker pool unavailable, building sequentially");
                return Ok(Self::build(accounts));
            }
        };

        debug!(accounts = accounts.len(), workers, "building receipts & payments");

        let results: Vec<Option<AccountStatement>> = pool.install(|| {
            accounts
                .par_iter()
                .map(|account| {
                    if ctx.is_cancelled() {
                        None
                    } else {
                        Some(Self::account_statement(account))
                    }
                })
                .collect()
        });

        let incomplete: Vec<String> = results
            .iter()
            .zip(accounts)
            .filter(|(result, _)| result.is_none())
            .map(|(_, account)| account.code.clone())
            .collect();
        if !incomplete.is_empty() {
            return Err(StatementError::PartialReport { incomplete });
        }

        Ok(Self::assemble(results.into_iter().flatten().collect()))
    }

    fn worker_count(account_count: usize) -> usize {
        let cpus = std::thread::available_parallelism().map_or(1, usize::from);
        account_count.clamp(1, cpus)
    }

    fn account_statement(input: &AccountInput) -> AccountStatement {
        let ledger = StatementMerger::merge(&input.streams, input.opening_balance);
        let sum = |txns: &[TransactionRecord]| -> Decimal {
            txns.iter().map(TransactionRecord::amount).sum()
        };
        AccountStatement {
            code: input.code.clone(),
            name: input.name.clone(),
            opening_balance: input.opening_balance,
            total_receipts: sum(&input.streams.receipts),
            total_payments: sum(&input.streams.payments),
            total_contra_in: sum(&input.streams.contra_in),
            total_contra_out: sum(&input.streams.contra_out),
            closing_balance: ledger.closing_balance,
            streams: input.streams.clone(),
            ledger,
        }
    }

    fn assemble(accounts: Vec<AccountStatement>) -> ReceiptsPaymentsReport {
        let mut grand_totals = ReceiptsPaymentsTotals::default();
        for account in &accounts {
            grand_totals.opening_balance += account.opening_balance;
            grand_totals.total_receipts += account.total_receipts;
            grand_totals.total_payments += account.total_payments;
            grand_totals.total_contra_in += account.total_contra_in;
            grand_totals.total_contra_out += account.total_contra_out;
            grand_totals.closing_balance += account.closing_balance;
        }
        ReceiptsPaymentsReport {
            accounts,
            grand_totals,
        }
    }
}
