//! Stable k-way statement merge.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::{TransactionKind, TransactionRecord};

/// Per-kind transaction streams for one account, each ordered by date.
///
/// Callers needing strict determinism beyond the date must pre-sort each
/// stream by a stable secondary key (e.g., entry sequence); the merger
/// itself guarantees stream-priority tie-breaking only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountStreams {
    /// Receipts, ordered by date.
    pub receipts: Vec<TransactionRecord>,
    /// Payments, ordered by date.
    pub payments: Vec<TransactionRecord>,
    /// Incoming transfers, ordered by date.
    pub contra_in: Vec<TransactionRecord>,
    /// Outgoing transfers, ordered by date.
    pub contra_out: Vec<TransactionRecord>,
}

impl AccountStreams {
    /// Splits a mixed transaction list into per-kind streams, preserving
    /// the input order within each stream.
    #[must_use]
    pub fn from_transactions(transactions: &[TransactionRecord]) -> Self {
        let mut streams = Self::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Receipt => streams.receipts.push(txn.clone()),
                TransactionKind::Payment => streams.payments.push(txn.clone()),
                TransactionKind::ContraIn => streams.contra_in.push(txn.clone()),
                TransactionKind::ContraOut => streams.contra_out.push(txn.clone()),
            }
        }
        streams
    }

    /// Total number of transactions across all four streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receipts.len() + self.payments.len() + self.contra_in.len() + self.contra_out.len()
    }

    /// Returns true if all four streams are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One row of a merged running-balance ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    /// Transaction date.
    pub date: NaiveDate,
    /// Journal entry code.
    pub entry_code: String,
    /// Payee/payer, if recorded.
    pub counterparty: Option<String>,
    /// Narration, if recorded.
    pub narration: Option<String>,
    /// Movement kind (decides which display column the amount lands in).
    pub kind: TransactionKind,
    /// Movement magnitude, always positive.
    pub amount: Decimal,
    /// Balance after this row.
    pub running_balance: Decimal,
}

/// A chronological ledger with running balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningLedger {
    /// Balance before the first row.
    pub opening_balance: Decimal,
    /// Merged rows, date ascending, stream-priority on ties.
    pub rows: Vec<StatementRow>,
    /// Balance after the last row.
    pub closing_balance: Decimal,
}

/// Merges per-kind streams into one running-balance ledger.
pub struct StatementMerger;

impl StatementMerger {
    /// Stable k-way merge by date ascending.
    ///
    /// Ties are broken by fixed stream order (receipts, payments,
    /// contra-in, contra-out), then by position within the stream, so
    /// repeated runs on identical input always produce identical output.
    /// The running balance starts at `opening_balance` and moves by
    /// `+amount` for receipts/contra-in and `-amount` for
    /// payments/contra-out.
    #[must_use]
    pub fn merge(streams: &AccountStreams, opening_balance: Decimal) -> RunningLedger {
        let sources: [&[TransactionRecord]; 4] = [
            &streams.receipts,
            &streams.payments,
            &streams.contra_in,
            &streams.contra_out,
        ];
        let mut cursors = [0usize; 4];
        let mut rows = Vec::with_capacity(streams.len());
        let mut balance = opening_balance;

        loop {
            // Lowest date wins; strict comparison keeps the earlier
            // priority stream in front on equal dates.
            let mut next: Option<(usize, NaiveDate)> = None;
            for (priority, source) in sources.iter().enumerate() {
                if let Some(txn) = source.get(cursors[priority]) {
                    match next {
                        Some((_, best)) if txn.date >= best => {}
                        _ => next = Some((priority, txn.date)),
                    }
                }
            }
            let Some((priority, _)) = next else { break };

            let txn = &sources[priority][cursors[priority]];
            cursors[priority] += 1;
            balance += txn.signed_amount();
            rows.push(StatementRow {
                date: txn.date,
                entry_code: txn.entry_code.clone(),
                counterparty: txn.counterparty.clone(),
                narration: txn.narration.clone(),
                kind: txn.kind,
                amount: txn.amount(),
                running_balance: balance,
            });
        }

        RunningLedger {
            opening_balance,
            rows,
            closing_balance: balance,
        }
    }
}
