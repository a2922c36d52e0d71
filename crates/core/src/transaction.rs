//! Posted transaction records.
//!
//! Transactions arrive from the persistence layer as already-posted,
//! balanced movements. The engine never mutates them; every aggregation
//! produces new derived values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cash-movement classification of a posted transaction.
///
/// Drives cash-flow bucketing and statement running-balance direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money received into the account.
    Receipt,
    /// Money paid out of the account.
    Payment,
    /// Internal transfer arriving from another cash/bank account.
    ContraIn,
    /// Internal transfer leaving to another cash/bank account.
    ContraOut,
}

impl TransactionKind {
    /// Returns true if this kind increases the holding account's balance.
    #[must_use]
    pub fn is_inflow(self) -> bool {
        matches!(self, Self::Receipt | Self::ContraIn)
    }

    /// Returns true if this kind decreases the holding account's balance.
    #[must_use]
    pub fn is_outflow(self) -> bool {
        !self.is_inflow()
    }
}

/// A single posted ledger movement, as supplied by the persistence layer.
///
/// Exactly one of `debit` and `credit` is non-zero for a simple line; both
/// sides are retained unchanged for audit, never netted at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Code of the ledger this movement was posted to.
    pub ledger_code: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Journal entry code (e.g., "RCP-0042").
    pub entry_code: String,
    /// Optional narration text.
    pub narration: Option<String>,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Cash-movement kind.
    pub kind: TransactionKind,
    /// Optional payee/payer name.
    pub counterparty: Option<String>,
}

impl TransactionRecord {
    /// The movement's magnitude: the non-zero side of the debit/credit pair.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.debit + self.credit
    }

    /// The movement's effect on a running balance: positive for receipts
    /// and contra-in, negative for payments and contra-out.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_inflow() {
            self.amount()
        } else {
            -self.amount()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn txn(kind: TransactionKind, debit: Decimal, credit: Decimal) -> TransactionRecord {
        TransactionRecord {
            ledger_code: "1101".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            entry_code: "E-1".to_string(),
            narration: None,
            debit,
            credit,
            kind,
            counterparty: None,
        }
    }

    #[test]
    fn test_kind_direction() {
        assert!(TransactionKind::Receipt.is_inflow());
        assert!(TransactionKind::ContraIn.is_inflow());
        assert!(TransactionKind::Payment.is_outflow());
        assert!(TransactionKind::ContraOut.is_outflow());
    }

    #[test]
    fn test_amount_takes_non_zero_side() {
        assert_eq!(txn(TransactionKind::Receipt, dec!(500), dec!(0)).amount(), dec!(500));
        assert_eq!(txn(TransactionKind::Payment, dec!(0), dec!(30)).amount(), dec!(30));
    }

    #[test]
    fn test_signed_amount_by_kind() {
        assert_eq!(
            txn(TransactionKind::Receipt, dec!(500), dec!(0)).signed_amount(),
            dec!(500)
        );
        assert_eq!(
            txn(TransactionKind::ContraIn, dec!(200), dec!(0)).signed_amount(),
            dec!(200)
        );
        assert_eq!(
            txn(TransactionKind::Payment, dec!(0), dec!(30)).signed_amount(),
            dec!(-30)
        );
        assert_eq!(
            txn(TransactionKind::ContraOut, dec!(0), dec!(75)).signed_amount(),
            dec!(-75)
        );
    }
}
