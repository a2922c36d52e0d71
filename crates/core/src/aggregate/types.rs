//! Aggregated balance types.

use rust_decimal::Decimal;
use serde::Serialize;
use vihara_shared::BalanceSide;

use crate::chart::AccountClassification;
use crate::fiscal::ReportingPeriod;
use crate::transaction::TransactionRecord;

/// Opening/closing debit/credit quadruple for one period.
///
/// Debit and credit columns are accumulated separately and never netted
/// before summation, so Dr/Cr disclosure survives every rollup. Computed
/// fresh per report invocation, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalanceQuad {
    /// Debit total as of the day before the period starts.
    pub opening_debit: Decimal,
    /// Credit total as of the day before the period starts.
    pub opening_credit: Decimal,
    /// Debit total at the end of the period.
    pub closing_debit: Decimal,
    /// Credit total at the end of the period.
    pub closing_credit: Decimal,
}

impl BalanceQuad {
    /// Adds another quadruple column-by-column.
    pub fn accumulate(&mut self, other: &Self) {
        self.opening_debit += other.opening_debit;
        self.opening_credit += other.opening_credit;
        self.closing_debit += other.closing_debit;
        self.closing_credit += other.closing_credit;
    }

    /// Net opening balance (debit minus credit).
    #[must_use]
    pub fn net_opening(&self) -> Decimal {
        self.opening_debit - self.opening_credit
    }

    /// Net closing balance (debit minus credit).
    #[must_use]
    pub fn net_closing(&self) -> Decimal {
        self.closing_debit - self.closing_credit
    }

    /// Display side of the net closing balance.
    #[must_use]
    pub fn closing_side(&self) -> BalanceSide {
        BalanceSide::of_net(self.net_closing())
    }

    /// Returns true if all four columns are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.opening_debit.is_zero()
            && self.opening_credit.is_zero()
            && self.closing_debit.is_zero()
            && self.closing_credit.is_zero()
    }
}

/// A ledger with its period balances and in-period transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedLedger {
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Opening/closing balances for the period.
    pub balance: BalanceQuad,
    /// In-period transactions, chronological.
    pub transactions: Vec<TransactionRecord>,
}

/// A group with rolled-up totals, its own ledgers, and child groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedGroup {
    /// Group code.
    pub code: String,
    /// Group name.
    pub name: String,
    /// Classification inherited from the root.
    pub classification: AccountClassification,
    /// Sum of all child totals plus this group's own ledger balances.
    pub totals: BalanceQuad,
    /// Ledgers owned directly by this group, in chart order.
    pub ledgers: Vec<AggregatedLedger>,
    /// Child groups, in chart order.
    pub children: Vec<AggregatedGroup>,
}

impl AggregatedGroup {
    /// Sums the balances of every ledger in this subtree.
    ///
    /// Grand totals are taken over ledgers only, never over group rows,
    /// so nothing is double counted.
    #[must_use]
    pub fn ledger_totals(&self) -> BalanceQuad {
        let mut totals = BalanceQuad::default();
        for ledger in &self.ledgers {
            totals.accumulate(&ledger.balance);
        }
        for child in &self.children {
            totals.accumulate(&child.ledger_totals());
        }
        totals
    }
}

/// The fully aggregated chart for one reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedTree {
    /// The period the balances cover.
    pub period: ReportingPeriod,
    /// Root groups in chart order.
    pub roots: Vec<AggregatedGroup>,
}

impl AggregatedTree {
    /// Sums the balances of every ledger in the tree.
    #[must_use]
    pub fn ledger_totals(&self) -> BalanceQuad {
        let mut totals = BalanceQuad::default();
        for root in &self.roots {
            totals.accumulate(&root.ledger_totals());
        }
        totals
    }

    /// Finds a root group by classification.
    #[must_use]
    pub fn root_by_classification(
        &self,
        classification: AccountClassification,
    ) -> Option<&AggregatedGroup> {
        self.roots
            .iter()
            .find(|root| root.classification == classification)
    }
}
