//! Trial balance report.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use vihara_shared::within_tolerance;

use crate::aggregate::{AggregatedGroup, AggregatedTree};
use crate::fiscal::ReportingPeriod;

/// Whether a trial balance row comes from a group or a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialBalanceRowKind {
    /// Group subtotal row.
    Group,
    /// Leaf ledger row.
    Ledger,
}

/// One ordered row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// Group or ledger code.
    pub code: String,
    /// Group or ledger name.
    pub name: String,
    /// Row kind.
    pub kind: TrialBalanceRowKind,
    /// Tree depth for presentation (root groups are 0).
    pub indent_level: usize,
    /// Opening debit column.
    pub opening_debit: Decimal,
    /// Opening credit column.
    pub opening_credit: Decimal,
    /// Closing debit column.
    pub closing_debit: Decimal,
    /// Closing credit column.
    pub closing_credit: Decimal,
}

/// Grand totals over every ledger (groups are excluded to avoid double
/// counting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialBalanceTotals {
    /// Total opening debit.
    pub opening_debit: Decimal,
    /// Total opening credit.
    pub opening_credit: Decimal,
    /// Total closing debit.
    pub closing_debit: Decimal,
    /// Total closing credit.
    pub closing_credit: Decimal,
    /// Closing debit equals closing credit within tolerance.
    pub is_balanced: bool,
}

/// The full trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceReport {
    /// The period the report covers.
    pub period: ReportingPeriod,
    /// Ordered rows, depth-first, parent before contents.
    pub rows: Vec<TrialBalanceRow>,
    /// Grand totals and the balance check.
    pub grand_totals: TrialBalanceTotals,
}

/// Builds the trial balance from an aggregated tree.
pub struct TrialBalanceBuilder;

impl TrialBalanceBuilder {
    /// Walks the aggregated tree depth-first into ordered, indented rows.
    ///
    /// Row order is a presentation contract: a group row is emitted first,
    /// then the ledgers it owns, then its child groups, all in the tree's
    /// insertion order (never sorted).
    #[must_use]
    pub fn build(tree: &AggregatedTree) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = tree
            .roots
            .iter()
            .flat_map(|root| Self::group_rows(root, 0))
            .collect();

        let totals = tree.ledger_totals();
        let grand_totals = TrialBalanceTotals {
            opening_debit: totals.opening_debit,
            opening_credit: totals.opening_credit,
            closing_debit: totals.closing_debit,
            closing_credit: totals.closing_credit,
            is_balanced: within_tolerance(totals.closing_debit, totals.closing_credit),
        };

        debug!(
            rows = rows.len(),
            is_balanced = grand_totals.is_balanced,
            "built trial balance"
        );

        TrialBalanceReport {
            period: tree.period,
            rows,
            grand_totals,
        }
    }

    /// Pure recursion returning a fresh row list per call.
    fn group_rows(group: &AggregatedGroup, depth: usize) -> Vec<TrialBalanceRow> {
        let mut rows = vec![TrialBalanceRow {
            code: group.code.clone(),
            name: group.name.clone(),
            kind: TrialBalanceRowKind::Group,
            indent_level: depth,
            opening_debit: group.totals.opening_debit,
            opening_credit: group.totals.opening_credit,
            closing_debit: group.totals.closing_debit,
            closing_credit: group.totals.closing_credit,
        }];

        for ledger in &group.ledgers {
            rows.push(TrialBalanceRow {
                code: ledger.code.clone(),
                name: ledger.name.clone(),
                kind: TrialBalanceRowKind::Ledger,
                indent_level: depth + 1,
                opening_debit: ledger.balance.opening_debit,
                opening_credit: ledger.balance.opening_credit,
                closing_debit: ledger.balance.closing_debit,
                closing_credit: ledger.balance.closing_credit,
            });
        }

        for child in &group.children {
            rows.extend(Self::group_rows(child, depth + 1));
        }

        rows
    }
}
