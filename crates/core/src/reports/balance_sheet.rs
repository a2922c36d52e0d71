//! Balance sheet report.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use vihara_shared::{discrepancy, within_tolerance};

use crate::aggregate::{AggregatedGroup, AggregatedTree};
use crate::chart::AccountClassification;

/// Previous/current amounts for a balance sheet section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionAmounts {
    /// Amount at the end of the previous period.
    pub previous: Decimal,
    /// Amount at the end of the current period.
    pub current: Decimal,
}

/// Section totals supplied by the caller, both periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSheetTotals {
    /// Assets totals.
    pub assets: SectionAmounts,
    /// Liabilities totals.
    pub liabilities: SectionAmounts,
    /// Equity totals, including the current-period profit or loss.
    pub equity: SectionAmounts,
}

/// Precomputed current-period profit or loss, injected into Equity.
///
/// Computed by an external profit-and-loss component; `name` is the equity
/// section name the synthetic line is labelled after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitOrLoss {
    /// Equity section name.
    pub name: String,
    /// Current-period profit (positive) or loss (negative).
    pub current: Decimal,
}

/// The synthetic profit/loss line appended to the Equity section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityProfitLine {
    /// Display label.
    pub name: String,
    /// Current-period amount.
    pub current: Decimal,
}

/// Advisory balance status.
///
/// Reported, never thrown: upstream data entry errors must stay visible to
/// the accountant instead of being swallowed by an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceStatus {
    /// Assets equal liabilities plus equity within tolerance.
    Balanced,
    /// The sheet does not balance; see the discrepancy amount.
    NotBalanced,
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => write!(f, "BALANCED"),
            Self::NotBalanced => write!(f, "NOT BALANCED"),
        }
    }
}

/// One classified section of the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetSection {
    /// Section classification.
    pub classification: AccountClassification,
    /// Root group trees belonging to this section, in chart order.
    pub groups: Vec<AggregatedGroup>,
    /// Synthetic profit/loss line (Equity section only).
    pub profit_line: Option<EquityProfitLine>,
    /// Section totals, both periods.
    pub totals: SectionAmounts,
}

/// The full balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetReport {
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section.
    pub equity: BalanceSheetSection,
    /// Section totals, both periods.
    pub totals: BalanceSheetTotals,
    /// Advisory balance status.
    pub status: BalanceStatus,
    /// |assets.current - (liabilities.current + equity.current)|.
    pub discrepancy: Decimal,
}

/// Builds the balance sheet from an aggregated tree and section totals.
pub struct BalanceSheetBuilder;

impl BalanceSheetBuilder {
    /// Classifies root groups into sections and runs the balance check.
    ///
    /// Classification was resolved at tree-build time from the root-code
    /// convention (1000/2000/3000); a chart that does not follow it yields
    /// empty sections rather than an error.
    #[must_use]
    pub fn build(
        tree: &AggregatedTree,
        totals: BalanceSheetTotals,
        profit_or_loss: &ProfitOrLoss,
    ) -> BalanceSheetReport {
        let assets = Self::section(tree, AccountClassification::Asset, totals.assets, None);
        let liabilities = Self::section(
            tree,
            AccountClassification::Liability,
            totals.liabilities,
            None,
        );
        let equity = Self::section(
            tree,
            AccountClassification::Equity,
            totals.equity,
            Some(EquityProfitLine {
                name: format!("{} - Current Period Profit/Loss", profit_or_loss.name),
                current: profit_or_loss.current,
            }),
        );

        let liabilities_and_equity = totals.liabilities.current + totals.equity.current;
        let status = if within_tolerance(totals.assets.current, liabilities_and_equity) {
            BalanceStatus::Balanced
        } else {
            BalanceStatus::NotBalanced
        };
        let discrepancy = discrepancy(totals.assets.current, liabilities_and_equity);

        debug!(%status, %discrepancy, "built balance sheet");

        BalanceSheetReport {
            assets,
            liabilities,
            equity,
            totals,
            status,
            discrepancy,
        }
    }

    fn section(
        tree: &AggregatedTree,
        classification: AccountClassification,
        totals: SectionAmounts,
        profit_line: Option<EquityProfitLine>,
    ) -> BalanceSheetSection {
        let groups = tree
            .roots
            .iter()
            .filter(|root| root.classification == classification)
            .cloned()
            .collect();
        BalanceSheetSection {
            classification,
            groups,
            profit_line,
            totals,
        }
    }
}
