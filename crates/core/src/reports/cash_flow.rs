//! Cash flow report.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::fiscal::ReportingPeriod;
use crate::transaction::TransactionRecord;

/// Category name for transactions whose ledger code has no mapping.
///
/// Unmapped movements are bucketed here instead of being dropped, so the
/// report totals always account for every transaction.
pub const OTHER_CATEGORY: &str = "Other";

/// One named inflow or outflow category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowCategory {
    /// Category display name.
    pub name: String,
    /// Sum of transaction amounts in this category.
    pub amount: Decimal,
    /// The transactions behind the amount, chronological.
    pub transactions: Vec<TransactionRecord>,
}

/// Opening/closing cash and period totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CashFlowSummary {
    /// Cash at the start of the period.
    pub opening_cash: Decimal,
    /// Sum of all inflow categories.
    pub total_inflows: Decimal,
    /// Sum of all outflow categories.
    pub total_outflows: Decimal,
    /// `total_inflows - total_outflows`.
    pub net_cash_flow: Decimal,
    /// `opening_cash + net_cash_flow`.
    pub closing_cash: Decimal,
}

/// The full cash flow report.
///
/// Inflows and outflows are two disjoint category maps, never merged into
/// one signed total. Zero-amount categories are retained so a consumer can
/// render all known categories; filtering them is a presentation concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowReport {
    /// The period the report covers.
    pub period: ReportingPeriod,
    /// Summary totals.
    pub summary: CashFlowSummary,
    /// Inflow categories keyed by category slug, deterministically ordered.
    pub inflows: BTreeMap<String, CashFlowCategory>,
    /// Outflow categories keyed by category slug, deterministically ordered.
    pub outflows: BTreeMap<String, CashFlowCategory>,
}

/// Buckets cash-affecting transactions into named categories.
pub struct CashFlowClassifier;

impl CashFlowClassifier {
    /// Classifies transactions into inflow/outflow categories for a period.
    ///
    /// `category_map` maps a ledger code to its category name; the
    /// transaction's kind decides the side (receipts and contra-in are
    /// inflows, payments and contra-out are outflows). Each transaction
    /// lands in exactly one category; unmapped codes fall into "Other".
    #[must_use]
    pub fn classify(
        transactions: &[TransactionRecord],
        category_map: &HashMap<String, String>,
        opening_cash: Decimal,
        period: ReportingPeriod,
    ) -> CashFlowReport {
        // Every known category appears on both sides, at zero, up front.
        let mut inflows = Self::seeded_categories(category_map);
        let mut outflows = Self::seeded_categories(category_map);

        for txn in transactions {
            if !period.contains(txn.date) {
                continue;
            }
            let name = category_map
                .get(&txn.ledger_code)
                .map_or(OTHER_CATEGORY, String::as_str);
            let side = if txn.kind.is_inflow() {
                &mut inflows
            } else {
                &mut outflows
            };
            let category = side
                .entry(Self::category_key(name))
                .or_insert_with(|| CashFlowCategory {
                    name: name.to_string(),
                    amount: Decimal::ZERO,
                    transactions: Vec::new(),
                });
            category.amount += txn.amount();
            category.transactions.push(txn.clone());
        }

        for side in [&mut inflows, &mut outflows] {
            for category in side.values_mut() {
                category.transactions.sort_by_key(|txn| txn.date);
            }
        }

        let total_inflows: Decimal = inflows.values().map(|c| c.amount).sum();
        let total_outflows: Decimal = outflows.values().map(|c| c.amount).sum();
        let net_cash_flow = total_inflows - total_outflows;

        debug!(
            inflow_categories = inflows.len(),
            outflow_categories = outflows.len(),
            %net_cash_flow,
            "classified cash flows"
        );

        CashFlowReport {
            period,
            summary: CashFlowSummary {
                opening_cash,
                total_inflows,
                total_outflows,
                net_cash_flow,
                closing_cash: opening_cash + net_cash_flow,
            },
            inflows,
            outflows,
        }
    }

    fn seeded_categories(
        category_map: &HashMap<String, String>,
    ) -> BTreeMap<String, CashFlowCategory> {
        let mut seeded = BTreeMap::new();
        for name in category_map.values() {
            seeded
                .entry(Self::category_key(name))
                .or_insert_with(|| CashFlowCategory {
                    name: name.clone(),
                    amount: Decimal::ZERO,
                    transactions: Vec::new(),
                });
        }
        seeded
    }

    /// Stable lowercase slug of a category name, usable as a map key.
    #[must_use]
    pub fn category_key(name: &str) -> String {
        let mut key = String::with_capacity(name.len());
        let mut last_was_separator = true;
        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() {
                key.push(ch.to_ascii_lowercase());
                last_was_separator = false;
            } else if !last_was_separator {
                key.push('_');
                last_was_separator = true;
            }
        }
        while key.ends_with('_') {
            key.pop();
        }
        key
    }
}
