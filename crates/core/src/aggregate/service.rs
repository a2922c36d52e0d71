//! Balance aggregation service.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::types::{AggregatedGroup, AggregatedLedger, AggregatedTree, BalanceQuad};
use crate::chart::{ChartOfAccounts, GroupId};
use crate::fiscal::ReportingPeriod;
use crate::transaction::TransactionRecord;

/// Rolls per-ledger transaction history up into every ancestor group.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Aggregates balances for one reporting period.
    ///
    /// Single post-order traversal: each ledger's opening columns sum the
    /// transactions strictly before the period, closing columns add the
    /// in-period ones on top, and each group's totals are the sum of its
    /// children's totals plus its own ledgers. O(ledgers + transactions);
    /// no transaction is visited more than once.
    ///
    /// Transactions referencing a ledger code that is absent from the chart
    /// are excluded and logged; ledgers without a group were already folded
    /// into the synthetic Unclassified root when the chart was built.
    #[must_use]
    pub fn aggregate(
        chart: &ChartOfAccounts,
        transactions: &[TransactionRecord],
        period: ReportingPeriod,
    ) -> AggregatedTree {
        let mut buckets: HashMap<&str, Vec<&TransactionRecord>> = HashMap::new();
        for txn in transactions {
            buckets.entry(txn.ledger_code.as_str()).or_default().push(txn);
        }

        let roots = chart
            .roots()
            .iter()
            .map(|&root| Self::aggregate_group(chart, root, &mut buckets, period))
            .collect();

        for (ledger_code, orphaned) in &buckets {
            warn!(
                ledger_code = %ledger_code,
                count = orphaned.len(),
                "transactions reference a ledger absent from the chart; excluded"
            );
        }

        debug!(groups = chart.group_count(), "aggregated balances");
        AggregatedTree { period, roots }
    }

    /// Pure recursion: returns a freshly built node per call instead of
    /// mutating a shared accumulator, so repeated runs on the same inputs
    /// are byte-identical.
    fn aggregate_group(
        chart: &ChartOfAccounts,
        id: GroupId,
        buckets: &mut HashMap<&str, Vec<&TransactionRecord>>,
        period: ReportingPeriod,
    ) -> AggregatedGroup {
        let node = chart.node(id);

        let children: Vec<AggregatedGroup> = node
            .children
            .iter()
            .map(|&child| Self::aggregate_group(chart, child, buckets, period))
            .collect();

        let ledgers: Vec<AggregatedLedger> = node
            .ledgers
            .iter()
            .map(|ledger| {
                let history = buckets.remove(ledger.code.as_str()).unwrap_or_default();
                Self::aggregate_ledger(&ledger.code, &ledger.name, &history, period)
            })
            .collect();

        let mut totals = BalanceQuad::default();
        for child in &children {
            totals.accumulate(&child.totals);
        }
        for ledger in &ledgers {
            totals.accumulate(&ledger.balance);
        }

        AggregatedGroup {
            code: node.code.clone(),
            name: node.name.clone(),
            classification: node.classification,
            totals,
            ledgers,
            children,
        }
    }

    fn aggregate_ledger(
        code: &str,
        name: &str,
        history: &[&TransactionRecord],
        period: ReportingPeriod,
    ) -> AggregatedLedger {
        let mut balance = BalanceQuad::default();
        let mut in_period: Vec<TransactionRecord> = Vec::new();

        for txn in history {
            if period.precedes(txn.date) {
                balance.opening_debit += txn.debit;
                balance.opening_credit += txn.credit;
            } else if period.contains(txn.date) {
                in_period.push((*txn).clone());
            }
            // Transactions after the period do not affect this report.
        }

        in_period.sort_by_key(|txn| txn.date);

        balance.closing_debit = balance.opening_debit;
        balance.closing_credit = balance.opening_credit;
        for txn in &in_period {
            balance.closing_debit += txn.debit;
            balance.closing_credit += txn.credit;
        }

        AggregatedLedger {
            code: code.to_string(),
            name: name.to_string(),
            balance,
            transactions: in_period,
        }
    }
}
