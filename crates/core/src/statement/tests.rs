//! Property-based and scenario tests for statements.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::StatementError;
use super::merger::{AccountStreams, StatementMerger};
use super::receipts_payments::{AccountInput, ReceiptsPaymentsBuilder, ReportContext};
use crate::transaction::{TransactionKind, TransactionRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(kind: TransactionKind, day: u32, amount: Decimal, entry: &str) -> TransactionRecord {
    let inflow = kind.is_inflow();
    TransactionRecord {
        ledger_code: "1101".to_string(),
        date: date(2026, 4, day),
        entry_code: entry.to_string(),
        narration: None,
        debit: if inflow { amount } else { Decimal::ZERO },
        credit: if inflow { Decimal::ZERO } else { amount },
        kind,
        counterparty: None,
    }
}

/// A random per-kind stream, sorted by date as the merge contract requires.
fn stream_strategy(
    kind: TransactionKind,
) -> impl Strategy<Value = Vec<TransactionRecord>> {
    prop::collection::vec((1u32..29, 1i64..100_000), 0..12).prop_map(move |raw| {
        let mut txns: Vec<TransactionRecord> = raw
            .into_iter()
            .enumerate()
            .map(|(seq, (day, cents))| {
                txn(kind, day, Decimal::new(cents, 2), &format!("{kind:?}-{seq}"))
            })
            .collect();
        txns.sort_by_key(|t| t.date);
        txns
    })
}

fn streams_strategy() -> impl Strategy<Value = AccountStreams> {
    (
        stream_strategy(TransactionKind::Receipt),
        stream_strategy(TransactionKind::Payment),
        stream_strategy(TransactionKind::ContraIn),
        stream_strategy(TransactionKind::ContraOut),
    )
        .prop_map(|(receipts, payments, contra_in, contra_out)| AccountStreams {
            receipts,
            payments,
            contra_in,
            contra_out,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Merging the same four streams repeatedly always yields the same row
    /// order and running balances.
    #[test]
    fn prop_merge_is_deterministic(
        streams in streams_strategy(),
        opening_cents in -1_000_000i64..1_000_000,
    ) {
        let opening = Decimal::new(opening_cents, 2);
        let first = StatementMerger::merge(&streams, opening);
        for _ in 0..4 {
            prop_assert_eq!(&StatementMerger::merge(&streams, opening), &first);
        }
    }

    /// Rows come out in non-decreasing date order and every transaction
    /// appears exactly once.
    #[test]
    fn prop_merge_is_chronological_and_complete(
        streams in streams_strategy(),
    ) {
        let ledger = StatementMerger::merge(&streams, Decimal::ZERO);
        prop_assert_eq!(ledger.rows.len(), streams.len());
        for pair in ledger.rows.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    /// The closing balance equals the opening balance plus the signed sum
    /// of all movements, and every intermediate row agrees.
    #[test]
    fn prop_running_balance_is_consistent(
        streams in streams_strategy(),
        opening_cents in -1_000_000i64..1_000_000,
    ) {
        let opening = Decimal::new(opening_cents, 2);
        let ledger = StatementMerger::merge(&streams, opening);

        let mut expected = opening;
        for row in &ledger.rows {
            expected += if row.kind.is_inflow() { row.amount } else { -row.amount };
            prop_assert_eq!(row.running_balance, expected);
        }
        prop_assert_eq!(ledger.closing_balance, expected);
    }

    /// The parallel builder produces exactly what the sequential one does.
    #[test]
    fn prop_parallel_matches_sequential(
        streams in prop::collection::vec(streams_strategy(), 1..6),
    ) {
        let accounts: Vec<AccountInput> = streams
            .into_iter()
            .enumerate()
            .map(|(i, streams)| AccountInput {
                code: format!("A{i}"),
                name: format!("Account {i}"),
                opening_balance: Decimal::new(i as i64 * 1000, 2),
                streams,
            })
            .collect();

        let sequential = ReceiptsPaymentsBuilder::build(&accounts);
        let parallel =
            ReceiptsPaymentsBuilder::build_parallel(&accounts, &ReportContext::new()).unwrap();

        prop_assert_eq!(parallel.grand_totals, sequential.grand_totals);
        prop_assert_eq!(parallel.accounts.len(), sequential.accounts.len());
        for (par, seq) in parallel.accounts.iter().zip(&sequential.accounts) {
            prop_assert_eq!(&par.code, &seq.code);
            prop_assert_eq!(&par.ledger, &seq.ledger);
            prop_assert_eq!(par.closing_balance, seq.closing_balance);
        }
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_same_day_ties_break_by_stream_priority() {
    // Four streams, one transaction each, all on the same day.
    let streams = AccountStreams {
        receipts: vec![txn(TransactionKind::Receipt, 10, dec!(100.00), "R-1")],
        payments: vec![txn(TransactionKind::Payment, 10, dec!(40.00), "P-1")],
        contra_in: vec![txn(TransactionKind::ContraIn, 10, dec!(25.00), "CI-1")],
        contra_out: vec![txn(TransactionKind::ContraOut, 10, dec!(10.00), "CO-1")],
    };

    let ledger = StatementMerger::merge(&streams, dec!(50.00));

    let order: Vec<&str> = ledger.rows.iter().map(|r| r.entry_code.as_str()).collect();
    assert_eq!(order, vec!["R-1", "P-1", "CI-1", "CO-1"]);

    let balances: Vec<Decimal> = ledger.rows.iter().map(|r| r.running_balance).collect();
    assert_eq!(balances, vec![dec!(150.00), dec!(110.00), dec!(135.00), dec!(125.00)]);
    assert_eq!(ledger.closing_balance, dec!(125.00));
}

#[test]
fn test_merge_preserves_within_stream_order_on_same_day() {
    let streams = AccountStreams {
        receipts: vec![
            txn(TransactionKind::Receipt, 10, dec!(1.00), "R-1"),
            txn(TransactionKind::Receipt, 10, dec!(2.00), "R-2"),
        ],
        ..AccountStreams::default()
    };
    let ledger = StatementMerger::merge(&streams, Decimal::ZERO);
    let order: Vec<&str> = ledger.rows.iter().map(|r| r.entry_code.as_str()).collect();
    assert_eq!(order, vec!["R-1", "R-2"]);
}

#[test]
fn test_empty_streams_merge_to_opening_balance() {
    let ledger = StatementMerger::merge(&AccountStreams::default(), dec!(320.00));
    assert!(ledger.rows.is_empty());
    assert_eq!(ledger.closing_balance, dec!(320.00));
}

#[test]
fn test_streams_split_from_mixed_transactions() {
    let mixed = vec![
        txn(TransactionKind::Payment, 5, dec!(10.00), "P-1"),
        txn(TransactionKind::Receipt, 3, dec!(20.00), "R-1"),
        txn(TransactionKind::Receipt, 8, dec!(30.00), "R-2"),
        txn(TransactionKind::ContraOut, 4, dec!(5.00), "CO-1"),
    ];
    let streams = AccountStreams::from_transactions(&mixed);
    assert_eq!(streams.receipts.len(), 2);
    assert_eq!(streams.payments.len(), 1);
    assert!(streams.contra_in.is_empty());
    assert_eq!(streams.contra_out.len(), 1);
    assert_eq!(streams.len(), 4);
}

#[test]
fn test_two_account_grand_totals() {
    // Donation Fund: opening 200.00, one receipt 300.00.
    // Maintenance Fund: opening 50.00, one payment 30.00.
    let accounts = vec![
        AccountInput {
            code: "DF".to_string(),
            name: "Donation Fund".to_string(),
            opening_balance: dec!(200.00),
            streams: AccountStreams {
                receipts: vec![txn(TransactionKind::Receipt, 5, dec!(300.00), "R-1")],
                ..AccountStreams::default()
            },
        },
        AccountInput {
            code: "MF".to_string(),
            name: "Maintenance Fund".to_string(),
            opening_balance: dec!(50.00),
            streams: AccountStreams {
                payments: vec![txn(TransactionKind::Payment, 9, dec!(30.00), "P-1")],
                ..AccountStreams::default()
            },
        },
    ];

    let report = ReceiptsPaymentsBuilder::build(&accounts);

    assert_eq!(report.grand_totals.opening_balance, dec!(250.00));
    assert_eq!(report.grand_totals.total_receipts, dec!(300.00));
    assert_eq!(report.grand_totals.total_payments, dec!(30.00));
    assert_eq!(report.grand_totals.closing_balance, dec!(520.00));

    assert_eq!(report.accounts[0].closing_balance, dec!(500.00));
    assert_eq!(report.accounts[1].closing_balance, dec!(20.00));
}

#[test]
fn test_cancelled_context_surfaces_partial_report() {
    let accounts = vec![
        AccountInput {
            code: "DF".to_string(),
            name: "Donation Fund".to_string(),
            opening_balance: Decimal::ZERO,
            streams: AccountStreams::default(),
        },
        AccountInput {
            code: "MF".to_string(),
            name: "Maintenance Fund".to_string(),
            opening_balance: Decimal::ZERO,
            streams: AccountStreams::default(),
        },
    ];

    let ctx = ReportContext::new();
    ctx.cancel();
    let result = ReceiptsPaymentsBuilder::build_parallel(&accounts, &ctx);

    match result {
        Err(StatementError::PartialReport { incomplete }) => {
            // Cancelled before any task started: every account is named.
            assert_eq!(incomplete, vec!["DF".to_string(), "MF".to_string()]);
        }
        other => panic!("expected PartialReport, got {other:?}"),
    }
}

#[test]
fn test_expired_deadline_cancels() {
    let ctx = ReportContext::with_timeout(std::time::Duration::ZERO);
    assert!(ctx.is_cancelled());
}
