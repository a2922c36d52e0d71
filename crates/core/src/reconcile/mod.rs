//! Cross-report reconciliation checks.
//!
//! The underlying check is always the same two-total comparison within a
//! tolerance; only which totals are compared differs per report type.

use rust_decimal::Decimal;
use serde::Serialize;
use vihara_shared::{BALANCE_TOLERANCE, discrepancy};

use crate::reports::{BalanceSheetReport, TrialBalanceReport};

/// Outcome of a reconciliation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The two totals agree within tolerance.
    pub passed: bool,
    /// Absolute difference between the two totals.
    pub discrepancy: Decimal,
}

/// Validates the balance invariants of finished reports.
///
/// Pure function of its inputs; a failed check is reported, never thrown,
/// because accountants need to see and act on imbalance.
pub struct ReconciliationValidator;

impl ReconciliationValidator {
    /// Compares two totals within the given tolerance.
    #[must_use]
    pub fn check(left: Decimal, right: Decimal, tolerance: Decimal) -> ValidationResult {
        let discrepancy = discrepancy(left, right);
        ValidationResult {
            passed: discrepancy < tolerance,
            discrepancy,
        }
    }

    /// Trial balance: closing debit total must equal closing credit total.
    #[must_use]
    pub fn validate_trial_balance(report: &TrialBalanceReport) -> ValidationResult {
        Self::check(
            report.grand_totals.closing_debit,
            report.grand_totals.closing_credit,
            BALANCE_TOLERANCE,
        )
    }

    /// Balance sheet: current assets must equal current liabilities plus
    /// current equity.
    #[must_use]
    pub fn validate_balance_sheet(report: &BalanceSheetReport) -> ValidationResult {
        Self::check(
            report.totals.assets.current,
            report.totals.liabilities.current + report.totals.equity.current,
            BALANCE_TOLERANCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(100.00), dec!(100.00), true, dec!(0))]
    #[case(dec!(100.00), dec!(100.005), true, dec!(0.005))]
    #[case(dec!(6000.00), dec!(5999.00), false, dec!(1.00))]
    #[case(dec!(0), dec!(0), true, dec!(0))]
    fn test_check(
        #[case] left: Decimal,
        #[case] right: Decimal,
        #[case] passed: bool,
        #[case] expected_discrepancy: Decimal,
    ) {
        let result = ReconciliationValidator::check(left, right, dec!(0.01));
        assert_eq!(result.passed, passed);
        assert_eq!(result.discrepancy, expected_discrepancy);
    }

    #[test]
    fn test_custom_tolerance() {
        let result = ReconciliationValidator::check(dec!(100.00), dec!(100.50), dec!(1.00));
        assert!(result.passed);
        assert_eq!(result.discrepancy, dec!(0.50));
    }
}
