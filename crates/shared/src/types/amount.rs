//! Balance sides and rounding tolerance.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; equality checks go through the
//! shared tolerance so two-decimal rounding differences never flag a report
//! as out of balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tolerance for balance-equality checks: amounts are compared to 2 decimal
/// places, so anything below 0.01 counts as equal.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Which side of the books a net balance falls on.
///
/// A ledger's stored debit/credit pair is never netted away; this side is
/// derived for display only (`Dr`/`Cr` columns in reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    /// Net debit balance (debit >= credit).
    Debit,
    /// Net credit balance (credit > debit).
    Credit,
}

impl BalanceSide {
    /// Resolves the display side of a net balance (debit minus credit).
    ///
    /// Zero balances sit on the debit side, matching the ledger convention
    /// of printing `0.00 Dr`.
    #[must_use]
    pub fn of_net(net: Decimal) -> Self {
        if net.is_sign_negative() && !net.is_zero() {
            Self::Credit
        } else {
            Self::Debit
        }
    }
}

impl std::fmt::Display for BalanceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "Dr"),
            Self::Credit => write!(f, "Cr"),
        }
    }
}

/// Returns the absolute difference between two amounts.
#[must_use]
pub fn discrepancy(left: Decimal, right: Decimal) -> Decimal {
    (left - right).abs()
}

/// Returns true if two amounts are equal within [`BALANCE_TOLERANCE`].
#[must_use]
pub fn within_tolerance(left: Decimal, right: Decimal) -> bool {
    discrepancy(left, right) < BALANCE_TOLERANCE
}
