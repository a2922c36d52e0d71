//! Shared value types for Vihara.
//!
//! This crate provides the small set of types every other layer agrees on:
//! - Debit/credit balance sides with `Dr`/`Cr` display
//! - The rounding tolerance used by all balance-equality checks

pub mod types;

pub use types::amount::{BALANCE_TOLERANCE, BalanceSide, discrepancy, within_tolerance};
