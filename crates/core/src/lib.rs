//! Financial statement engine for Vihara.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It turns a flat set of posted ledger transactions plus the chart of accounts
//! into validated, hierarchical financial reports. Persistence and rendering
//! (Excel/PDF/JSON) live in other layers; this crate only emits plain data
//! structures.
//!
//! # Modules
//!
//! - `chart` - Chart-of-accounts tree (groups, ledgers, classification)
//! - `fiscal` - Reporting period validation
//! - `transaction` - Posted transaction records and cash-movement kinds
//! - `aggregate` - Opening/closing balance rollup over the chart
//! - `reports` - Trial balance, balance sheet, and cash flow builders
//! - `statement` - Running-balance statements and Receipts & Payments
//! - `reconcile` - Cross-report balance reconciliation checks

pub mod aggregate;
pub mod chart;
pub mod fiscal;
pub mod reconcile;
pub mod reports;
pub mod statement;
pub mod transaction;
