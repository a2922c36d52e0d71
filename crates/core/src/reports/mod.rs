//! Financial report builders.
//!
//! Pure transformations from the aggregated tree (and classified cash
//! transactions) into the nested report structures the export layer
//! consumes:
//! - Trial Balance
//! - Balance Sheet
//! - Cash Flow
//!
//! Balance mismatches are data, not errors: they flow through to the output
//! so the accountant sees them.

pub mod balance_sheet;
pub mod cash_flow;
pub mod trial_balance;


pub use balance_sheet::{
    BalanceSheetBuilder, BalanceSheetReport, BalanceSheetSection, BalanceSheetTotals,
    BalanceStatus, EquityProfitLine, ProfitOrLoss, SectionAmounts,
};
pub use cash_flow::{CashFlowCategory, CashFlowClassifier, CashFlowReport, CashFlowSummary};
pub use trial_balance::{
    TrialBalanceBuilder, TrialBalanceReport, TrialBalanceRow, TrialBalanceRowKind,
    TrialBalanceTotals,
};
