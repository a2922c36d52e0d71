//! Balance aggregation over the chart of accounts.
//!
//! A single post-order traversal turns per-ledger transaction history into
//! opening/closing debit/credit quadruples and rolls them up into every
//! ancestor group. Pure: the same inputs always produce the same tree.

pub mod service;
pub mod types;


pub use service::BalanceAggregator;
pub use types::{AggregatedGroup, AggregatedLedger, AggregatedTree, BalanceQuad};
