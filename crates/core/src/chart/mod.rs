//! Chart-of-accounts tree.
//!
//! This module builds the immutable account hierarchy every report reads:
//! - Flat group/ledger records from the persistence layer
//! - Arena-based tree with parent/child indices
//! - Asset/Liability/Equity classification resolved once at build time
//! - Structural validation (dangling parents, cycles, duplicate codes)

pub mod error;
pub mod tree;
pub mod types;

pub use error::ChartError;
pub use tree::{ChartOfAccounts, GroupId, GroupNode, LedgerAccount};
pub use types::{AccountClassification, GroupRecord, LedgerRecord};
