//! Chart-of-accounts input records and classification.

use serde::{Deserialize, Serialize};

/// Flat group record, as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Unique hierarchical code (e.g., "1000", "1100").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Code of the parent group, if any.
    pub parent_code: Option<String>,
}

/// Flat ledger (leaf account) record, as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Unique ledger code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Code of the group that owns this ledger.
    pub group_code: String,
}

/// Balance sheet classification of a group.
///
/// Resolved once at tree-build time from the root-code convention the chart
/// of accounts must follow, instead of re-matching code strings at every
/// report build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClassification {
    /// Root code "1000".
    Asset,
    /// Root code "2000".
    Liability,
    /// Root code "3000".
    Equity,
    /// Any other root code, including the synthetic unclassified root.
    Unclassified,
}

impl AccountClassification {
    /// Root code reserved for assets.
    pub const ASSET_ROOT: &'static str = "1000";
    /// Root code reserved for liabilities.
    pub const LIABILITY_ROOT: &'static str = "2000";
    /// Root code reserved for equity.
    pub const EQUITY_ROOT: &'static str = "3000";

    /// Resolves the classification of a root group from its code.
    ///
    /// This is a domain convention of the chart of accounts, not a
    /// structural guarantee; anything outside the reserved codes is
    /// `Unclassified`.
    #[must_use]
    pub fn from_root_code(code: &str) -> Self {
        match code {
            Self::ASSET_ROOT => Self::Asset,
            Self::LIABILITY_ROOT => Self::Liability,
            Self::EQUITY_ROOT => Self::Equity,
            _ => Self::Unclassified,
        }
    }
}

impl std::fmt::Display for AccountClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "Assets"),
            Self::Liability => write!(f, "Liabilities"),
            Self::Equity => write!(f, "Equity"),
            Self::Unclassified => write!(f, "Unclassified"),
        }
    }
}
