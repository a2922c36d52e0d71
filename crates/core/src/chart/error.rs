//! Chart-of-accounts error types.

use thiserror::Error;

/// Errors raised while building the chart-of-accounts tree.
///
/// All variants describe a malformed hierarchy and are fatal: a report is
/// never produced from a chart that failed structural validation.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Two group records share the same code.
    #[error("Duplicate group code: {0}")]
    DuplicateGroupCode(String),

    /// A group references a parent code that does not exist.
    #[error("Group {code} references unknown parent {parent_code}")]
    UnknownParent {
        /// Code of the group with the dangling reference.
        code: String,
        /// The missing parent code.
        parent_code: String,
    },

    /// Following parent links from this group revisits it.
    #[error("Cyclic group hierarchy detected at {0}")]
    CyclicHierarchy(String),
}
