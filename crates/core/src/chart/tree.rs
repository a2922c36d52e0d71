//! Arena-based chart-of-accounts tree.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use super::error::ChartError;
use super::types::{AccountClassification, GroupRecord, LedgerRecord};

/// Code of the synthetic root that receives ledgers without a resolvable
/// group. Attaching instead of raising keeps totals from silently dropping
/// amounts.
pub const UNCLASSIFIED_ROOT_CODE: &str = "0000";

/// Index of a group node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupId(usize);

/// A leaf account owned by a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccount {
    /// Unique ledger code.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// One group node in the arena.
///
/// Parent and children are stored as arena indices rather than cyclic
/// references, which keeps ownership simple and the tree serializable.
#[derive(Debug, Clone, Serialize)]
pub struct GroupNode {
    /// Unique hierarchical code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Parent group, if any.
    pub parent: Option<GroupId>,
    /// Child groups, in input order.
    pub children: Vec<GroupId>,
    /// Ledgers owned directly by this group, in input order.
    pub ledgers: Vec<LedgerAccount>,
    /// Classification inherited from this node's root.
    pub classification: AccountClassification,
}

/// Immutable chart-of-accounts tree.
///
/// Built once per report request from flat records; consumers only ever get
/// shared references, so the hierarchy cannot change under a running report.
#[derive(Debug, Clone, Serialize)]
pub struct ChartOfAccounts {
    nodes: Vec<GroupNode>,
    roots: Vec<GroupId>,
}

impl ChartOfAccounts {
    /// Builds the tree from flat group and ledger records.
    ///
    /// Fails fast on a malformed hierarchy (duplicate codes, dangling parent
    /// references, cycles). A ledger whose `group_code` resolves to nothing
    /// is not fatal: it is attached to a synthetic "Unclassified" root and
    /// logged, so no amount ever silently drops out of the totals.
    pub fn build(groups: &[GroupRecord], ledgers: &[LedgerRecord]) -> Result<Self, ChartError> {
        let mut nodes: Vec<GroupNode> = Vec::with_capacity(groups.len());
        let mut index: HashMap<&str, GroupId> = HashMap::with_capacity(groups.len());

        for record in groups {
            if index.contains_key(record.code.as_str()) {
                return Err(ChartError::DuplicateGroupCode(record.code.clone()));
            }
            index.insert(record.code.as_str(), GroupId(nodes.len()));
            nodes.push(GroupNode {
                code: record.code.clone(),
                name: record.name.clone(),
                parent: None,
                children: Vec::new(),
                ledgers: Vec::new(),
                classification: AccountClassification::Unclassified,
            });
        }

        let mut roots: Vec<GroupId> = Vec::new();
        for (position, record) in groups.iter().enumerate() {
            let id = GroupId(position);
            match &record.parent_code {
                Some(parent_code) => {
                    let parent = *index.get(parent_code.as_str()).ok_or_else(|| {
                        ChartError::UnknownParent {
                            code: record.code.clone(),
                            parent_code: parent_code.clone(),
                        }
                    })?;
                    nodes[id.0].parent = Some(parent);
                    nodes[parent.0].children.push(id);
                }
                None => roots.push(id),
            }
        }

        Self::detect_cycles(&nodes)?;

        // Classification flows down from each root, resolved exactly once.
        for &root in &roots {
            let classification = AccountClassification::from_root_code(&nodes[root.0].code);
            Self::classify_subtree(&mut nodes, root, classification);
        }

        let mut unclassified_root: Option<GroupId> = None;
        for ledger in ledgers {
            let target = match index.get(ledger.group_code.as_str()) {
                Some(&id) => id,
                None => {
                    warn!(
                        ledger_code = %ledger.code,
                        group_code = %ledger.group_code,
                        "ledger has no resolvable group; attaching to Unclassified root"
                    );
                    *unclassified_root.get_or_insert_with(|| {
                        let id = GroupId(nodes.len());
                        nodes.push(GroupNode {
                            code: UNCLASSIFIED_ROOT_CODE.to_string(),
                            name: "Unclassified".to_string(),
                            parent: None,
                            children: Vec::new(),
                            ledgers: Vec::new(),
                            classification: AccountClassification::Unclassified,
                        });
                        roots.push(id);
                        id
                    })
                }
            };
            nodes[target.0].ledgers.push(LedgerAccount {
                code: ledger.code.clone(),
                name: ledger.name.clone(),
            });
        }

        Ok(Self { nodes, roots })
    }

    /// Depth-first walk over parent links with a visiting set; reaching a
    /// node that is still in progress means the hierarchy loops.
    fn detect_cycles(nodes: &[GroupNode]) -> Result<(), ChartError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            Visiting,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; nodes.len()];
        for start in 0..nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            let mut chain = Vec::new();
            let mut current = start;
            loop {
                match marks[current] {
                    Mark::Visiting => {
                        return Err(ChartError::CyclicHierarchy(nodes[current].code.clone()));
                    }
                    Mark::Done => break,
                    Mark::Unvisited => {
                        marks[current] = Mark::Visiting;
                        chain.push(current);
                        match nodes[current].parent {
                            Some(parent) => current = parent.0,
                            None => break,
                        }
                    }
                }
            }
            for visited in chain {
                marks[visited] = Mark::Done;
            }
        }
        Ok(())
    }

    fn classify_subtree(
        nodes: &mut [GroupNode],
        id: GroupId,
        classification: AccountClassification,
    ) {
        nodes[id.0].classification = classification;
        let children = nodes[id.0].children.clone();
        for child in children {
            Self::classify_subtree(nodes, child, classification);
        }
    }

    /// Root groups in input order (the synthetic Unclassified root, when
    /// present, comes last).
    #[must_use]
    pub fn roots(&self) -> &[GroupId] {
        &self.roots
    }

    /// Read-only view of a node.
    #[must_use]
    pub fn node(&self, id: GroupId) -> &GroupNode {
        &self.nodes[id.0]
    }

    /// Number of groups in the tree, including any synthetic root.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no groups at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a group by code.
    #[must_use]
    pub fn find_group(&self, code: &str) -> Option<GroupId> {
        self.nodes
            .iter()
            .position(|node| node.code == code)
            .map(GroupId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(code: &str, name: &str, parent: Option<&str>) -> GroupRecord {
        GroupRecord {
            code: code.to_string(),
            name: name.to_string(),
            parent_code: parent.map(str::to_string),
        }
    }

    fn ledger(code: &str, name: &str, group: &str) -> LedgerRecord {
        LedgerRecord {
            code: code.to_string(),
            name: name.to_string(),
            group_code: group.to_string(),
        }
    }

    fn sample_groups() -> Vec<GroupRecord> {
        vec![
            group("1000", "Assets", None),
            group("1100", "Current Assets", Some("1000")),
            group("2000", "Liabilities", None),
            group("3000", "Equity", None),
        ]
    }

    #[test]
    fn test_build_links_parents_and_children() {
        let chart = ChartOfAccounts::build(
            &sample_groups(),
            &[ledger("1101", "Cash", "1100"), ledger("1102", "Bank", "1100")],
        )
        .unwrap();

        assert_eq!(chart.roots().len(), 3);
        let assets = chart.find_group("1000").unwrap();
        let current = chart.find_group("1100").unwrap();
        assert_eq!(chart.node(assets).children, vec![current]);
        assert_eq!(chart.node(current).parent, Some(assets));
        assert_eq!(chart.node(current).ledgers.len(), 2);
        assert_eq!(chart.node(current).ledgers[0].code, "1101");
    }

    #[test]
    fn test_classification_inherited_from_root() {
        let chart = ChartOfAccounts::build(&sample_groups(), &[]).unwrap();
        let current = chart.find_group("1100").unwrap();
        assert_eq!(
            chart.node(current).classification,
            AccountClassification::Asset
        );
        let equity = chart.find_group("3000").unwrap();
        assert_eq!(
            chart.node(equity).classification,
            AccountClassification::Equity
        );
    }

    #[test]
    fn test_duplicate_group_code_rejected() {
        let groups = vec![group("1000", "Assets", None), group("1000", "Assets Again", None)];
        let result = ChartOfAccounts::build(&groups, &[]);
        assert!(matches!(result, Err(ChartError::DuplicateGroupCode(code)) if code == "1000"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let groups = vec![group("1100", "Current Assets", Some("1000"))];
        let result = ChartOfAccounts::build(&groups, &[]);
        assert!(matches!(
            result,
            Err(ChartError::UnknownParent { code, parent_code })
                if code == "1100" && parent_code == "1000"
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let groups = vec![
            group("1100", "A", Some("1200")),
            group("1200", "B", Some("1100")),
        ];
        let result = ChartOfAccounts::build(&groups, &[]);
        assert!(matches!(result, Err(ChartError::CyclicHierarchy(_))));
    }

    #[test]
    fn test_self_parent_rejected() {
        let groups = vec![group("1100", "A", Some("1100"))];
        let result = ChartOfAccounts::build(&groups, &[]);
        assert!(matches!(result, Err(ChartError::CyclicHierarchy(code)) if code == "1100"));
    }

    #[test]
    fn test_orphan_ledger_attached_to_unclassified_root() {
        let chart = ChartOfAccounts::build(
            &sample_groups(),
            &[ledger("9901", "Suspense", "no-such-group")],
        )
        .unwrap();

        let unclassified = chart.find_group(UNCLASSIFIED_ROOT_CODE).unwrap();
        let node = chart.node(unclassified);
        assert_eq!(node.name, "Unclassified");
        assert_eq!(node.classification, AccountClassification::Unclassified);
        assert_eq!(node.ledgers.len(), 1);
        assert_eq!(node.ledgers[0].code, "9901");
        // Synthetic root comes after the real roots
        assert_eq!(chart.roots().last(), Some(&unclassified));
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartOfAccounts::build(&[], &[]).unwrap();
        assert!(chart.is_empty());
        assert!(chart.roots().is_empty());
    }
}
