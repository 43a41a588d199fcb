//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Externally assigned node identifier.
pub type NodeId = i64;

/// Small integer tag distinguishing roots/regions, offices and employees.
pub type NodeType = i64;

/// One row of the organizational hierarchy.
///
/// Nodes form a forest through `parent_id`; a node without parent is a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub name: String,
    pub node_type: NodeType,
}

impl Node {
    /// Create a validated node.
    ///
    /// Rejects blank names and nodes that reference themselves as parent.
    pub fn new(
        id: NodeId,
        parent_id: Option<NodeId>,
        name: impl Into<String>,
        node_type: NodeType,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidNode {
                id,
                message: "name must not be empty".into(),
            });
        }
        if parent_id == Some(id) {
            return Err(DomainError::InvalidNode {
                id,
                message: "node cannot be its own parent".into(),
            });
        }
        Ok(Self {
            id,
            parent_id,
            name,
            node_type,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_type(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }
}

/// Type codes the queries care about. Any other code is carried but ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NodeTypes {
    /// Searchable container ("office")
    pub office: NodeType,
    /// Leaf member ("employee")
    pub employee: NodeType,
}

impl Default for NodeTypes {
    fn default() -> Self {
        Self {
            office: 1,
            employee: 3,
        }
    }
}

/// Employees sharing the nearest enclosing office of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Officemates {
    /// Nearest office at or above the queried node, if any
    pub office: Option<Node>,
    /// Employee descendants of that office, in traversal order
    pub employees: Vec<Node>,
}

impl Officemates {
    pub fn names(&self) -> Vec<&str> {
        self.employees.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Result of an officemates query.
///
/// `EmployeeNotFound` is a normal outcome, distinct from an empty `Found`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficematesLookup {
    EmployeeNotFound,
    Found(Officemates),
}

impl OfficematesLookup {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OfficematesLookup::EmployeeNotFound)
    }

    /// Officemates when the employee exists, `None` otherwise.
    pub fn officemates(&self) -> Option<&Officemates> {
        match self {
            OfficematesLookup::Found(o) => Some(o),
            OfficematesLookup::EmployeeNotFound => None,
        }
    }
}
