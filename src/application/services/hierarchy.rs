//! Office hierarchy queries
//!
//! Two walks over the parent-pointer tree: upward from a node to its nearest
//! office, and downward from an office to every employee below it.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, StoreResultExt};
use crate::domain::{
    DomainError, Node, NodeId, NodeTypes, OfficeTree, Officemates, OfficematesLookup,
};
use crate::infrastructure::traits::NodeStore;

/// Resolves offices and officemates against a node store.
pub struct HierarchyResolver {
    store: Arc<dyn NodeStore>,
    types: NodeTypes,
}

impl HierarchyResolver {
    pub fn new(store: Arc<dyn NodeStore>, types: NodeTypes) -> Self {
        Self { store, types }
    }

    pub fn types(&self) -> &NodeTypes {
        &self.types
    }

    pub fn find_node(&self, id: NodeId) -> ApplicationResult<Option<Node>> {
        self.store
            .node(id)
            .with_store_context(|| format!("look up node {id}"))
    }

    fn children(&self, id: NodeId) -> ApplicationResult<Vec<Node>> {
        self.store
            .children(id)
            .with_store_context(|| format!("look up children of {id}"))
    }

    /// Nearest office at or above `start`.
    ///
    /// The start node is the first candidate, so an office resolves to itself.
    /// Returns `None` when the chain ends at a root (or at a dangling parent
    /// reference) without passing an office.
    pub fn enclosing_office(&self, start: &Node) -> ApplicationResult<Option<Node>> {
        let mut visited = HashSet::new();
        let mut current = start.clone();

        loop {
            if !visited.insert(current.id) {
                return Err(DomainError::CycleDetected(current.id).into());
            }
            if current.has_type(self.types.office) {
                debug!("enclosing_office: {} -> {}", start.id, current.id);
                return Ok(Some(current));
            }
            let Some(parent_id) = current.parent_id else {
                debug!("enclosing_office: {} reached root {}", start.id, current.id);
                return Ok(None);
            };
            match self.find_node(parent_id)? {
                Some(parent) => current = parent,
                None => {
                    warn!("node {} references missing parent {}", current.id, parent_id);
                    return Ok(None);
                }
            }
        }
    }

    /// Every employee strictly below `office`, breadth-first, siblings by ascending id.
    pub fn employees_in(&self, office: &Node) -> ApplicationResult<Vec<Node>> {
        let mut visited = HashSet::from([office.id]);
        let mut queue = VecDeque::from([office.id]);
        let mut employees = Vec::new();

        while let Some(id) = queue.pop_front() {
            for child in self.children(id)? {
                if !visited.insert(child.id) {
                    return Err(DomainError::CycleDetected(child.id).into());
                }
                queue.push_back(child.id);
                if child.has_type(self.types.employee) {
                    employees.push(child);
                }
            }
        }

        debug!(
            "employees_in: office {} has {} employees",
            office.id,
            employees.len()
        );
        Ok(employees)
    }

    /// Employees sharing the nearest office of `employee_id`, the employee included.
    #[instrument(skip(self))]
    pub fn find_officemates(&self, employee_id: NodeId) -> ApplicationResult<OfficematesLookup> {
        let Some(employee) = self.find_node(employee_id)? else {
            debug!("find_officemates: {} not found", employee_id);
            return Ok(OfficematesLookup::EmployeeNotFound);
        };

        let office = self.enclosing_office(&employee)?;
        let employees = match &office {
            Some(o) => self.employees_in(o)?,
            None => Vec::new(),
        };

        Ok(OfficematesLookup::Found(Officemates { office, employees }))
    }

    /// Snapshot of the subtree rooted at `root`.
    pub fn office_tree(&self, root: &Node) -> ApplicationResult<OfficeTree> {
        let mut visited = HashSet::from([root.id]);
        self.build_tree(root.clone(), &mut visited)
    }

    fn build_tree(
        &self,
        node: Node,
        visited: &mut HashSet<NodeId>,
    ) -> ApplicationResult<OfficeTree> {
        let mut children = Vec::new();
        for child in self.children(node.id)? {
            if !visited.insert(child.id) {
                return Err(DomainError::CycleDetected(child.id).into());
            }
            children.push(self.build_tree(child, visited)?);
        }
        Ok(OfficeTree { node, children })
    }
}
