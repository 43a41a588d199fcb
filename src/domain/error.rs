//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors represent violations of the hierarchy's shape.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid node {id}: {message}")]
    InvalidNode { id: NodeId, message: String },

    #[error("cycle detected in hierarchy at node: {0}")]
    CycleDetected(NodeId),
}
