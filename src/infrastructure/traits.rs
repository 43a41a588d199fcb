//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested against temp directories and in-memory stores.

use std::io;
use std::path::Path;

use crate::domain::{Node, NodeId};
use crate::infrastructure::store::StoreResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Persistent table of hierarchy nodes.
///
/// Each call acquires the underlying connection for its own duration only.
pub trait NodeStore: Send + Sync {
    /// Create the table and its index unless they already exist.
    fn ensure_schema(&self) -> StoreResult<()>;

    /// Insert all nodes in one transaction. Either every row lands or none does.
    fn insert_all(&self, nodes: &[Node]) -> StoreResult<usize>;

    /// Look up a single node.
    fn node(&self, id: NodeId) -> StoreResult<Option<Node>>;

    /// Direct children of a node, ascending by id.
    fn children(&self, id: NodeId) -> StoreResult<Vec<Node>>;

    /// Total number of stored nodes.
    fn count(&self) -> StoreResult<usize>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
