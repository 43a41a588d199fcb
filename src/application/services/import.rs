//! Bulk import of hierarchy records
//!
//! Reads a JSON array of `{ "id", "ParentId", "Name", "Type" }` objects and
//! inserts one row per record. The batch is all-or-nothing: every record is
//! validated before the first insert, and inserts share one transaction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, StoreResultExt};
use crate::domain::{Node, NodeId, NodeType};
use crate::infrastructure::traits::{FileSystem, NodeStore};

/// One record of the import file, keys as they appear in the JSON.
///
/// `ParentId` must be present but may be `null`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(rename = "ParentId", deserialize_with = "Option::deserialize")]
    pub parent_id: Option<NodeId>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub node_type: NodeType,
}

impl TryFrom<NodeRecord> for Node {
    type Error = ApplicationError;

    fn try_from(r: NodeRecord) -> Result<Self, Self::Error> {
        Ok(Node::new(r.id, r.parent_id, r.name, r.node_type)?)
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub source: PathBuf,
    pub inserted: usize,
}

/// Loads records into the node store.
pub struct ImportService {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn NodeStore>,
}

impl ImportService {
    pub fn new(fs: Arc<dyn FileSystem>, store: Arc<dyn NodeStore>) -> Self {
        Self { fs, store }
    }

    /// Parse and validate the JSON content of an import file.
    pub fn parse(&self, content: &str) -> ApplicationResult<Vec<Node>> {
        let records: Vec<NodeRecord> =
            serde_json::from_str(content).map_err(|source| ApplicationError::Parse {
                context: "expected an array of {id, ParentId, Name, Type} objects".into(),
                source,
            })?;
        debug!("parse: {} records", records.len());
        records.into_iter().map(Node::try_from).collect()
    }

    /// Insert already validated nodes as one batch.
    pub fn import_nodes(&self, nodes: &[Node]) -> ApplicationResult<usize> {
        self.store
            .insert_all(nodes)
            .with_store_context(|| format!("import of {} nodes rolled back", nodes.len()))
    }

    /// Read, validate and insert every record of `path`.
    #[instrument(skip(self))]
    pub fn import_file(&self, path: &Path) -> ApplicationResult<ImportReport> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read import file", path)?;

        let nodes = self.parse(&content)?;
        let inserted = self.import_nodes(&nodes)?;
        info!("imported {} nodes from {}", inserted, path.display());

        Ok(ImportReport {
            source: path.to_path_buf(),
            inserted,
        })
    }
}
