//! SQLite-backed node store

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Node, NodeId};
use crate::infrastructure::traits::NodeStore;

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS offices (
    id        INTEGER PRIMARY KEY,
    parent_id INTEGER,
    name      TEXT    NOT NULL,
    type      INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_offices_parent_id ON offices(parent_id);";

const INSERT_SQL: &str = "INSERT INTO offices (id, parent_id, name, type) VALUES (?1, ?2, ?3, ?4)";

const SELECT_NODE_SQL: &str = "SELECT id, parent_id, name, type FROM offices WHERE id = ?1";

const SELECT_CHILDREN_SQL: &str =
    "SELECT id, parent_id, name, type FROM offices WHERE parent_id = ?1 ORDER BY id ASC";

/// Errors raised by the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot open database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("constraint violated while inserting node {id}")]
    Constraint {
        id: NodeId,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{context}")]
    Sqlite {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    fn sqlite(context: impl Into<String>) -> impl FnOnce(rusqlite::Error) -> Self {
        let context = context.into();
        move |source| Self::Sqlite { context, source }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// `NodeStore` over a single SQLite connection.
#[derive(Debug)]
pub struct SqliteNodeStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteNodeStore {
    /// Open (or create) a database file. `:memory:` opens a private in-memory database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        debug!("open: path={}", path.display());
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn row_to_node(row: &Row<'_>) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get(0)?,
        parent_id: row.get(1)?,
        name: row.get(2)?,
        node_type: row.get(3)?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl NodeStore for SqliteNodeStore {
    fn ensure_schema(&self) -> StoreResult<()> {
        self.lock()?
            .execute_batch(SCHEMA_SQL)
            .map_err(StoreError::sqlite("create schema"))
    }

    #[instrument(level = "debug", skip(self, nodes), fields(count = nodes.len()))]
    fn insert_all(&self, nodes: &[Node]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(StoreError::sqlite("begin import transaction"))?;
        {
            let mut stmt = tx
                .prepare(INSERT_SQL)
                .map_err(StoreError::sqlite("prepare insert"))?;
            for node in nodes {
                stmt.execute(params![node.id, node.parent_id, node.name, node.node_type])
                    .map_err(|source| {
                        if is_constraint_violation(&source) {
                            StoreError::Constraint {
                                id: node.id,
                                source,
                            }
                        } else {
                            StoreError::Sqlite {
                                context: format!("insert node {}", node.id),
                                source,
                            }
                        }
                    })?;
            }
        }
        // dropping an uncommitted transaction rolls it back
        tx.commit()
            .map_err(StoreError::sqlite("commit import transaction"))?;
        Ok(nodes.len())
    }

    fn node(&self, id: NodeId) -> StoreResult<Option<Node>> {
        self.lock()?
            .query_row(SELECT_NODE_SQL, params![id], row_to_node)
            .optional()
            .map_err(StoreError::sqlite(format!("select node {id}")))
    }

    fn children(&self, id: NodeId) -> StoreResult<Vec<Node>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare_cached(SELECT_CHILDREN_SQL)
            .map_err(StoreError::sqlite("prepare children query"))?;
        let rows = stmt
            .query_map(params![id], row_to_node)
            .map_err(StoreError::sqlite(format!("select children of {id}")))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::sqlite(format!("read children of {id}")))
    }

    fn count(&self) -> StoreResult<usize> {
        let n: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM offices", [], |row| row.get(0))
            .map_err(StoreError::sqlite("count nodes"))?;
        Ok(n as usize)
    }
}
