//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{HierarchyResolver, ImportService};
use crate::config::Settings;
use crate::infrastructure::store::SqliteNodeStore;
use crate::infrastructure::traits::{FileSystem, NodeStore, RealFileSystem};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding the settings and the I/O boundaries services are built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Node table
    pub store: Arc<dyn NodeStore>,
}

impl ServiceContainer {
    /// Create a container backed by the configured SQLite database.
    ///
    /// Creates the database's parent directory and the schema when missing.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let db_path = settings.database.path.clone();
        let store = if settings.database.is_in_memory() {
            SqliteNodeStore::in_memory()?
        } else {
            ensure_parent_dir(&db_path)?;
            SqliteNodeStore::open(&db_path)?
        };
        store.ensure_schema()?;
        debug!("store ready: {}", db_path.display());

        Ok(Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(store),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn NodeStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, store }
    }

    pub fn importer(&self) -> ImportService {
        ImportService::new(self.fs.clone(), self.store.clone())
    }

    pub fn resolver(&self) -> HierarchyResolver {
        HierarchyResolver::new(self.store.clone(), self.settings.node_types)
    }
}

fn ensure_parent_dir(path: &Path) -> InfraResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => std::fs::create_dir_all(dir)
            .map_err(|e| InfraError::io(format!("create {}", dir.display()), e)),
        _ => Ok(()),
    }
}
