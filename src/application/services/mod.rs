//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, NodeStore)
//! but are themselves concrete structs, not traits.

mod hierarchy;
mod import;

pub use hierarchy::HierarchyResolver;
pub use import::{ImportReport, ImportService, NodeRecord};
