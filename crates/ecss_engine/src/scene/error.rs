//! Error types for scenegraph operations
//!
//! Structural errors are fatal to the requested operation only; the tree is
//! left unchanged. Visitor dispatch on a component a system has no handler
//! for is a no-op by contract, never an error, and child-index access past
//! the end returns `None` rather than failing.

use super::entity::Entity;

/// Errors raised by structural mutation and component attachment
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Attaching the child would make the tree cyclic
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// The would-be parent
        parent: Entity,
        /// The child whose subtree contains the parent
        child: Entity,
    },

    /// The entity handle does not refer to a live entity
    #[error("unknown entity {0:?}")]
    UnknownEntity(Entity),

    /// The child is not attached to the given parent
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent whose child list was searched
        parent: Entity,
        /// The entity that was not found in it
        child: Entity,
    },

    /// A vertex-attribute array does not match the mesh's row count
    #[error("vertex attribute '{name}' has {rows} rows, mesh expects {expected}")]
    AttributeLengthMismatch {
        /// Name of the offending attribute
        name: String,
        /// Row count of the offending attribute
        rows: usize,
        /// Row count shared by the attributes already attached
        expected: usize,
    },

    /// A mesh index references a vertex row that does not exist
    #[error("mesh index {index} out of range for {rows} vertex rows")]
    IndexOutOfRange {
        /// The offending index value
        index: u32,
        /// Number of vertex rows in the mesh
        rows: usize,
    },
}
