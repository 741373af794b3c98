//! Error types for vprint.

use crate::types::{CollectionId, ModeId, NodeId, VariableId};
use thiserror::Error;

/// Top-level error for a rendering batch.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to render node {node}: {source}")]
    Node {
        node: NodeId,
        #[source]
        source: ResolveError,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl RenderError {
    /// The resolution error behind a node failure, if any.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            RenderError::Node { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors while resolving a variable into formatted text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Undefined variable: {name}")]
    NotFound { name: String },

    #[error("Variable '{variable}' aliases unknown variable id {alias_id}")]
    DanglingAlias { variable: String, alias_id: VariableId },

    #[error("Cyclic variable alias: {}", .cycle.join(" -> "))]
    CyclicAlias { cycle: Vec<String> },

    #[error("Variable '{variable}' has no value for mode {mode}")]
    MissingModeValue { variable: String, mode: ModeId },

    #[error("No mode resolved for variable '{variable}' in collection {collection}")]
    NoModeForCollection { variable: String, collection: CollectionId },

    #[error("Expected a color value, found {found}")]
    NotAColor { found: &'static str },

    #[error("Unknown format token: %{token}")]
    UnknownToken { token: String },
}

/// Errors raised by a variable source collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to load variables: {reason}")]
    LoadFailed { reason: String },
}

/// Errors raised by a node sink collaborator.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write text to node {node}: {reason}")]
    WriteFailed { node: NodeId, reason: String },
}
