//! Error types for document generation.

use thiserror::Error;

/// Result type for protodoc operations
pub type DocResult<T> = Result<T, DocError>;

#[derive(Debug, Error)]
pub enum DocError {
    /// The input has no `ul#toc`; there is nothing to navigate.
    #[error("table of contents (ul#toc) not found in input document")]
    MissingToc,

    /// A field or method references an anchor with no definition.
    #[error("no definition found for anchor '{anchor}'")]
    LinkResolution { anchor: String },

    #[error("service '{service}' has no method table")]
    MissingServiceTables { service: String },

    /// Extra tables follow the method table but none is a route table.
    #[error("service '{service}' has no HTTP binding table")]
    MissingRouteTable { service: String },

    /// `chain` is the recursion path, ending with the repeated anchor.
    #[error("cyclic schema: {}", .chain.join(" -> "))]
    CyclicSchema { chain: Vec<String> },

    #[error("malformed annotation in description: {text}")]
    MalformedAnnotation { text: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocError {
    /// The anchor that caused the failure, when there is one.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            DocError::LinkResolution { anchor } => Some(anchor),
            DocError::CyclicSchema { chain } => chain.last().map(String::as_str),
            _ => None,
        }
    }
}
