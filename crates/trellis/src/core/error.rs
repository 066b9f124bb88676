use std::result::Result as StdResult;

use thiserror::Error;

use super::id::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A node id did not resolve to a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// A widget was borrowed while it was already executing a hook.
    #[error("widget for {0:?} is already borrowed")]
    ReentrantWidgetBorrow(NodeId),
    /// The node is the displayed top widget and cannot be destroyed.
    #[error("cannot destroy the top widget")]
    TopWidget,
    /// The node already has a parent.
    #[error("node {0:?} is already attached")]
    Attached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
    /// Engine configuration failed to parse or validate.
    #[error("config: {0}")]
    Config(String),
    /// A widget or subtree failed to build.
    #[error("build: {0}")]
    Build(String),
    /// Render submission failure.
    #[error("render: {0}")]
    Render(String),
    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
