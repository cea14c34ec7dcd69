use thiserror::Error;

use crate::record::NodeId;

/// Structural violations in a linear node store.
///
/// Any of these means the store cannot be interpreted as a single rooted
/// tree; the operation that detected it returns no partial result.
#[derive(Error, Debug)]
pub enum MalformedTreeError {
    #[error("store has no root node (every record carries a parent reference)")]
    MissingRoot,

    #[error("store has {0} root candidates, expected exactly one")]
    MultipleRoots(usize),

    #[error("record {child} references unknown parent {parent}")]
    DanglingParent { child: NodeId, parent: NodeId },

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("cycle detected in parent references involving node {0}")]
    CycleDetected(NodeId),
}

/// Caller-side contract violations.
#[derive(Error, Debug)]
pub enum InvalidArgumentError {
    #[error("store must not be empty")]
    EmptyStore,

    #[error("depth limit must be at least 1, got {0}")]
    DepthLimitTooSmall(usize),
}

/// Umbrella error for all tree operations.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error("failed to parse node records: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
