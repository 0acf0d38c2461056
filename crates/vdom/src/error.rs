//! Error types for reconciliation, patch application and description decoding.

/// Failure while applying a patch to a live tree.
///
/// Application is fatal on the first error; already-applied mutations are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum PatchError<E>
where
    E: std::error::Error + 'static,
{
    /// The host tree rejected an operation.
    #[error("live tree operation failed: {0}")]
    Tree(#[from] E),

    /// The live parent no longer has the children the patch was computed against.
    #[error("live parent has {actual} children but the patch expects {expected}")]
    ChildCountMismatch { expected: usize, actual: usize },
}

/// A description could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("malformed description at {path}: {reason}")]
    Malformed { path: String, reason: &'static str },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
