use thiserror::Error;

/// Errors that can occur during waiter draft operations.
///
/// Most draft operations are silent no-ops (removing absent lines,
/// committing an empty draft); errors here cover identifiers that
/// do not exist in the catalog and infrastructure failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WaiterError {
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),
    #[error("Commit failed: {0}")]
    CommitFailed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
