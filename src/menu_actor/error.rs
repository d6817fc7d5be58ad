use thiserror::Error;

/// Errors that can occur when talking to the menu service.
///
/// The catalog itself is read-only and infallible; lookups that miss
/// return `None` rather than an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
