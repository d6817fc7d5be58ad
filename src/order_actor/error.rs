use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during order store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Invalid(msg) => OrderError::ValidationError(msg),
            FrameworkError::ChannelClosed => {
                OrderError::ActorCommunicationError("actor channel closed".into())
            }
        }
    }
}
