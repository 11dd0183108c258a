use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Invalid sort field or incomplete create payload.
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("Post with id {0} not found")]
    NotFound(u64),
}
