use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),
    #[error("Missing 'title' or 'content'")]
    MissingField,
}
