use thiserror::Error;

#[derive(Debug, Error)]
pub enum SprintdeskError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
