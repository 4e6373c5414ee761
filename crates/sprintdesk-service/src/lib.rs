pub mod aggregate;
pub mod repository;
pub mod views;

use thiserror::Error;

pub use aggregate::summarize;
pub use repository::Repository;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sprintdesk_db::DbError> for ServiceError {
    fn from(e: sprintdesk_db::DbError) -> Self {
        ServiceError::Storage(e.to_string())
    }
}

impl From<sprintdesk_core::SprintdeskError> for ServiceError {
    fn from(e: sprintdesk_core::SprintdeskError) -> Self {
        match e {
            sprintdesk_core::SprintdeskError::NotFound(msg) => ServiceError::NotFound(msg),
            sprintdesk_core::SprintdeskError::InvalidInput(msg) => {
                ServiceError::InvalidInput(msg)
            }
        }
    }
}
