use crate::core::database::{BuildError, DatabaseError};
use crate::docs::DocsError;
use crate::engine::BindingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Database build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Manual generation failed: {0}")]
    Docs(#[from] DocsError),

    #[error("Sorption library error: {0}")]
    Binding(#[from] BindingError),
}
