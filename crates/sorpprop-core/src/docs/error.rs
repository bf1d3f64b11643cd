use crate::core::database::DatabaseError;
use crate::engine::BindingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write content list '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
