use super::model::EntryKey;
use super::numeric::NumericParseError;
use crate::core::io::table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode database as JSON: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Duplicate database entry: {0}")]
    DuplicateKey(EntryKey),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Table '{table}', line {line}: unknown entry type '{tag}'")]
    UnknownKind {
        table: String,
        line: usize,
        tag: String,
    },

    #[error("Table '{table}', line {line}, column '{column}': {source}")]
    Conversion {
        table: String,
        line: usize,
        column: String,
        #[source]
        source: NumericParseError,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
