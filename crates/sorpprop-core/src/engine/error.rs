use super::spec::WorkingPairSpec;
use std::ffi::NulError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Failed to load sorption library '{path}': {source}")]
    Load {
        path: String,
        source: libloading::Error,
    },

    #[error("Sorption library does not export '{symbol}': {source}")]
    MissingSymbol {
        symbol: &'static str,
        source: libloading::Error,
    },

    #[error("No native signature for '{symbol}' with {arity} argument(s)")]
    UnsupportedSignature { symbol: &'static str, arity: usize },

    #[error("Working pair not found in database '{database}': {spec}")]
    PairNotFound {
        database: String,
        spec: Box<WorkingPairSpec>,
    },

    #[error("{field} contains an interior NUL byte")]
    InvalidString {
        field: &'static str,
        #[source]
        source: NulError,
    },

    #[error("{field} id {id} exceeds the native integer range")]
    InvalidId { field: &'static str, id: u32 },

    #[error("Database path '{0}' is not valid UTF-8")]
    NonUtf8Path(String),

    #[error("'{symbol}' expects {expected} argument(s), got {got}")]
    Arity {
        symbol: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("'{symbol}' has no {form} form")]
    WrongForm {
        symbol: &'static str,
        form: &'static str,
    },
}
