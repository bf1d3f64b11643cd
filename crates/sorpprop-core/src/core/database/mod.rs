//! # Database Module
//!
//! The JSON database of working-pair coefficients and experimental data.
//!
//! ## Overview
//!
//! A database is an ordered list of [`Entry`] values, each identified by an
//! [`EntryKey`] of sorbent, subtype, refrigerant and entry kind. An entry maps
//! equation-family names to fitted [`EquationSet`]s and carries the
//! [`ExperimentalSet`]s that were published for the same working pair.
//!
//! - **Construction** ([`builder`]) - Converts semicolon-separated source tables
//!   into entries, validating every numeric cell.
//! - **Persistence** ([`store`]) - Loads and writes the compact and the indented
//!   JSON files.
//! - **Vocabulary** ([`schema`]) - Maps fixed CSV columns to database keys.
//!
//! Empty numeric cells survive conversion as [`Numeric::Absent`], which is
//! written back as the empty string and never read as zero.

pub mod builder;
pub mod error;
pub mod model;
pub mod numeric;
pub mod schema;
pub mod store;

pub use builder::{DatabaseBuilder, SourceTables};
pub use error::{BuildError, DatabaseError};
pub use model::{
    Entry, EntryKey, EntryKind, EntryValue, EquationSet, ExperimentalSet, Measurement, Uncertainty,
};
pub use numeric::Numeric;
pub use store::Database;
