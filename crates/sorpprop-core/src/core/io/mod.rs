//! # I/O Module
//!
//! Readers for the tabular source data the database is built from.
//!
//! Source tables are semicolon-separated UTF-8 files with one header line and
//! one units line. [`table::CsvTable`] reads them into rows of raw string
//! cells; interpretation of the cells is left to [`crate::core::database`].

pub mod table;
