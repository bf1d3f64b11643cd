//! # Workflows Module
//!
//! Complete procedures built from the lower layers; the entry points the
//! command-line tool calls.
//!
//! ## Overview
//!
//! Each workflow takes a validated configuration from
//! [`crate::engine::config`] and a [`crate::engine::progress::ProgressReporter`],
//! loads what it needs, runs its phases and reports a summary.
//!
//! - **Database build** ([`build_database`]) - Source tables to the compact and
//!   the indented JSON database
//! - **Manual generation** ([`generate_manual`]) - Database to LaTeX chapter
//!   files and, optionally, content lists

pub mod build_database;
pub mod error;
pub mod generate_manual;

pub use error::WorkflowError;
