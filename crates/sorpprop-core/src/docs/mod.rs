//! # Docs Module
//!
//! Human-readable output generated from a database.
//!
//! ## Overview
//!
//! Every equation set in the database becomes a LaTeX block of the manual:
//! an overview table, the sorbent properties (adsorption only), the equation
//! statement with its coefficient table, the validity range and, when the
//! native library is available, a figure comparing the equation with the
//! experimental data published alongside it.
//!
//! ## Architecture
//!
//! - **Text blocks** ([`overview`], [`properties`], [`equation`], [`validity`]) -
//!   Pure functions from an equation set to a LaTeX fragment
//! - **Figures** ([`visualization`]) - Grouping of measured points, MAPE and
//!   pgfplots rendering
//! - **Models** ([`corrections`], [`approach`]) - Which native functions a
//!   figure evaluates, including published refrigerant-data substitutes
//! - **Assembly** ([`manual`]) - [`manual::ManualGenerator`] writing the chapter
//!   files
//! - **Listings** ([`content`]) - Semicolon-separated lists of all equations

pub mod approach;
pub mod content;
pub mod corrections;
pub mod equation;
pub mod error;
pub mod latex;
pub mod manual;
pub mod overview;
pub mod properties;
pub mod validity;
pub mod visualization;

pub use content::ContentLists;
pub use error::DocsError;
pub use manual::{ManualGenerator, ManualSummary};
