//! # SorpPropLib Tooling
//!
//! Database builder, native-library bindings and documentation generators for
//! the SorpPropLib sorption-equilibrium property library.
//!
//! ## Architecture
//!
//! The crate follows a layered design:
//!
//! - **[`core`]: The Data.** Contains the database model (entries, equation
//!   sets, experimental sets), the reader for the semicolon-separated source
//!   tables and the JSON writer.
//!
//! - **[`engine`]: The Native Boundary.** Loads the compiled SorpPropLib shared
//!   library, manages working-pair handles and exposes typed views over every
//!   adsorption, absorption and refrigerant function. The library is reached
//!   through the [`engine::SorptionEngine`] trait so that everything above it can
//!   be exercised without the native code.
//!
//! - **[`docs`]: The Manual.** Renders LaTeX fragments and pgfplots figures
//!   describing each equation of the database and comparing it to the measured
//!   data it was fitted on.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie the layers
//!   together: building the database from its sources and generating the manual.

pub mod core;
pub mod docs;
pub mod engine;
pub mod workflows;
