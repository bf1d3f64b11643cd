//! # Core Module
//!
//! Stateless data structures and readers for the SorpPropLib property database.
//!
//! ## Overview
//!
//! The database stores fitted equilibrium equations and measured data for
//! adsorption and absorption working pairs, together with refrigerant property
//! functions. Everything in this module is plain data plus the conversions
//! between the tabular sources and the JSON form consumed by the native library.
//!
//! - **Source tables** ([`io`]) - Semicolon-separated CSV files with header and
//!   units lines.
//! - **Database** ([`database`]) - Entry model, builder and JSON persistence.

pub mod database;
pub mod io;
