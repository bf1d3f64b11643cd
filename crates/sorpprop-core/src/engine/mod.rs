//! # Engine Module
//!
//! Typed access to the native sorption-property library.
//!
//! ## Overview
//!
//! The numerically hard part of the library (isotherm equations, their
//! inversions, cubic equations of state, spreading pressures) lives in a
//! shared object reached through a C ABI. This module declares that ABI once,
//! as a table of [`operation::Operation`]s, and exposes it through a small
//! capability trait so that everything above it can be exercised without the
//! native library.
//!
//! ## Architecture
//!
//! - **Capability** ([`native`]) - The [`native::SorptionEngine`] trait: allocate
//!   and release a working pair, evaluate an operation by handle or directly
//! - **Adapter** ([`library`]) - [`library::NativeLibrary`], which resolves every
//!   symbol with `libloading` when the library is opened
//! - **Handles** ([`handle`]) - [`handle::WorkingPair`], owning one native pair
//!   and releasing it exactly once on drop
//! - **Family views** ([`adsorption`], [`absorption`], [`refrigerant`]) - One typed
//!   method per exported function
//! - **Direct calls** ([`direct`]) - Evaluation through the flat `direct_*` entry
//!   points without a handle
//! - **Inversion** ([`solver`]) - Newton-Raphson temperature search used where
//!   saturation properties are supplied as callbacks
//!
//! ## Conventions
//!
//! The native library returns `-1` when a function is not defined for the
//! selected isotherm. Every evaluation here returns an [`outcome::Outcome`]
//! instead, and activity-model molar volumes are passed as
//! [`outcome::MolarVolume`] so that "use the database value" never has to be
//! spelled as a negative number by callers.

pub mod absorption;
pub mod adsorption;
pub mod config;
pub mod direct;
pub mod error;
pub mod handle;
pub mod library;
#[cfg(test)]
pub(crate) mod mock;
pub mod native;
pub mod operation;
pub mod outcome;
pub mod progress;
pub mod refrigerant;
pub mod solver;
pub mod spec;

pub use direct::DirectCalculator;
pub use error::BindingError;
pub use handle::WorkingPair;
pub use library::NativeLibrary;
pub use native::SorptionEngine;
pub use operation::Operation;
pub use outcome::{MixingValues, MolarVolume, Outcome};
pub use solver::{Inversion, NewtonSolver};
pub use spec::{Approach, WorkingPairSpec};
