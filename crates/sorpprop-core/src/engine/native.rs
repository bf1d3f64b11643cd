use super::error::BindingError;
use super::operation::Operation;
use super::outcome::MixingValues;
use super::spec::WorkingPairSpec;
use std::path::Path;

/// The capability surface of a sorption-property library.
///
/// Implementations return raw native values; mapping of the `-1` convention
/// happens in [`super::handle::WorkingPair`] and [`super::direct::DirectCalculator`].
pub trait SorptionEngine {
    /// An allocated working-pair resource. Consumed by [`SorptionEngine::release`].
    type Pair;

    /// Returns `Ok(None)` when the database has no such working pair.
    fn allocate(
        &self,
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<Option<Self::Pair>, BindingError>;

    fn release(&self, pair: Self::Pair);

    fn evaluate(&self, op: Operation, args: &[f64], pair: &Self::Pair) -> Result<f64, BindingError>;

    fn evaluate_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        pair: &Self::Pair,
    ) -> Result<MixingValues<f64>, BindingError>;

    fn evaluate_direct(
        &self,
        op: Operation,
        args: &[f64],
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<f64, BindingError>;

    fn evaluate_direct_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<MixingValues<f64>, BindingError>;
}

pub(crate) fn check_arity(op: Operation, got: usize) -> Result<(), BindingError> {
    if op.arity() == got {
        Ok(())
    } else {
        Err(BindingError::Arity {
            symbol: op.symbol(),
            expected: op.arity(),
            got,
        })
    }
}
