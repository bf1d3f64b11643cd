use super::error::BindingError;
use super::native::SorptionEngine;
use super::operation::Operation;
use super::outcome::{MixingValues, Outcome};
use super::spec::WorkingPairSpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Evaluates operations through the flat `direct_*` entry points.
///
/// Every call hands the database path and the full working-pair description
/// to the library, which allocates and frees its own pair internally. No
/// handle is held between calls.
#[derive(Debug)]
pub struct DirectCalculator<E: SorptionEngine> {
    engine: Arc<E>,
    database: PathBuf,
    spec: WorkingPairSpec,
}

impl<E: SorptionEngine> DirectCalculator<E> {
    pub fn new(engine: Arc<E>, database: impl Into<PathBuf>, spec: WorkingPairSpec) -> Self {
        Self {
            engine,
            database: database.into(),
            spec,
        }
    }

    pub fn spec(&self) -> &WorkingPairSpec {
        &self.spec
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn call(&self, op: Operation, args: &[f64]) -> Result<Outcome, BindingError> {
        let raw = self
            .engine
            .evaluate_direct(op, args, &self.database, &self.spec)?;
        trace!("{}({:?}) = {}", op.direct_symbol(), args, raw);
        Ok(Outcome::from_native(raw))
    }

    pub fn call_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
    ) -> Result<MixingValues<Outcome>, BindingError> {
        let values = self
            .engine
            .evaluate_direct_mixing(op, args, &self.database, &self.spec)?;
        Ok(values.into_outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::engine::spec::Approach;

    fn spec() -> WorkingPairSpec {
        WorkingPairSpec::new("zeolite", "13x", "water", Approach::new("Toth"))
    }

    #[test]
    fn direct_calls_hold_no_handle() {
        let engine = Arc::new(MockEngine::new().with_constant(Operation::AdsWpT, 0.25));
        let calculator = DirectCalculator::new(engine.clone(), "db.json", spec());
        assert_eq!(
            calculator.call(Operation::AdsWpT, &[1000.0, 300.0]).unwrap(),
            Outcome::Defined(0.25)
        );
        assert_eq!(engine.allocated(), 0);
        assert_eq!(engine.direct_calls(), 1);
    }

    #[test]
    fn direct_mixing_maps_undefined() {
        let engine = Arc::new(MockEngine::new().with_mixing(Operation::MixPTx, |_, _| (-1.0, 0.2, 0.8)));
        let calculator = DirectCalculator::new(engine, "db.json", spec());
        let values = calculator.call_mixing(Operation::MixPTx, [300.0, 0.4]).unwrap();
        assert_eq!(values.value, Outcome::Undefined);
        assert_eq!(values.y2, 0.8);
    }
}
