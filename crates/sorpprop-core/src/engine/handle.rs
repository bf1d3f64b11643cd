use super::absorption::AbsorptionView;
use super::adsorption::AdsorptionView;
use super::error::BindingError;
use super::native::SorptionEngine;
use super::operation::Operation;
use super::outcome::{MixingValues, Outcome};
use super::refrigerant::RefrigerantView;
use super::spec::WorkingPairSpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{trace, warn};

/// One allocated working pair of a sorption engine.
///
/// The native resource is released exactly once, when the handle is dropped.
pub struct WorkingPair<E: SorptionEngine> {
    engine: Arc<E>,
    database: PathBuf,
    spec: WorkingPairSpec,
    pair: Option<E::Pair>,
}

impl<E: SorptionEngine> WorkingPair<E> {
    pub fn new(
        engine: Arc<E>,
        database: impl Into<PathBuf>,
        spec: WorkingPairSpec,
    ) -> Result<Self, BindingError> {
        let database = database.into();
        let pair = engine.allocate(&database, &spec)?.ok_or_else(|| {
            BindingError::PairNotFound {
                database: database.display().to_string(),
                spec: Box::new(spec.clone()),
            }
        })?;
        Ok(Self {
            engine,
            database,
            spec,
            pair: Some(pair),
        })
    }

    pub fn spec(&self) -> &WorkingPairSpec {
        &self.spec
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn adsorption(&self) -> AdsorptionView<'_, E> {
        AdsorptionView::new(self)
    }

    pub fn absorption(&self) -> AbsorptionView<'_, E> {
        AbsorptionView::new(self)
    }

    pub fn refrigerant(&self) -> RefrigerantView<'_, E> {
        RefrigerantView::new(self)
    }

    fn pair(&self) -> &E::Pair {
        // Only `Drop` takes the pair out.
        match &self.pair {
            Some(pair) => pair,
            None => unreachable!("working pair used after release"),
        }
    }

    /// Evaluates any scalar operation on this pair.
    pub fn call(&self, op: Operation, args: &[f64]) -> Result<Outcome, BindingError> {
        let raw = self.engine.evaluate(op, args, self.pair())?;
        let outcome = Outcome::from_native(raw);
        trace!("{}({:?}) = {}", op, args, outcome);
        if !outcome.is_defined() {
            warn!("{} is undefined for {}.", op, self.spec);
        }
        Ok(outcome)
    }

    /// Evaluates a mixing operation on this pair.
    pub fn call_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
    ) -> Result<MixingValues<Outcome>, BindingError> {
        let values = self.engine.evaluate_mixing(op, args, self.pair())?.into_outcome();
        trace!("{}({:?}) = {}", op, args, values.value);
        Ok(values)
    }
}

impl<E: SorptionEngine> Drop for WorkingPair<E> {
    fn drop(&mut self) {
        if let Some(pair) = self.pair.take() {
            self.engine.release(pair);
        }
    }
}

impl<E: SorptionEngine> std::fmt::Debug for WorkingPair<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingPair")
            .field("database", &self.database)
            .field("spec", &self.spec)
            .finish()
    }
}
