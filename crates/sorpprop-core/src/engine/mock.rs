//! An in-memory [`SorptionEngine`] for tests.

use super::error::BindingError;
use super::native::{SorptionEngine, check_arity};
use super::operation::{Operation, Shape};
use super::outcome::MixingValues;
use super::spec::WorkingPairSpec;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

type ScalarFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;
type MixingFn = Box<dyn Fn(f64, f64) -> (f64, f64, f64) + Send + Sync>;

#[derive(Debug)]
pub struct MockPair(usize);

/// Evaluates registered closures; unregistered scalar operations return 0.
#[derive(Default)]
pub struct MockEngine {
    scalar: HashMap<Operation, ScalarFn>,
    mixing: HashMap<Operation, MixingFn>,
    no_pairs: bool,
    allocated: AtomicUsize,
    released: AtomicUsize,
    direct_calls: AtomicUsize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every allocation reports "working pair not found".
    pub fn without_pairs(mut self) -> Self {
        self.no_pairs = true;
        self
    }

    pub fn with_constant(self, op: Operation, value: f64) -> Self {
        self.with_function(op, move |_| value)
    }

    pub fn with_function(
        mut self,
        op: Operation,
        f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.scalar.insert(op, Box::new(f));
        self
    }

    pub fn with_mixing(
        mut self,
        op: Operation,
        f: impl Fn(f64, f64) -> (f64, f64, f64) + Send + Sync + 'static,
    ) -> Self {
        self.mixing.insert(op, Box::new(f));
        self
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn direct_calls(&self) -> usize {
        self.direct_calls.load(Ordering::SeqCst)
    }

    fn scalar(&self, op: Operation, args: &[f64]) -> Result<f64, BindingError> {
        check_arity(op, args.len())?;
        if op.shape() != Shape::Scalar {
            return Err(BindingError::WrongForm {
                symbol: op.symbol(),
                form: "scalar",
            });
        }
        Ok(self.scalar.get(&op).map_or(0.0, |f| f(args)))
    }

    fn mixing(&self, op: Operation, args: [f64; 2]) -> Result<MixingValues<f64>, BindingError> {
        if op.shape() != Shape::Mixing {
            return Err(BindingError::WrongForm {
                symbol: op.symbol(),
                form: "mixing",
            });
        }
        let (value, y1, y2) = self
            .mixing
            .get(&op)
            .map_or((0.0, 0.0, 0.0), |f| f(args[0], args[1]));
        Ok(MixingValues { value, y1, y2 })
    }
}

impl SorptionEngine for MockEngine {
    type Pair = MockPair;

    fn allocate(
        &self,
        _database: &Path,
        _spec: &WorkingPairSpec,
    ) -> Result<Option<MockPair>, BindingError> {
        if self.no_pairs {
            return Ok(None);
        }
        let id = self.allocated.fetch_add(1, Ordering::SeqCst);
        Ok(Some(MockPair(id)))
    }

    fn release(&self, pair: MockPair) {
        let _ = pair.0;
        self.released.fetch_add(1, Ordering::SeqCst);
    }

    fn evaluate(&self, op: Operation, args: &[f64], _pair: &MockPair) -> Result<f64, BindingError> {
        self.scalar(op, args)
    }

    fn evaluate_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        _pair: &MockPair,
    ) -> Result<MixingValues<f64>, BindingError> {
        self.mixing(op, args)
    }

    fn evaluate_direct(
        &self,
        op: Operation,
        args: &[f64],
        _database: &Path,
        _spec: &WorkingPairSpec,
    ) -> Result<f64, BindingError> {
        self.direct_calls.fetch_add(1, Ordering::SeqCst);
        self.scalar(op, args)
    }

    fn evaluate_direct_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        _database: &Path,
        _spec: &WorkingPairSpec,
    ) -> Result<MixingValues<f64>, BindingError> {
        self.direct_calls.fetch_add(1, Ordering::SeqCst);
        self.mixing(op, args)
    }
}
