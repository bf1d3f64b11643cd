#![allow(non_snake_case)]

use super::error::BindingError;
use super::handle::WorkingPair;
use super::native::SorptionEngine;
use super::operation::Operation;
use super::outcome::Outcome;

type Result<T> = std::result::Result<T, BindingError>;

/// Saturation properties of the working pair's refrigerant, computed with the
/// vapour-pressure and liquid-density approaches chosen at allocation.
pub struct RefrigerantView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<'a, E: SorptionEngine> RefrigerantView<'a, E> {
    pub(crate) fn new(pair: &'a WorkingPair<E>) -> Self {
        Self { pair }
    }

    /// Vapour pressure in Pa.
    pub fn p_sat_T(&self, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::RefPsatT, &[T])
    }

    pub fn dp_sat_dT_T(&self, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::RefDpsatDTT, &[T])
    }

    /// Saturated liquid density in kg/m³.
    pub fn rho_l_T(&self, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::RefRhoLT, &[T])
    }

    pub fn drho_l_dT_T(&self, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::RefDrhoLDTT, &[T])
    }

    /// Saturation temperature in K.
    pub fn T_sat_p(&self, p: f64) -> Result<Outcome> {
        self.pair.call(Operation::RefTsatP, &[p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::engine::spec::{Approach, WorkingPairSpec};
    use std::sync::Arc;

    #[test]
    fn saturation_functions_route_to_ref_symbols() {
        let engine = MockEngine::new()
            .with_function(Operation::RefPsatT, |a| a[0] * 10.0)
            .with_constant(Operation::RefTsatP, -1.0);
        let spec = WorkingPairSpec::new("", "", "water", Approach::new("VaporPressure_EoS1"))
            .with_vapor_pressure(Approach::new("VaporPressure_EoS1"));
        let pair = WorkingPair::new(Arc::new(engine), "db.json", spec).unwrap();

        assert_eq!(pair.refrigerant().p_sat_T(300.0).unwrap(), Outcome::Defined(3000.0));
        assert_eq!(pair.refrigerant().T_sat_p(1000.0).unwrap(), Outcome::Undefined);
    }
}
