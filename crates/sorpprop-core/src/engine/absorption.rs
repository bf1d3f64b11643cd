#![allow(non_snake_case)]

use super::error::BindingError;
use super::handle::WorkingPair;
use super::native::SorptionEngine;
use super::operation::Operation;
use super::outcome::{MixingValues, MolarVolume, Outcome};

type Result<T> = std::result::Result<T, BindingError>;

/// Entry point to the three absorption families.
pub struct AbsorptionView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<'a, E: SorptionEngine> AbsorptionView<'a, E> {
    pub(crate) fn new(pair: &'a WorkingPair<E>) -> Self {
        Self { pair }
    }

    pub fn conventional(&self) -> ConventionalView<'a, E> {
        ConventionalView { pair: self.pair }
    }

    pub fn activity(&self) -> ActivityView<'a, E> {
        ActivityView { pair: self.pair }
    }

    pub fn mixing(&self) -> MixingView<'a, E> {
        MixingView { pair: self.pair }
    }
}

/// Conventional isotherms relating concentration `X` in kg/kg, pressure in
/// Pa and temperature in K.
pub struct ConventionalView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> ConventionalView<'_, E> {
    pub fn X_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConXpT, &[p, T])
    }

    pub fn p_XT(&self, X: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConPXT, &[X, T])
    }

    pub fn T_pX(&self, p: f64, X: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConTpX, &[p, X])
    }

    pub fn dX_dp_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConDXDpPT, &[p, T])
    }

    pub fn dX_dT_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConDXDTPT, &[p, T])
    }

    pub fn dp_dX_XT(&self, X: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConDpDXXT, &[X, T])
    }

    pub fn dp_dT_XT(&self, X: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::ConDpDTXT, &[X, T])
    }
}

/// Activity-coefficient models. `x` is the liquid-phase mole fraction of the
/// refrigerant; `v1`, `v2` are the molar volumes of refrigerant and sorbent.
pub struct ActivityView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> ActivityView<'_, E> {
    pub fn g_Txv1v2(&self, T: f64, x: f64, v1: MolarVolume, v2: MolarVolume) -> Result<Outcome> {
        self.pair
            .call(Operation::ActGTxv1v2, &[T, x, v1.to_native(), v2.to_native()])
    }

    pub fn p_Txv1v2(&self, T: f64, x: f64, v1: MolarVolume, v2: MolarVolume) -> Result<Outcome> {
        self.pair
            .call(Operation::ActPTxv1v2, &[T, x, v1.to_native(), v2.to_native()])
    }

    pub fn x_pTv1v2(&self, p: f64, T: f64, v1: MolarVolume, v2: MolarVolume) -> Result<Outcome> {
        self.pair
            .call(Operation::ActXpTv1v2, &[p, T, v1.to_native(), v2.to_native()])
    }

    pub fn p_Txv1v2psat(
        &self,
        T: f64,
        x: f64,
        v1: MolarVolume,
        v2: MolarVolume,
        p_sat: f64,
    ) -> Result<Outcome> {
        self.pair.call(
            Operation::ActPTxv1v2psat,
            &[T, x, v1.to_native(), v2.to_native(), p_sat],
        )
    }

    pub fn x_pTv1v2psat(
        &self,
        p: f64,
        T: f64,
        v1: MolarVolume,
        v2: MolarVolume,
        p_sat: f64,
    ) -> Result<Outcome> {
        self.pair.call(
            Operation::ActXpTv1v2psat,
            &[p, T, v1.to_native(), v2.to_native(), p_sat],
        )
    }
}

/// Mixing-rule equations of state. Equilibrium functions also return the
/// vapour mole fractions `y1`, `y2`.
pub struct MixingView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> MixingView<'_, E> {
    pub fn x_pT(&self, p: f64, T: f64) -> Result<MixingValues<Outcome>> {
        self.pair.call_mixing(Operation::MixXpT, [p, T])
    }

    pub fn p_Tx(&self, T: f64, x: f64) -> Result<MixingValues<Outcome>> {
        self.pair.call_mixing(Operation::MixPTx, [T, x])
    }

    pub fn T_px(&self, p: f64, x: f64) -> Result<MixingValues<Outcome>> {
        self.pair.call_mixing(Operation::MixTpx, [p, x])
    }

    pub fn dp_dx_Tx(&self, T: f64, x: f64) -> Result<Outcome> {
        self.pair.call(Operation::MixDpDxTx, &[T, x])
    }

    pub fn dp_dT_Tx(&self, T: f64, x: f64) -> Result<Outcome> {
        self.pair.call(Operation::MixDpDTTx, &[T, x])
    }
}
