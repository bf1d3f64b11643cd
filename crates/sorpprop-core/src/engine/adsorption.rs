#![allow(non_snake_case)]

use super::error::BindingError;
use super::handle::WorkingPair;
use super::native::SorptionEngine;
use super::operation::Operation;
use super::outcome::Outcome;
use super::solver::{Inversion, NewtonSolver};

type Result<T> = std::result::Result<T, BindingError>;

/// Adsorption functions usable with every adsorption isotherm.
///
/// Refrigerant properties an isotherm needs are taken from the approaches the
/// working pair was created with.
pub struct AdsorptionView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<'a, E: SorptionEngine> AdsorptionView<'a, E> {
    pub(crate) fn new(pair: &'a WorkingPair<E>) -> Self {
        Self { pair }
    }

    /// Isotherms of the surface approach only.
    pub fn surface(&self) -> SurfaceView<'a, E> {
        SurfaceView { pair: self.pair }
    }

    /// Surface-approach isotherms that need the vapour pressure as input.
    pub fn surface_vapor(&self) -> SurfaceVaporView<'a, E> {
        SurfaceVaporView { pair: self.pair }
    }

    /// Isotherms of the volumetric approach.
    pub fn volumetric(&self) -> VolumetricView<'a, E> {
        VolumetricView { pair: self.pair }
    }

    /// Loading in kg/kg from pressure in Pa and temperature in K.
    pub fn w_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsWpT, &[p, T])
    }

    pub fn p_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsPwT, &[w, T])
    }

    pub fn T_pw(&self, p: f64, w: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsTpw, &[p, w])
    }

    pub fn dw_dp_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsDwDpPT, &[p, T])
    }

    pub fn dw_dT_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsDwDTPT, &[p, T])
    }

    pub fn dp_dw_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsDpDwWT, &[w, T])
    }

    pub fn dp_dT_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsDpDTWT, &[w, T])
    }

    /// Reduced spreading pressure in kg/mol from total pressure, vapour and
    /// adsorbed phase mole fractions, activity coefficient, temperature and
    /// molar mass.
    pub fn piStar_pyxgTM(&self, p: f64, y: f64, x: f64, g: f64, T: f64, M: f64) -> Result<Outcome> {
        self.pair.call(Operation::AdsPiStarPyxgTM, &[p, y, x, g, T, M])
    }
}

pub struct SurfaceView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> SurfaceView<'_, E> {
    pub fn w_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurWpT, &[p, T])
    }

    pub fn p_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurPwT, &[w, T])
    }

    pub fn T_pw(&self, p: f64, w: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurTpw, &[p, w])
    }

    pub fn dw_dp_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDwDpPT, &[p, T])
    }

    pub fn dw_dT_pT(&self, p: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDwDTPT, &[p, T])
    }

    pub fn dp_dw_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDpDwWT, &[w, T])
    }

    pub fn dp_dT_wT(&self, w: f64, T: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDpDTWT, &[w, T])
    }

    pub fn piStar_pyxgTM(&self, p: f64, y: f64, x: f64, g: f64, T: f64, M: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurPiStarPyxgTM, &[p, y, x, g, T, M])
    }
}

pub struct SurfaceVaporView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> SurfaceVaporView<'_, E> {
    pub fn w_pTpsat(&self, p: f64, T: f64, p_sat: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurWpTpsat, &[p, T, p_sat])
    }

    pub fn p_wTpsat(&self, w: f64, T: f64, p_sat: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurPwTpsat, &[w, T, p_sat])
    }

    /// Native inversion with a fixed vapour pressure.
    pub fn T_pwpsat_native(&self, p: f64, w: f64, p_sat: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurTpwpsat, &[p, w, p_sat])
    }

    /// Equilibrium temperature by Newton iteration, with the vapour pressure
    /// and its derivative supplied as functions of temperature.
    pub fn T_pwpsat<P, D>(&self, p: f64, w: f64, p_sat: P, dp_sat_dT: D) -> Result<Inversion>
    where
        P: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        self.T_pwpsat_from(p, w, p_sat, dp_sat_dT, NewtonSolver::default())
    }

    pub fn T_pwpsat_from<P, D>(
        &self,
        p: f64,
        w: f64,
        p_sat: P,
        dp_sat_dT: D,
        solver: NewtonSolver,
    ) -> Result<Inversion>
    where
        P: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        solver.solve(
            w,
            |T| self.w_pTpsat(p, T, p_sat(T)),
            |T| self.dw_dT_pTpsat(p, T, p_sat(T), dp_sat_dT(T)),
        )
    }

    pub fn dw_dp_pTpsat(&self, p: f64, T: f64, p_sat: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDwDpPTpsat, &[p, T, p_sat])
    }

    pub fn dw_dT_pTpsat(&self, p: f64, T: f64, p_sat: f64, dp_sat_dT: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDwDTPTpsat, &[p, T, p_sat, dp_sat_dT])
    }

    pub fn dp_dw_wTpsat(&self, w: f64, T: f64, p_sat: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDpDwWTpsat, &[w, T, p_sat])
    }

    pub fn dp_dT_wTpsat(&self, w: f64, T: f64, p_sat: f64, dp_sat_dT: f64) -> Result<Outcome> {
        self.pair.call(Operation::SurDpDTWTpsat, &[w, T, p_sat, dp_sat_dT])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn piStar_pyxgTpsatM(
        &self,
        p: f64,
        y: f64,
        x: f64,
        g: f64,
        T: f64,
        p_sat: f64,
        M: f64,
    ) -> Result<Outcome> {
        self.pair
            .call(Operation::SurPiStarPyxgTpsatM, &[p, y, x, g, T, p_sat, M])
    }
}

/// Volumetric approach: characteristic curve W(A) plus the loading functions
/// built on it. `rho_l` is the saturated liquid density in kg/m³.
pub struct VolumetricView<'a, E: SorptionEngine> {
    pair: &'a WorkingPair<E>,
}

impl<E: SorptionEngine> VolumetricView<'_, E> {
    pub fn W_ARho(&self, A: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolWARho, &[A, rho_l])
    }

    pub fn A_WRho(&self, W: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolAWRho, &[W, rho_l])
    }

    pub fn dW_dA_ARho(&self, A: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolDWDAARho, &[A, rho_l])
    }

    pub fn dA_dW_WRho(&self, W: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolDADWWRho, &[W, rho_l])
    }

    pub fn w_pTpsatRho(&self, p: f64, T: f64, p_sat: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolWpTpsatRho, &[p, T, p_sat, rho_l])
    }

    pub fn p_wTpsatRho(&self, w: f64, T: f64, p_sat: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolPwTpsatRho, &[w, T, p_sat, rho_l])
    }

    pub fn T_pwpsatRho_native(&self, p: f64, w: f64, p_sat: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolTpwpsatRho, &[p, w, p_sat, rho_l])
    }

    /// Equilibrium temperature by Newton iteration with saturation properties
    /// supplied as functions of temperature.
    pub fn T_pwpsatRho<P, D, R, S>(
        &self,
        p: f64,
        w: f64,
        p_sat: P,
        dp_sat_dT: D,
        rho_l: R,
        drho_l_dT: S,
    ) -> Result<Inversion>
    where
        P: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
        R: Fn(f64) -> f64,
        S: Fn(f64) -> f64,
    {
        self.T_pwpsatRho_from(p, w, p_sat, dp_sat_dT, rho_l, drho_l_dT, NewtonSolver::default())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn T_pwpsatRho_from<P, D, R, S>(
        &self,
        p: f64,
        w: f64,
        p_sat: P,
        dp_sat_dT: D,
        rho_l: R,
        drho_l_dT: S,
        solver: NewtonSolver,
    ) -> Result<Inversion>
    where
        P: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
        R: Fn(f64) -> f64,
        S: Fn(f64) -> f64,
    {
        solver.solve(
            w,
            |T| self.w_pTpsatRho(p, T, p_sat(T), rho_l(T)),
            |T| self.dw_dT_pTpsatRho(p, T, p_sat(T), rho_l(T), dp_sat_dT(T), drho_l_dT(T)),
        )
    }

    pub fn dw_dp_pTpsatRho(&self, p: f64, T: f64, p_sat: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolDwDpPTpsatRho, &[p, T, p_sat, rho_l])
    }

    pub fn dw_dT_pTpsatRho(
        &self,
        p: f64,
        T: f64,
        p_sat: f64,
        rho_l: f64,
        dp_sat_dT: f64,
        drho_l_dT: f64,
    ) -> Result<Outcome> {
        self.pair.call(
            Operation::VolDwDTPTpsatRho,
            &[p, T, p_sat, rho_l, dp_sat_dT, drho_l_dT],
        )
    }

    pub fn dp_dw_wTpsatRho(&self, w: f64, T: f64, p_sat: f64, rho_l: f64) -> Result<Outcome> {
        self.pair.call(Operation::VolDpDwWTpsatRho, &[w, T, p_sat, rho_l])
    }

    pub fn dp_dT_wTpsatRho(
        &self,
        w: f64,
        T: f64,
        p_sat: f64,
        rho_l: f64,
        dp_sat_dT: f64,
        drho_l_dT: f64,
    ) -> Result<Outcome> {
        self.pair.call(
            Operation::VolDpDTWTpsatRho,
            &[w, T, p_sat, rho_l, dp_sat_dT, drho_l_dT],
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn piStar_pyxgTpsatRhoM(
        &self,
        p: f64,
        y: f64,
        x: f64,
        g: f64,
        T: f64,
        p_sat: f64,
        rho_l: f64,
        M: f64,
    ) -> Result<Outcome> {
        self.pair.call(
            Operation::VolPiStarPyxgTpsatRhoM,
            &[p, y, x, g, T, p_sat, rho_l, M],
        )
    }
}
