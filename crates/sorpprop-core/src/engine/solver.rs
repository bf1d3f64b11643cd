use super::error::BindingError;
use super::outcome::Outcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_ITERATIONS: usize = 50;
/// Absolute tolerance on the loading residual in kg/kg.
pub const TOLERANCE: f64 = 1e-8;
/// Iterates below 0 K are reset to this temperature.
pub const TEMPERATURE_FLOOR_K: f64 = 100.0;
pub const DEFAULT_GUESS_K: f64 = 313.15;

/// Result of a temperature inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Inversion {
    Converged { temperature: f64, iterations: usize },
    NotConverged { last: f64, iterations: usize },
}

impl Inversion {
    pub fn temperature(self) -> Option<f64> {
        match self {
            Inversion::Converged { temperature, .. } => Some(temperature),
            Inversion::NotConverged { .. } => None,
        }
    }

    pub fn iterations(self) -> usize {
        match self {
            Inversion::Converged { iterations, .. } | Inversion::NotConverged { iterations, .. } => {
                iterations
            }
        }
    }
}

/// Newton-Raphson search for the temperature at which the loading reaches
/// a target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSolver {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub initial_guess: f64,
    pub temperature_floor: f64,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
            initial_guess: DEFAULT_GUESS_K,
            temperature_floor: TEMPERATURE_FLOOR_K,
        }
    }
}

impl NewtonSolver {
    pub fn with_initial_guess(mut self, temperature: f64) -> Self {
        self.initial_guess = temperature;
        self
    }

    /// `loading(T)` and `slope(T) = dw/dT` are evaluated at each iterate. An
    /// undefined evaluation or a non-finite step stops the search.
    pub fn solve<L, S>(&self, target: f64, loading: L, slope: S) -> Result<Inversion, BindingError>
    where
        L: Fn(f64) -> Result<Outcome, BindingError>,
        S: Fn(f64) -> Result<Outcome, BindingError>,
    {
        let mut t = self.initial_guess;

        for iteration in 0..self.max_iterations {
            let Outcome::Defined(w) = loading(t)? else {
                return Ok(self.give_up(t, iteration, "undefined loading"));
            };
            let residual = w - target;
            if residual.abs() <= self.tolerance {
                debug!("Temperature inversion converged after {} step(s).", iteration);
                return Ok(Inversion::Converged {
                    temperature: t,
                    iterations: iteration,
                });
            }

            let Outcome::Defined(dw_dt) = slope(t)? else {
                return Ok(self.give_up(t, iteration, "undefined slope"));
            };
            let next = t - residual / dw_dt;
            if !next.is_finite() {
                return Ok(self.give_up(t, iteration, "non-finite step"));
            }
            t = if next < 0.0 { self.temperature_floor } else { next };
        }

        match loading(t)? {
            Outcome::Defined(w) if (w - target).abs() <= self.tolerance => Ok(Inversion::Converged {
                temperature: t,
                iterations: self.max_iterations,
            }),
            _ => Ok(self.give_up(t, self.max_iterations, "iteration limit")),
        }
    }

    fn give_up(&self, last: f64, iterations: usize, reason: &str) -> Inversion {
        debug!(
            "Temperature inversion stopped at T = {} K after {} step(s): {}.",
            last, iterations, reason
        );
        Inversion::NotConverged { last, iterations }
    }
}
