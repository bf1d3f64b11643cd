use super::pair_spec;
use crate::cli::{InversionInputs, InvertArgs};
use crate::config::PartialProjectConfig;
use crate::error::Result;
use sorpproplib::engine::{BindingError, Inversion, NativeLibrary, NewtonSolver, Outcome, WorkingPair};
use std::sync::Arc;
use tracing::{info, warn};

pub fn run(args: InvertArgs, project: &PartialProjectConfig) -> Result<()> {
    let (database, library) = project.pair_paths(&args.pair)?;
    let engine = Arc::new(NativeLibrary::open(&library)?);
    info!("Loaded native library from {:?}", &library);

    let pair = WorkingPair::new(engine, &database, pair_spec(&args.pair))?;
    let solver = args
        .initial_guess
        .map_or_else(NewtonSolver::default, |t| NewtonSolver::default().with_initial_guess(t));

    let refrigerant = pair.refrigerant();
    let p_sat = |t| property(refrigerant.p_sat_T(t));
    let dp_sat_dt = |t| property(refrigerant.dp_sat_dT_T(t));

    let inversion = match args.inputs {
        InversionInputs::Psat => pair.adsorption().surface_vapor().T_pwpsat_from(
            args.pressure,
            args.loading,
            p_sat,
            dp_sat_dt,
            solver,
        )?,
        InversionInputs::PsatRho => pair.adsorption().volumetric().T_pwpsatRho_from(
            args.pressure,
            args.loading,
            p_sat,
            dp_sat_dt,
            |t| property(refrigerant.rho_l_T(t)),
            |t| property(refrigerant.drho_l_dT_T(t)),
            solver,
        )?,
    };

    println!("{}", report(inversion));
    Ok(())
}

/// An undefined saturation property becomes NaN, which ends the iteration
/// through a non-finite step.
fn property(value: std::result::Result<Outcome, BindingError>) -> f64 {
    match value {
        Ok(outcome) => outcome.value().unwrap_or(f64::NAN),
        Err(e) => {
            warn!("Saturation property unavailable: {}", e);
            f64::NAN
        }
    }
}

fn report(inversion: Inversion) -> String {
    match inversion {
        Inversion::Converged {
            temperature,
            iterations,
        } => format!("T = {} K ({} iteration(s))", temperature, iterations),
        Inversion::NotConverged { last, iterations } => format!(
            "not converged after {} iteration(s), last iterate T = {} K",
            iterations, last
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_properties_become_nan() {
        assert!(property(Ok(Outcome::Undefined)).is_nan());
        assert_eq!(property(Ok(Outcome::Defined(3169.0))), 3169.0);
        let err = BindingError::NonUtf8Path("db".to_string());
        assert!(property(Err(err)).is_nan());
    }

    #[test]
    fn reports_distinguish_convergence() {
        let converged = Inversion::Converged {
            temperature: 318.5,
            iterations: 4,
        };
        assert_eq!(report(converged), "T = 318.5 K (4 iteration(s))");
        let failed = Inversion::NotConverged {
            last: 100.0,
            iterations: 50,
        };
        assert!(report(failed).starts_with("not converged after 50"));
    }
}
