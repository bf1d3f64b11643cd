pub mod build;
pub mod calc;
pub mod content;
pub mod invert;
pub mod manual;

use crate::cli::PairArgs;
use sorpproplib::engine::{Approach, WorkingPairSpec};

/// The working pair described by the command-line arguments.
pub(crate) fn pair_spec(args: &PairArgs) -> WorkingPairSpec {
    let mut spec = WorkingPairSpec::new(
        &args.sorbent,
        &args.subtype,
        &args.refrigerant,
        Approach::with_id(&args.isotherm, args.isotherm_id),
    );
    if let Some(name) = &args.vapor_pressure {
        spec = spec.with_vapor_pressure(Approach::with_id(name, args.vapor_pressure_id));
    }
    if let Some(name) = &args.liquid_density {
        spec = spec.with_liquid_density(Approach::with_id(name, args.liquid_density_id));
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn refrigerant_approaches_default_to_placeholders() {
        let cli = Cli::try_parse_from([
            "sorpprop", "invert", "--sorbent", "silica gel", "--subtype", "123", "--refrigerant",
            "water", "--isotherm", "DubininAstakhov", "--isotherm-id", "2", "--vapor-pressure",
            "VaporPressure_EoS1", "-p", "1000", "-w", "0.1",
        ])
        .unwrap();
        let Commands::Invert(args) = cli.command else {
            panic!("expected invert");
        };
        let spec = pair_spec(&args.pair);
        let placeholder = WorkingPairSpec::new("x", "", "y", Approach::new("z"));
        assert_eq!(spec.isotherm, Approach::with_id("DubininAstakhov", 2));
        assert_eq!(spec.vapor_pressure, Approach::with_id("VaporPressure_EoS1", 1));
        assert_eq!(spec.liquid_density, placeholder.liquid_density);
    }
}
