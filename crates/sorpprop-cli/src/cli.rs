use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "SorpPropLib CLI - Builds the SorpPropLib JSON database, writes its LaTeX manual and evaluates working pairs through the native library.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Project configuration file in TOML format.
    /// Defaults to ./sorpprop.toml, then the user configuration directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S paths.library=./libsorpPropLib.so
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the semicolon-separated coefficient and experimental tables into the JSON database.
    Build(BuildArgs),
    /// Write the LaTeX manual describing every equation of a database.
    Manual(ManualArgs),
    /// Write the semicolon-separated content lists of a database.
    Content(ContentArgs),
    /// Evaluate one function of the native library for a working pair.
    Calc(CalcArgs),
    /// Find the equilibrium temperature of a loading by Newton iteration.
    Invert(InvertArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding one coefficient table per equation family.
    #[arg(long, value_name = "DIR")]
    pub coefficients: Option<PathBuf>,

    /// Directory of experimental-data tables. Can be used multiple times.
    #[arg(short, long, value_name = "DIR")]
    pub experimental: Vec<PathBuf>,

    /// Directory receiving the compact and the formatted JSON file.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `manual` subcommand.
#[derive(Args, Debug)]
pub struct ManualArgs {
    /// Path to the JSON database.
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Directory receiving the chapter files.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Native library used to draw the comparison figures.
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Leave the figures out even when a library is configured.
    #[arg(long)]
    pub no_figures: bool,
}

/// Arguments for the `content` subcommand.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Path to the JSON database.
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Directory receiving the four lists.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// The working pair an evaluation refers to.
#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    /// Path to the JSON database.
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Native library to evaluate with.
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    #[arg(long, required = true)]
    pub sorbent: String,

    #[arg(long, default_value = "")]
    pub subtype: String,

    #[arg(long, required = true)]
    pub refrigerant: String,

    /// Equation family of the sorption equilibrium (e.g. 'Toth').
    #[arg(long, required = true)]
    pub isotherm: String,

    /// 1-based parameter set of the equation family.
    #[arg(long, default_value_t = 1, value_name = "ID")]
    pub isotherm_id: u32,

    /// Vapour-pressure equation of the refrigerant (e.g. 'VaporPressure_EoS1').
    #[arg(long, value_name = "NAME")]
    pub vapor_pressure: Option<String>,

    #[arg(long, default_value_t = 1, value_name = "ID")]
    pub vapor_pressure_id: u32,

    /// Saturated-liquid-density equation of the refrigerant.
    #[arg(long, value_name = "NAME")]
    pub liquid_density: Option<String>,

    #[arg(long, default_value_t = 1, value_name = "ID")]
    pub liquid_density_id: u32,
}

/// Arguments for the `calc` subcommand.
#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Exported function name (e.g. 'ads_w_pT' or 'direct_ads_w_pT').
    #[arg(short, long, required = true, value_name = "SYMBOL")]
    pub function: String,

    /// Use the flat entry point instead of a working-pair handle.
    #[arg(long)]
    pub direct: bool,

    /// Inputs of the function in the order of its name, in SI units.
    #[arg(required = true, allow_negative_numbers = true, value_name = "VALUE")]
    pub values: Vec<f64>,
}

/// Which isotherm inputs the inversion supplies from the refrigerant functions.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionInputs {
    /// Vapour pressure and its temperature derivative.
    Psat,
    /// Vapour pressure, liquid density and their temperature derivatives.
    PsatRho,
}

/// Arguments for the `invert` subcommand.
#[derive(Args, Debug)]
pub struct InvertArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Pressure in Pa.
    #[arg(short, long, required = true)]
    pub pressure: f64,

    /// Loading in kg/kg.
    #[arg(short = 'w', long, required = true)]
    pub loading: f64,

    #[arg(long, value_enum, default_value_t = InversionInputs::Psat)]
    pub inputs: InversionInputs,

    /// First temperature iterate in K.
    #[arg(long, value_name = "K")]
    pub initial_guess: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calc_accepts_negative_values_and_global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "sorpprop", "calc", "--sorbent", "zeolite", "--refrigerant", "water", "--isotherm",
            "Toth", "-f", "ads_w_pT", "1000", "-5", "-vv", "-S", "paths.library=lib.so",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.set_values, ["paths.library=lib.so"]);
        let Commands::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.values, [1000.0, -5.0]);
        assert_eq!(args.pair.subtype, "");
        assert_eq!(args.pair.isotherm_id, 1);
        assert!(!args.direct);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["sorpprop", "-q", "-v", "content"]);
        assert!(result.is_err());
    }

    #[test]
    fn build_collects_every_experimental_directory() {
        let cli = Cli::try_parse_from([
            "sorpprop", "build", "-e", "exp_ads", "-e", "exp_abs", "--coefficients", "coef",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.experimental, [PathBuf::from("exp_ads"), PathBuf::from("exp_abs")]);
        assert_eq!(args.output, None);
    }
}
