use super::pair_spec;
use crate::cli::CalcArgs;
use crate::config::PartialProjectConfig;
use crate::error::{CliError, Result};
use sorpproplib::engine::operation::Shape;
use sorpproplib::engine::{
    BindingError, DirectCalculator, MixingValues, NativeLibrary, Operation, Outcome, WorkingPair,
};
use std::sync::Arc;
use tracing::{debug, info};

pub fn run(args: CalcArgs, project: &PartialProjectConfig) -> Result<()> {
    let (database, library) = project.pair_paths(&args.pair)?;
    let op = lookup(&args.function)?;
    let direct = args.direct || args.function.starts_with("direct_");
    let spec = pair_spec(&args.pair);
    debug!("Evaluating {} for {} (direct: {}).", op, spec, direct);

    let engine = Arc::new(NativeLibrary::open(&library)?);
    info!("Loaded native library from {:?}", &library);

    let line = match (op.shape(), direct) {
        (Shape::Scalar, false) => {
            let pair = WorkingPair::new(engine, &database, spec)?;
            describe(pair.call(op, &args.values)?)
        }
        (Shape::Scalar, true) => {
            let calculator = DirectCalculator::new(engine, &database, spec);
            describe(calculator.call(op, &args.values)?)
        }
        (Shape::Mixing, false) => {
            let pair = WorkingPair::new(engine, &database, spec)?;
            describe_mixing(pair.call_mixing(op, two_values(op, &args.values)?)?)
        }
        (Shape::Mixing, true) => {
            let calculator = DirectCalculator::new(engine, &database, spec);
            describe_mixing(calculator.call_mixing(op, two_values(op, &args.values)?)?)
        }
    };
    println!("{} = {}", op, line);
    Ok(())
}

fn lookup(function: &str) -> Result<Operation> {
    Operation::from_symbol(function).ok_or_else(|| {
        CliError::Argument(format!(
            "Unknown function '{}'. Expected an exported name such as 'ads_w_pT'.",
            function
        ))
    })
}

fn two_values(op: Operation, values: &[f64]) -> std::result::Result<[f64; 2], BindingError> {
    <[f64; 2]>::try_from(values).map_err(|_| BindingError::Arity {
        symbol: op.symbol(),
        expected: 2,
        got: values.len(),
    })
}

fn describe(outcome: Outcome) -> String {
    outcome.to_string()
}

fn describe_mixing(values: MixingValues<Outcome>) -> String {
    format!("{} (y1 = {}, y2 = {})", values.value, values.y1, values.y2)
}
