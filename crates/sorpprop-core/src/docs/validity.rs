use super::latex::number;
use crate::core::database::{EntryKind, EquationSet};

const HEADING: &str = "\\textbf{Validity:}\n\\newline\n";
const END: &str = "\n\\newline\n\n";

/// Validity bounds shown for an entry kind: key prefix, symbol and unit.
fn variables(kind: EntryKind) -> &'static [(&'static str, &'static str, &'static str)] {
    match kind {
        EntryKind::Adsorption => &[
            ("pressure", "p", "\\si{\\pascal}"),
            ("temperature", "T", "\\si{\\kelvin}"),
            ("loading", "w", "\\si{\\kilogram\\per\\kilogram}"),
        ],
        EntryKind::Absorption | EntryKind::Refrigerant => {
            &[("temperature", "T", "\\si{\\kelvin}")]
        }
    }
}

/// Renders the validity sentence of an equation set.
///
/// A variable is listed when its lower bound is present.
pub fn render(kind: EntryKind, set: &EquationSet) -> String {
    let ranges: Vec<String> = variables(kind)
        .iter()
        .filter_map(|(key, symbol, unit)| {
            let min = set.validity(&format!("{}-min", key)).value()?;
            let max = set
                .validity(&format!("{}-max", key))
                .value()
                .map(number)
                .unwrap_or_default();
            Some(format!(
                "${} {} \\leq {} \\leq {} {}$",
                number(min),
                unit,
                symbol,
                max,
                unit
            ))
        })
        .collect();

    let body = match ranges.as_slice() {
        [] => "No data on validity available!".to_string(),
        [single] => format!("Equation is approximately valid for {}.", single),
        [init @ .., last] => format!(
            "Equation is approximately valid for {}, and {}.",
            init.join(", "),
            last
        ),
    };
    format!("{}{}{}", HEADING, body, END)
}
