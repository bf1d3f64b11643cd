//! Comparison of fitted equations with their experimental data.
//!
//! Figures are written as pgfplots `tikzpicture`s so that the manual compiles
//! without external image files. Measured points are drawn as marks, the
//! fitted equation as one line per group, evaluated at the sorted measured
//! abscissae of that group.

use super::approach::RefrigerantFunctions;
use super::corrections::EquilibriumModel;
use super::latex;
use crate::core::database::{EntryKind, EquationSet, ExperimentalSet};
use crate::engine::{BindingError, Outcome, SorptionEngine, WorkingPair};
use std::fmt::Write;
use tracing::debug;

pub const START: &str = "\\textbf{Visualization:}\n%";
pub const END: &str = "\n\\FloatBarrier\n\\newpage\n";

const PRESSURE_KPA: &str = r"Pressure $p$ / kPa $\longrightarrow$";
const TEMPERATURE: &str = r"Temperature $T$ / K $\longrightarrow$";
const LOADING: &str = r"Loading $w$ / kg kg$^{-1}$ $\longrightarrow$";
const CONCENTRATION: &str = r"Conc. $X$ or molar fraction $x$  / kg kg$^{-1}$ or mol mol$^{-1}$ $\longrightarrow$";
const INVERSE_TEMPERATURE: &str = r"Temperature $-1/T$ / -K$^{-1}$ $\longrightarrow$";
const POTENTIAL: &str = r"Adsorption potential $A$ / J mol$^{-1}$ $\longrightarrow$";
const VOLUMETRIC_LOADING: &str = r"Volumetric loading $W$ / m$^{3}$ kg$^{-1}$ $\longrightarrow$";
const LIQUID_DENSITY: &str =
    r"Saturated liquid density $\rho_\mathrm{sat}^{\mathrm{liq}}$ / kg m$^{\mathrm{-3}}$ $\longrightarrow$";
const PRESSURE_BAR: &str = r"Pressure $p$ / bar $\longrightarrow$";

/// How the points of an experimental set are grouped into curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Loading over pressure, one curve per temperature.
    Isotherms,
    /// Loading over temperature, one curve per pressure.
    Isobars,
    /// Pressure over `-1/T`, one curve per loading.
    Isosteres,
    /// Pressure over concentration, one curve per temperature.
    IsothermsPressure,
    /// Volumetric loading over adsorption potential.
    Characteristic,
}

impl Grouping {
    /// `None` when sets of this measurement type cannot be drawn.
    pub fn for_measurement(kind: EntryKind, measurement: &str) -> Option<Self> {
        match (kind, measurement) {
            (EntryKind::Refrigerant, _) => None,
            (_, "isotherms") => Some(Grouping::Isotherms),
            (_, "isosteres") => Some(Grouping::Isosteres),
            (EntryKind::Adsorption, "isobars") => Some(Grouping::Isobars),
            (EntryKind::Absorption, "isotherms_p") => Some(Grouping::IsothermsPressure),
            (EntryKind::Adsorption, _) => Some(Grouping::Characteristic),
            (EntryKind::Absorption, _) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Marks,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub legend: Option<String>,
    pub style: Style,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub log_y: bool,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<Series>,
}

impl Figure {
    fn new(x_label: &'static str, y_label: &'static str) -> Self {
        Self {
            x_label,
            y_label,
            log_y: false,
            x_range: None,
            y_range: None,
            series: Vec::new(),
        }
    }

    /// Renders the figure environment, ending with a newline.
    pub fn to_tikz(&self) -> String {
        let mut out = String::from("\\begin{figure}[!htp]\n\\centering\n\\begin{tikzpicture}\n");
        out.push_str("\\begin{axis}[\n    width=14.9cm,\n    height=10cm,\n");
        let _ = writeln!(out, "    xlabel={{{}}},", self.x_label);
        let _ = writeln!(out, "    ylabel={{{}}},", self.y_label);
        if let Some((min, max)) = self.x_range.filter(|(a, b)| a.is_finite() && b.is_finite()) {
            let _ = writeln!(out, "    xmin={}, xmax={},", min, max);
        }
        if let Some((min, max)) = self.y_range.filter(|(a, b)| a.is_finite() && b.is_finite()) {
            let _ = writeln!(out, "    ymin={}, ymax={},", min, max);
        }
        if self.log_y {
            out.push_str("    ymode=log,\n");
        }
        out.push_str("    axis lines=left,\n    grid=major,\n    grid style={dotted, gray},\n");
        if self.series.iter().any(|s| s.legend.is_some()) {
            out.push_str("    legend pos=outer north east,\n    legend style={font=\\footnotesize},\n");
        }
        out.push_str("]\n");

        for series in &self.series {
            let options = match series.style {
                Style::Marks => "only marks, mark=*",
                Style::Line => "no markers, thick",
            };
            let _ = write!(out, "\\addplot+[{}] coordinates {{", options);
            for (x, y) in series.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                let _ = write!(out, " ({}, {})", x, y);
            }
            out.push_str(" };\n");
            if let Some(legend) = &series.legend {
                let _ = writeln!(out, "\\addlegendentry{{{}}}", legend);
            }
        }
        out.push_str("\\end{axis}\n\\end{tikzpicture}\n\\end{figure}\n");
        out
    }
}

/// A drawn comparison and its mean absolute percentage error.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub figure: Figure,
    pub mape: f64,
}

#[derive(Debug, Default)]
struct Extent {
    min: Option<f64>,
    max: Option<f64>,
}

impl Extent {
    fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }
}

/// Axis extents and error sum collected while walking the measured points.
#[derive(Debug, Default)]
struct Tally {
    x: Extent,
    y: Extent,
    error: f64,
    count: usize,
}

impl Tally {
    fn measured(&mut self, x: f64, y: f64) {
        self.x.include(0.9 * x);
        self.x.include(1.1 * x);
        self.y.include(y);
    }

    /// Adds one model evaluation; `scale` converts it to plot units.
    fn calculated(&mut self, raw: f64, calculated: Outcome, scale: f64) {
        let Some(value) = calculated.value().filter(|v| v.is_finite()) else {
            return;
        };
        if let Some(max) = self.y.max.as_mut() {
            *max = max.max(value * scale);
        }
        self.error += (raw - value).abs() / raw.max(1e-12);
        self.count += 1;
    }

    fn mape(&self) -> f64 {
        round2(self.error / self.count.max(1) as f64 * 100.0)
    }

    fn apply(&self, figure: &mut Figure) {
        if let (Some(min), Some(max)) = (self.x.min, self.x.max) {
            figure.x_range = Some((min, max));
        }
        if let (Some(min), Some(max)) = (self.y.min, self.y.max) {
            let lower = if figure.log_y { 0.9 * min } else { (0.9 * min).max(0.0) };
            figure.y_range = Some((lower, 1.1 * max));
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct values of `keys` in ascending order with the indices carrying them.
fn groups(keys: &[f64]) -> Vec<(f64, Vec<usize>)> {
    let mut distinct: Vec<f64> = keys.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    distinct
        .into_iter()
        .map(|key| {
            let members = (0..keys.len()).filter(|&i| keys[i] == key).collect();
            (key, members)
        })
        .collect()
}

fn sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values
}

fn curve(legend: String, points: Vec<(f64, Outcome)>) -> Series {
    Series {
        legend: Some(legend),
        style: Style::Line,
        points: points
            .into_iter()
            .filter_map(|(x, y)| y.value().map(|y| (x, y)))
            .collect(),
    }
}

fn marks(legend: String, points: Vec<(f64, f64)>) -> Series {
    Series {
        legend: Some(legend),
        style: Style::Marks,
        points,
    }
}

/// Truncates measured series to their common length.
fn columns<'a>(set: &'a ExperimentalSet, names: &[&str]) -> Vec<&'a [f64]> {
    let columns: Vec<&[f64]> = names.iter().map(|name| set.series(name)).collect();
    let len = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    columns.into_iter().map(|c| &c[..len]).collect()
}

/// Draws `set` against `model`; `None` when the set holds no usable points.
#[allow(non_snake_case)]
pub fn compare<M: EquilibriumModel>(
    kind: EntryKind,
    grouping: Grouping,
    set: &ExperimentalSet,
    model: &M,
) -> Result<Option<Comparison>, BindingError> {
    let mut tally = Tally::default();
    let mut figure = match (grouping, kind) {
        (Grouping::Isotherms, EntryKind::Absorption) => Figure::new(PRESSURE_KPA, CONCENTRATION),
        (Grouping::Isotherms, _) => Figure::new(PRESSURE_KPA, LOADING),
        (Grouping::Isobars, _) => Figure::new(TEMPERATURE, LOADING),
        (Grouping::Isosteres, _) => Figure::new(INVERSE_TEMPERATURE, PRESSURE_KPA),
        (Grouping::IsothermsPressure, _) => Figure::new(CONCENTRATION, PRESSURE_KPA),
        (Grouping::Characteristic, _) => Figure::new(POTENTIAL, VOLUMETRIC_LOADING),
    };

    match grouping {
        Grouping::Isotherms => {
            let [p, T, w] = columns(set, &["pressures", "temperatures", "loadings"])[..] else {
                return Ok(None);
            };
            for (key, members) in groups(T) {
                for &i in &members {
                    tally.measured(p[i] / 1000.0, w[i]);
                    tally.calculated(w[i], model.loading(p[i], T[i])?, 1.0);
                }
                let label = latex::number(key);
                figure.series.push(marks(
                    format!("Exp.: {} K", label),
                    members.iter().map(|&i| (p[i] / 1000.0, w[i])).collect(),
                ));
                let mut line = Vec::with_capacity(members.len());
                for p in sorted(members.iter().map(|&i| p[i])) {
                    line.push((p / 1000.0, model.loading(p, key)?));
                }
                figure.series.push(curve(format!("Calc.: {} K", label), line));
            }
        }
        Grouping::Isobars => {
            let [p, T, w] = columns(set, &["pressures", "temperatures", "loadings"])[..] else {
                return Ok(None);
            };
            for (key, members) in groups(p) {
                for &i in &members {
                    tally.measured(T[i], w[i]);
                    tally.calculated(w[i], model.loading(p[i], T[i])?, 1.0);
                }
                let label = latex::number(key);
                figure.series.push(marks(
                    format!("Exp.: {} Pa", label),
                    members.iter().map(|&i| (T[i], w[i])).collect(),
                ));
                let mut line = Vec::with_capacity(members.len());
                for T in sorted(members.iter().map(|&i| T[i])) {
                    line.push((T, model.loading(key, T)?));
                }
                figure.series.push(curve(format!("Calc.: {} Pa", label), line));
            }
        }
        Grouping::Isosteres => {
            figure.log_y = true;
            let [p, T, w] = columns(set, &["pressures", "temperatures", "loadings"])[..] else {
                return Ok(None);
            };
            for (key, members) in groups(w) {
                for &i in &members {
                    tally.measured(-1.0 / T[i], p[i] / 1000.0);
                    tally.calculated(p[i], model.pressure(w[i], T[i])?, 1.0 / 1000.0);
                }
                let label = latex::number(round2(key * 100.0));
                figure.series.push(marks(
                    format!("Exp.: {} \\%", label),
                    members.iter().map(|&i| (-1.0 / T[i], p[i] / 1000.0)).collect(),
                ));
                let mut line = Vec::with_capacity(members.len());
                for T in sorted(members.iter().map(|&i| T[i])) {
                    let p = model.pressure(key, T)?;
                    line.push((-1.0 / T, p.value().map_or(Outcome::Undefined, |p| Outcome::Defined(p / 1000.0))));
                }
                figure.series.push(curve(format!("Calc.: {} \\%", label), line));
            }
        }
        Grouping::IsothermsPressure => {
            let [p, T, w] = columns(set, &["pressures", "temperatures", "loadings"])[..] else {
                return Ok(None);
            };
            for (key, members) in groups(T) {
                for &i in &members {
                    tally.measured(w[i], p[i] / 1000.0);
                    tally.calculated(p[i], model.pressure(w[i], T[i])?, 1.0 / 1000.0);
                }
                let label = latex::number(key);
                figure.series.push(marks(
                    format!("Exp.: {} K", label),
                    members.iter().map(|&i| (w[i], p[i] / 1000.0)).collect(),
                ));
                let mut line = Vec::with_capacity(members.len());
                for w in sorted(members.iter().map(|&i| w[i])) {
                    let p = model.pressure(w, key)?;
                    line.push((w, p.value().map_or(Outcome::Undefined, |p| Outcome::Defined(p / 1000.0))));
                }
                figure.series.push(curve(format!("Calc.: {} K", label), line));
            }
        }
        Grouping::Characteristic => {
            let [A, W] = columns(set, &["adsorptionPotentials", "volumetricLoadings"])[..] else {
                return Ok(None);
            };
            for i in 0..A.len() {
                tally.measured(A[i], W[i]);
                tally.calculated(W[i], model.characteristic(A[i])?, 1.0);
            }
            if !A.is_empty() {
                figure.series.push(marks(
                    "Experiment".to_string(),
                    A.iter().copied().zip(W.iter().copied()).collect(),
                ));
                let mut line = Vec::with_capacity(A.len());
                for A in sorted(A.iter().copied()) {
                    line.push((A, model.characteristic(A)?));
                }
                figure.series.push(curve("Calculated".to_string(), line));
            }
        }
    }

    if figure.series.is_empty() {
        return Ok(None);
    }
    tally.apply(&mut figure);
    debug!(
        "Compared {} points of '{}' with MAPE {}%.",
        tally.count,
        set.measurement.kind,
        tally.mape()
    );
    Ok(Some(Comparison {
        figure,
        mape: tally.mape(),
    }))
}

const ADSORPTION_UNCERTAINTY: [(&str, &str); 10] = [
    ("pressure-abs", r"Pressure, absolute, in $\si{\pascal}$ $\,\to\,$ "),
    ("pressure-rel", r"Pressure, relative, in \% $\,\to\,$ "),
    ("temperature-abs", r"Temperature, absolute, in $\si{\kelvin}$ $\,\to\,$ "),
    ("temperature-rel", r"Temperature, relative, in \% $\,\to\,$ "),
    ("loading-abs", r"Loading, absolute, in $\si{\kilogram\per\kilogram}$ $\,\to\,$ "),
    ("loading-rel", r"Loading, relative, in \% $\,\to\,$ "),
    ("adsorptionPotential-abs", r"Adsorption potential, absolute, in $\si{\joule\per\mole}$ $\,\to\,$ "),
    ("adsorptionPotential-rel", r"Adsorption potential, relative, in \% $\,\to\,$ "),
    ("volumetricLoading-abs", r"Volumetric loading, absolute, in $\si{\cubic\meter\per\kilogram}$ $\,\to\,$ "),
    ("volumetricLoading-rel", r"Volumetric loading, relative, in \% $\,\to\,$ "),
];

const ABSORPTION_UNCERTAINTY: [(&str, &str); 6] = [
    ("pressure-abs", r"Pressure, absolute, in $\si{\pascal}$ $\,\to\,$ "),
    ("pressure-rel", r"Pressure, relative, in \% $\,\to\,$ "),
    ("temperature-abs", r"Temperature, absolute, in $\si{\kelvin}$ $\,\to\,$ "),
    ("temperature-rel", r"Temperature, relative, in \% $\,\to\,$ "),
    (
        "loading-abs",
        r"Concentration / Molar fraction, absolute, in $\si{\kilogram\per\kilogram}$ / $\si{\mole\per\mole}$ $\,\to\,$ ",
    ),
    ("loading-rel", r"Concentration / Molar fraction, relative, in \% $\,\to\,$ "),
];

fn uncertainty(kind: EntryKind, set: &ExperimentalSet) -> String {
    let mut items = Vec::new();
    if !set.uncertainty.data_source.is_empty() {
        items.push(format!(
            "\\item Data source $\\,\\to\\,$ Data was taken from {}\n",
            set.uncertainty.data_source
        ));
    }
    let labels: &[(&str, &str)] = match kind {
        EntryKind::Absorption => &ABSORPTION_UNCERTAINTY,
        _ => &ADSORPTION_UNCERTAINTY,
    };
    for (key, label) in labels {
        if let Some(value) = set.uncertainty.values.get(*key).and_then(|v| v.value()) {
            items.push(format!("\\item {}{}\n", label, value));
        }
    }
    if items.is_empty() {
        return String::new();
    }
    format!(
        "The uncertainity of the experimental data is:\n\\begin{{itemize}}\n{}\\end{{itemize}}\n\n",
        items.concat()
    )
}

/// Section shown when an equation has no drawable experimental data.
pub fn no_data_section() -> String {
    format!(
        "{}\n\\newline\nNo experimental data exists. Thus, isotherm is not visualized!\n%\n{}",
        START, END
    )
}

/// Section with the comparison figure, the refrigerant functions used, the
/// uncertainty of the data and the resulting MAPE.
pub fn comparison_section(
    kind: EntryKind,
    equation: &EquationSet,
    set: &ExperimentalSet,
    comparison: &Comparison,
    functions: &RefrigerantFunctions,
) -> String {
    let mut out = format!("{}\n{}%\n\n", START, comparison.figure.to_tikz());
    out.push_str("To generate the figure, the following refrigerant functions were selected:\n");
    out.push_str("\\begin{itemize}\n");
    let _ = writeln!(
        out,
        "\\item Vapor pressure: {} - ID {}",
        latex::escape_underscore(&functions.vapor_pressure.name),
        functions.vapor_pressure.id
    );
    let _ = writeln!(
        out,
        "\\item Saturated liquid density: {} - ID {}",
        latex::escape_underscore(&functions.liquid_density.name),
        functions.liquid_density.id
    );
    if !equation.comment.is_empty() {
        out.push_str("\\item Special refrigerant functions as described by comment\n");
    }
    out.push_str("\\end{itemize}\n\n");
    out.push_str(&uncertainty(kind, set));
    let _ = write!(
        out,
        "The mean absolute percentage error (MAPE) between the experimental and calculated data \
         results in {}\\%.",
        latex::number(comparison.mape)
    );
    out.push_str(END);
    out
}

/// Temperatures at which a refrigerant function is drawn: whole kelvins
/// from the lower validity bound up to, but excluding, the upper one.
fn temperature_grid(set: &EquationSet) -> Option<Vec<f64>> {
    let max = set.validity("temperature-max").value()?;
    let min = set
        .validity("temperature-min")
        .value()
        .filter(|&v| v > 0.0)
        .unwrap_or(0.75 * max);
    let (from, to) = (min.ceil() as i64, max.floor() as i64);
    Some((from..to).map(|t| t as f64).collect())
}

/// Figure of vapour pressure in bar, or of saturated liquid density for
/// density families, over the validity range of `set`.
pub fn refrigerant_figure<E: SorptionEngine>(
    family: &str,
    set: &EquationSet,
    pair: &WorkingPair<E>,
) -> Result<Option<Figure>, BindingError> {
    let Some(grid) = temperature_grid(set) else {
        return Ok(None);
    };
    let density = family.starts_with("SaturatedLiquidDensity");
    let mut figure = Figure::new(TEMPERATURE, if density { LIQUID_DENSITY } else { PRESSURE_BAR });
    let mut points = Vec::with_capacity(grid.len());
    for t in grid {
        let value = if density {
            pair.refrigerant().rho_l_T(t)?.value()
        } else {
            pair.refrigerant().p_sat_T(t)?.value().map(|p| p / 1e5)
        };
        if let Some(value) = value {
            points.push((t, value));
        }
    }
    figure.series.push(Series {
        legend: None,
        style: Style::Line,
        points,
    });
    Ok(Some(figure))
}

pub fn refrigerant_section(figure: &Figure) -> String {
    format!("{}\n{}%\n{}", START, figure.to_tikz(), END)
}

/// Section shown for a refrigerant function without an upper temperature bound.
pub fn no_range_section() -> String {
    format!(
        "{}\n\\newline\nNo validity range is given. Thus, data cannot be visualized!\n%\n{}",
        START, END
    )
}

/// Section shown for a refrigerant function no working pair can evaluate.
pub fn no_pair_section(refrigerant: &str) -> String {
    format!(
        "{}\n\\newline\nNo adsorption or absorption working pair exists, which uses refrigerant \
         '{}'. Thus, data cannot be visualized!\n%\n{}",
        START, refrigerant, END
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::{Measurement, Numeric, Uncertainty};
    use crate::engine::mock::MockEngine;
    use crate::engine::{Approach, Operation, WorkingPairSpec};
    use approx::assert_relative_eq;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// w = 1e-6 p / T, p = 1e6 w T, W = 1 / A.
    struct Linear;

    #[allow(non_snake_case)]
    impl EquilibriumModel for Linear {
        fn loading(&self, p: f64, T: f64) -> Result<Outcome, BindingError> {
            Ok(Outcome::Defined(1e-6 * p / T))
        }
        fn pressure(&self, w: f64, T: f64) -> Result<Outcome, BindingError> {
            Ok(Outcome::Defined(1e6 * w * T))
        }
        fn characteristic(&self, A: f64) -> Result<Outcome, BindingError> {
            if A > 5000.0 {
                Ok(Outcome::Undefined)
            } else {
                Ok(Outcome::Defined(1.0 / A))
            }
        }
    }

    fn experiment(kind: &str, data: &[(&str, Vec<f64>)]) -> ExperimentalSet {
        ExperimentalSet {
            citation: "Doe (2020). DOI: 10.1/x.".to_string(),
            comment: String::new(),
            properties: None,
            measurement: Measurement {
                procedure: "volumetric".to_string(),
                kind: kind.to_string(),
            },
            uncertainty: Uncertainty {
                data_source: "Table 2".to_string(),
                values: BTreeMap::from([
                    ("pressure-abs".to_string(), Numeric::Value(100.0)),
                    ("temperature-abs".to_string(), Numeric::Absent),
                    ("loading-rel".to_string(), Numeric::Value(2.5)),
                ]),
            },
            data: data
                .iter()
                .map(|(name, values)| (name.to_string(), values.clone()))
                .collect(),
        }
    }

    fn equation(comment: &str) -> EquationSet {
        EquationSet {
            citation: "Doe (2020). DOI: 10.1/x.".to_string(),
            comment: comment.to_string(),
            equation: "Langmuir".to_string(),
            properties: None,
            validity: BTreeMap::new(),
            errors: None,
            coefficients: IndexMap::new(),
        }
    }

    #[test]
    fn grouping_follows_kind_and_measurement() {
        use EntryKind::*;
        assert_eq!(Grouping::for_measurement(Adsorption, "isobars"), Some(Grouping::Isobars));
        assert_eq!(Grouping::for_measurement(Adsorption, "potentials"), Some(Grouping::Characteristic));
        assert_eq!(
            Grouping::for_measurement(Absorption, "isotherms_p"),
            Some(Grouping::IsothermsPressure)
        );
        assert_eq!(Grouping::for_measurement(Absorption, "isobars"), None);
        assert_eq!(Grouping::for_measurement(Refrigerant, "isotherms"), None);
    }

    #[test]
    fn isotherms_are_grouped_by_temperature() {
        let set = experiment(
            "isotherms",
            &[
                ("pressures", vec![2000.0, 1000.0, 1000.0]),
                ("temperatures", vec![300.0, 300.0, 350.0]),
                ("loadings", vec![2000.0e-6 / 300.0, 1000.0e-6 / 300.0, 1.1 * 1000.0e-6 / 350.0]),
            ],
        );
        let comparison = compare(EntryKind::Adsorption, Grouping::Isotherms, &set, &Linear)
            .unwrap()
            .unwrap();

        let legends: Vec<_> = comparison
            .figure
            .series
            .iter()
            .filter_map(|s| s.legend.as_deref())
            .collect();
        assert_eq!(legends, ["Exp.: 300.0 K", "Calc.: 300.0 K", "Exp.: 350.0 K", "Calc.: 350.0 K"]);

        let line = &comparison.figure.series[1];
        assert_eq!(line.points[0].0, 1.0);
        assert_eq!(line.points[1].0, 2.0);

        // one of three points is off by 1/1.1
        assert_relative_eq!(comparison.mape, round2((1.0 - 1.0 / 1.1) / 3.0 * 100.0));
        let (x_min, x_max) = comparison.figure.x_range.unwrap();
        assert_relative_eq!(x_min, 0.9);
        assert_relative_eq!(x_max, 2.2);
        assert_eq!(comparison.figure.y_label, LOADING);
    }

    #[test]
    fn isosteres_use_inverse_temperature_and_log_scale() {
        let set = experiment(
            "isosteres",
            &[
                ("pressures", vec![3000.0, 6000.0]),
                ("temperatures", vec![300.0, 300.0]),
                ("loadings", vec![0.01, 0.02]),
            ],
        );
        let comparison = compare(EntryKind::Adsorption, Grouping::Isosteres, &set, &Linear)
            .unwrap()
            .unwrap();
        assert!(comparison.figure.log_y);
        assert_eq!(comparison.mape, 0.0);
        assert_eq!(comparison.figure.series[0].legend.as_deref(), Some("Exp.: 1.0 \\%"));
        let (x_min, x_max) = comparison.figure.x_range.unwrap();
        assert!(x_min < x_max && x_max < 0.0);
        assert!(comparison.figure.to_tikz().contains("ymode=log"));
    }

    #[test]
    fn undefined_evaluations_are_left_out_of_the_error() {
        let set = experiment(
            "potentials",
            &[
                ("adsorptionPotentials", vec![1000.0, 10000.0]),
                ("volumetricLoadings", vec![1.0e-3, 5.0]),
            ],
        );
        let comparison = compare(EntryKind::Adsorption, Grouping::Characteristic, &set, &Linear)
            .unwrap()
            .unwrap();
        assert_eq!(comparison.mape, 0.0);
        assert_eq!(comparison.figure.series[1].points.len(), 1);
        assert_eq!(comparison.figure.series[0].legend.as_deref(), Some("Experiment"));
    }

    #[test]
    fn empty_data_cannot_be_compared() {
        let set = experiment("isotherms", &[("pressures", vec![]), ("temperatures", vec![])]);
        assert!(
            compare(EntryKind::Adsorption, Grouping::Isotherms, &set, &Linear)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn comparison_section_lists_functions_uncertainty_and_error() {
        let set = experiment(
            "isobars",
            &[
                ("pressures", vec![1000.0]),
                ("temperatures", vec![300.0]),
                ("loadings", vec![1000.0e-6 / 300.0]),
            ],
        );
        let comparison = compare(EntryKind::Adsorption, Grouping::Isobars, &set, &Linear)
            .unwrap()
            .unwrap();
        let functions = RefrigerantFunctions {
            vapor_pressure: Approach::new("VaporPressure_EoS1"),
            liquid_density: Approach::new("SaturatedLiquidDensity_EoS1"),
        };
        let text = comparison_section(
            EntryKind::Adsorption,
            &equation("uses special density"),
            &set,
            &comparison,
            &functions,
        );

        assert!(text.starts_with("\\textbf{Visualization:}\n%\n\\begin{figure}[!htp]"));
        assert!(text.contains("\\item Vapor pressure: VaporPressure\\_EoS1 - ID 1\n"));
        assert!(text.contains("\\item Special refrigerant functions as described by comment\n"));
        assert!(text.contains("Data was taken from Table 2\n"));
        assert!(text.contains(r"\item Pressure, absolute, in $\si{\pascal}$ $\,\to\,$ 100"));
        assert!(!text.contains("Temperature, absolute"));
        assert!(text.contains("results in 0.0\\%."));
        assert!(text.ends_with("\n\\FloatBarrier\n\\newpage\n"));
    }

    #[test]
    fn absorption_uncertainty_speaks_of_concentration() {
        let set = experiment("isotherms", &[]);
        let text = uncertainty(EntryKind::Absorption, &set);
        assert!(text.contains("Concentration / Molar fraction, relative, in \\% $\\,\\to\\,$ 2.5"));
    }

    #[test]
    fn refrigerant_figure_spans_whole_kelvins_of_validity() {
        let engine = MockEngine::new().with_function(Operation::RefPsatT, |args| args[0] * 1e3);
        let spec = WorkingPairSpec::new("zeolite", "5a", "water", Approach::new("Toth"));
        let pair = WorkingPair::new(Arc::new(engine), "db.json", spec).unwrap();

        let mut set = equation("");
        set.validity = BTreeMap::from([
            ("temperature-min".to_string(), Numeric::Value(273.4)),
            ("temperature-max".to_string(), Numeric::Value(280.0)),
        ]);
        let figure = refrigerant_figure("VaporPressure_EoS1", &set, &pair)
            .unwrap()
            .unwrap();
        let points = &figure.series[0].points;
        assert_eq!(points.first(), Some(&(274.0, 2.74)));
        assert_eq!(points.len(), 6);
        assert_eq!(figure.y_label, PRESSURE_BAR);

        set.validity
            .insert("temperature-min".to_string(), Numeric::Value(0.0));
        let figure = refrigerant_figure("SaturatedLiquidDensity_EoS1", &set, &pair)
            .unwrap()
            .unwrap();
        assert_eq!(figure.series[0].points[0].0, 210.0);
        assert_eq!(figure.y_label, LIQUID_DENSITY);
    }

    #[test]
    fn section_texts_frame_their_content() {
        assert!(no_data_section().contains("No experimental data exists. Thus, isotherm is not visualized!\n%\n"));
        assert!(no_pair_section("R-134a").contains("uses refrigerant 'R-134a'. Thus"));
    }
}
