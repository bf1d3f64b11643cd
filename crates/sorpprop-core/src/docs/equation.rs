//! Equation statements and coefficient tables.
//!
//! Each known equation family has a [`Template`]: one sentence naming the
//! inputs and outputs, the LaTeX statement of the equation, and its
//! coefficients in display order. Coefficient tables have two columns; the
//! first half of the parameter list fills the left column.

use super::latex::{escape, escape_underscore, scientific};
use crate::core::database::{EntryKind, EquationSet};
use phf::phf_map;
use std::fmt::Write;
use tracing::warn;

const HEADING: &str = "\\textbf{Equation and parameters:}\n\\newline\n%\n";

const TABLE_START: &str = "%\nThe parameters of the equation are:\n%\n\
\\begin{longtable}[l]{lll|lll}\n\\toprule\n\\addlinespace\n\
\\textbf{Par.} & \\textbf{Unit} & \\textbf{Value} &\t\
\\textbf{Par.} & \\textbf{Unit} & \\textbf{Value} \\\\\n\
\\addlinespace\n\\midrule\n\\endhead\n\n\\bottomrule\n\\endfoot\n\
\\bottomrule\n\\endlastfoot\n\\addlinespace\n\n";

const TABLE_END: &str = "\n\\addlinespace\\end{longtable}\n\n";

const LIQUID_DENSITY: &str = "Saturated liquid density $\\rho_\\mathrm{sat}^\\mathrm{liq}$ in \
$\\si{\\kilogram\\per\\cubic\\meter}$ is calculated depending on temperature $T$ in \
$\\si{\\kelvin}$ by:";

const VAPOR_PRESSURE: &str = "Vapor pressure $p_\\mathrm{sat}$ in $\\si{\\pascal}$ is calculated \
depending on temperature $T$ in $\\si{\\kelvin}$ by:";

const SURFACE: &str = "Loading $w$ in $\\si{\\kilogram\\per\\kilogram}$ is calculated depending \
on pressure $p$ in $\\si{\\pascal}$ and temperature $T$ in $\\si{\\kelvin}$ by:";

const SURFACE_VAPOR: &str = "Loading $w$ in $\\si{\\kilogram\\per\\kilogram}$ is calculated \
depending on pressure $p$ in $\\si{\\pascal}$, temperature $T$ in $\\si{\\kelvin}$, and vapor \
pressure $p_\\mathrm{sat}$ in $\\si{\\pascal}$ by:";

const CONVENTIONAL: &str = "Pressure $p$ in $\\si{\\pascal}$ is calculated depending on \
concentration $X$ in $\\si{\\kilogram\\per\\kilogram}$ and temperature $T$ in $\\si{\\kelvin}$ by:";

const ACTIVITY: &str = "Pressure $p$ in $\\si{\\pascal}$ is calculated depending on molar \
fraction of refrigerant in the liquid phase $x_1$ in $\\si{\\mole\\per\\mole}$, temperature $T$ \
in $\\si{\\kelvin}$, molar volumes of both components ($v_1$ and $v_2$) in \
$\\si{\\cubic\\meter\\per\\mole}$, and vapor pressure $p_\\mathrm{sat,1}$ in $\\si{\\pascal}$. If \
molar volumes less than zero are used as function arguments, constant molar volumes given by \
the parameter record are used. Equilibrium equation is given by:";

#[derive(Debug, Clone, Copy)]
enum Unit {
    Fixed(&'static str),
    /// Depends on the sign of the `flag` coefficient.
    ByFlag {
        non_negative: &'static str,
        negative: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
struct Parameter {
    key: &'static str,
    symbol: &'static str,
    unit: Unit,
}

const fn p(key: &'static str, symbol: &'static str, unit: &'static str) -> Parameter {
    Parameter {
        key,
        symbol,
        unit: Unit::Fixed(unit),
    }
}

#[derive(Debug)]
pub struct Template {
    intro: &'static str,
    statement: &'static str,
    parameters: &'static [Parameter],
}

const KELVIN: &str = "$\\si{\\kelvin}$";
const PASCAL: &str = "$\\si{\\pascal}$";
const PER_PASCAL: &str = "$\\si{\\per\\pascal}$";
const J_PER_MOL: &str = "$\\si{\\joule\\per\\mole}$";
const KG_PER_KG: &str = "$\\si{\\kilogram\\per\\kilogram}$";
const M3_PER_KG: &str = "$\\si{\\cubic\\meter\\per\\kilogram}$";
const M3_PER_MOL: &str = "$\\si{\\cubic\\meter\\per\\mole}$";
const KG_PER_M3: &str = "$\\si{\\kilogram\\per\\cubic\\meter}$";
const NONE: &str = "-";

static TEMPLATES: phf::Map<&'static str, Template> = phf_map! {
    "SaturatedLiquidDensity_EoS1" => Template {
        intro: LIQUID_DENSITY,
        statement: r"\begin{split}
\rho_\mathrm{sat}^\mathrm{liq} &=& \begin{cases} \rho_\mathrm{ref} \exp(\Omega) & \quad \text{if flag } < 0 \\ \rho_\mathrm{ref} \Omega & \quad \text{else} \end{cases} & \quad\text{, with} \\
\Omega &=& \sum_{i=1}^{8} a_i \xi^{b_i} & \quad\text{, and} \\
\xi &=& 1 - \theta & \quad\text{, and} \\
\theta &=& \nicefrac{T}{T_\mathrm{crit}} & \quad\text{.}
\end{split}
",
        parameters: &[
            p("flag", "flag", NONE),
            p("T_crit", "$T_\\mathrm{crit}$", KELVIN),
            p("rho_crit", "$\\rho_\\mathrm{ref}$", KG_PER_M3),
            p("fac1", "$a_1$", NONE),
            p("exp1", "$b_1$", NONE),
            p("fac2", "$a_2$", NONE),
            p("exp2", "$b_2$", NONE),
            p("fac3", "$a_3$", NONE),
            p("exp3", "$b_3$", NONE),
            p("fac4", "$a_4$", NONE),
            p("exp4", "$b_4$", NONE),
            p("fac5", "$a_5$", NONE),
            p("exp5", "$b_5$", NONE),
            p("fac6", "$a_6$", NONE),
            p("exp6", "$b_6$", NONE),
            p("fac7", "$a_7$", NONE),
            p("exp7", "$b_7$", NONE),
            p("fac8", "$a_8$", NONE),
            p("exp8", "$b_8$", NONE),
        ],
    },
    "VaporPressure_EoS1" => Template {
        intro: VAPOR_PRESSURE,
        statement: r"\begin{split}
p_\mathrm{sat} &=& p_\mathrm{crit} \exp \left( \nicefrac{1}{\theta} \sum_{i=1}^{7} a_i \xi^{b_i} \right) & \quad\text{, and} \\
\xi &=& 1 - \theta & \quad\text{, and} \\
\theta &=& \nicefrac{T}{T_\mathrm{crit}} & \quad\text{.}
\end{split}
",
        parameters: &[
            p("T_crit", "$T_\\mathrm{crit}$", KELVIN),
            p("p_crit", "$p_\\mathrm{crit}$", PASCAL),
            p("fac1", "$a_1$", NONE),
            p("exp1", "$b_1$", NONE),
            p("fac2", "$a_2$", NONE),
            p("exp2", "$b_2$", NONE),
            p("fac3", "$a_3$", NONE),
            p("exp3", "$b_3$", NONE),
            p("fac4", "$a_4$", NONE),
            p("exp4", "$b_4$", NONE),
            p("fac5", "$a_5$", NONE),
            p("exp5", "$b_5$", NONE),
            p("fac6", "$a_6$", NONE),
            p("exp6", "$b_6$", NONE),
            p("fac7", "$a_7$", NONE),
            p("exp7", "$b_7$", NONE),
        ],
    },
    "VaporPressure_Antoine" => Template {
        intro: VAPOR_PRESSURE,
        statement: r"\nicefrac{p_\mathrm{sat}}{100000} = 10^{a - \nicefrac{b}{T + c}}
",
        parameters: &[
            p("a", "$a$", NONE),
            p("b", "$b$", KELVIN),
            p("c", "$c$", KELVIN),
        ],
    },
    "Langmuir" => Template {
        intro: SURFACE,
        statement: r"\begin{split}
w &=& \frac{w_\mathrm{sat} K p}{1 + K p} & \quad\text{, and} \\
K &=& K_0 \exp \left( \frac{\Delta H}{R T} \right) & \quad\text{.}
\end{split}
",
        parameters: &[
            p("delta_H", "$\\Delta H$", J_PER_MOL),
            p("K0", "$K_0$", PER_PASCAL),
            p("w_s", "$w_\\mathrm{sat}$", KG_PER_KG),
        ],
    },
    "Toth" => Template {
        intro: SURFACE,
        statement: r"\begin{split}
w &=& \frac{w_\mathrm{sat} b^{m} p}{\left( 1 + b^{r} p^{n} \right)^{\nicefrac{1}{n}}} & \quad\text{, and} \\
b &=& b_0 \exp\left( \frac{Q^{*}}{T} \right) & \quad\text{, and} \\
n &=& n_0 + \nicefrac{c}{T} & \quad\text{, and} \\
r &=& \begin{cases} n & \quad \text{if } r^{*} < 0 \\ r^{*}  & \quad \text{else} \end{cases} & \quad\text{.}
\end{split}
",
        parameters: &[
            p("bo", "$b_0$", PER_PASCAL),
            p("c", "$c$", KELVIN),
            p("m", "$m$", NONE),
            p("n0", "$n_0$", NONE),
            p("q_star_R", "$Q^{*}$", KELVIN),
            p("r", "$r^{*}$", NONE),
            p("w_s", "$w_\\mathrm{sat}$", KG_PER_KG),
        ],
    },
    "DualSiteSips" => Template {
        intro: SURFACE,
        statement: r"\begin{split}
w &=& \sum_{i=A}^{B} w_\mathrm{i} \frac{\left( b_i p \right) ^ {\nicefrac{1}{\eta_i}} }{1 + \left( b_i p \right) ^ {\nicefrac{1}{\eta_i}}} & \quad\text{, and} \\
b_i &=& b_{i,0} \exp \left( \frac{Q_i}{R T} \left( 1 - \frac{T}{T_0} \right) \right) & \quad\text{.}
\end{split}
",
        parameters: &[
            p("b_A_0", "$b_\\mathrm{A,0}$", PER_PASCAL),
            p("Q_A_st", "$Q_\\mathrm{A}$", J_PER_MOL),
            p("eta_A", "$\\eta_\\mathrm{A}$", NONE),
            p("w_A", "$w_\\mathrm{A}$", KG_PER_KG),
            p("T_0", "$T_0$", KELVIN),
            p("b_B_0", "$b_\\mathrm{B,0}$", PER_PASCAL),
            p("Q_B_st", "$Q_\\mathrm{B}$", J_PER_MOL),
            p("eta_B", "$\\eta_\\mathrm{B}$", NONE),
            p("w_B", "$w_\\mathrm{B}$", KG_PER_KG),
        ],
    },
    "Freundlich" => Template {
        intro: SURFACE_VAPOR,
        statement: r"\begin{split}
w &=& A \left( \nicefrac{p}{p_\mathrm{sat}} \right) ^{B} & \quad\text{, and} \\
A &=& A_0 + A_1 T + A_2 T^2 + A_3 T^3 & \quad\text{, and} \\
B &=& B_0 + B_1 T + B_2 T^2 + B_3 T^3 & \quad\text{.} \\
\end{split}
",
        parameters: &[
            p("A0", "$A_0$", KG_PER_KG),
            p("A1", "$A_1$", "$\\si{\\kilogram\\per\\kilogram\\per\\kelvin}$"),
            p("A2", "$A_2$", "$\\si{\\kilogram\\per\\kilogram\\per\\square\\kelvin}$"),
            p("A3", "$A_3$", "$\\si{\\kilogram\\per\\kilogram\\per\\cubic\\kelvin}$"),
            p("B0", "$B_0$", NONE),
            p("B1", "$B_1$", "$\\si{\\per\\kelvin}$"),
            p("B2", "$B_2$", "$\\si{\\per\\square\\kelvin}$"),
            p("B3", "$B_3$", "$\\si{\\per\\cubic\\kelvin}$"),
        ],
    },
    "DubininAstakhov" => Template {
        intro: SURFACE_VAPOR,
        statement: r"\begin{split}
w &=& \begin{cases} W \rho_\mathrm{sat}^{\mathrm{liq}} & \quad \text{if flag} \geq 0 \\ W & \quad \text{else} \end{cases} & \quad\text{, and} \\
W &=& W_0 \exp \left( - \left( \nicefrac{A}{E} \right) ^{n} \right) & \quad\text{, and} \\
A &=& R T \ln \left( \nicefrac{p_\mathrm{sat}}{p} \right) & \quad\text{.} \\
\end{split}
",
        parameters: &[
            p("flag", "flag", NONE),
            p("E", "$E$", J_PER_MOL),
            p("n", "$n$", NONE),
            Parameter {
                key: "W0",
                symbol: "$W_0$",
                unit: Unit::ByFlag {
                    non_negative: M3_PER_KG,
                    negative: KG_PER_KG,
                },
            },
        ],
    },
    "DubininArctan1" => Template {
        intro: SURFACE_VAPOR,
        statement: r"\begin{split}
w &=& W \rho_\mathrm{sat}^{\mathrm{liq}} & \quad\text{, and} \\
W &=& \frac{a}{\Pi} \left( \arctan \left( \frac{A - b}{c} \right) + \frac{\Pi}{2}\right) + d & \quad\text{, and} \\
A &=& R T \ln \left( \nicefrac{p_\mathrm{sat}}{p} \right) & \quad\text{.} \\
\end{split}
",
        parameters: &[
            p("a", "$a$", M3_PER_KG),
            p("b", "$b$", J_PER_MOL),
            p("c", "$c$", J_PER_MOL),
            p("d", "$d$", M3_PER_KG),
        ],
    },
    "Antoine" => Template {
        intro: CONVENTIONAL,
        statement: r"\nicefrac{p}{d} = 10 ^ { \sum_{i=0}^{4} \left( A_i + \frac{1000 B_i}{T - c} \right) \left( 100 X \right) ^{i}}
",
        parameters: &[
            p("c", "$c$", KELVIN),
            p("A0", "$A_0$", NONE),
            p("A1", "$A_1$", NONE),
            p("A2", "$A_2$", NONE),
            p("A3", "$A_3$", NONE),
            p("A4", "$A_4$", NONE),
            p("d", "$d$", PASCAL),
            p("B0", "$B_0$", KELVIN),
            p("B1", "$B_1$", KELVIN),
            p("B2", "$B_2$", KELVIN),
            p("B3", "$B_3$", KELVIN),
            p("B4", "$B_4$", KELVIN),
        ],
    },
    "Duehring" => Template {
        intro: CONVENTIONAL,
        statement: r"\begin{split}
p &=& \nicefrac{1}{r} 10 ^ { C + \frac{D}{T_\mathrm{ref}} + \frac{E}{T_\mathrm{ref}^{2}} } & \quad\text{, and} \\
T_\mathrm{ref} &=& q + \frac{\left( n T + m - B \right)}{A}  & \quad\text{, and} \\
A &=& \sum_{i=0}^{3} a_i X_\mathrm{cor} ^{i}  & \quad\text{, and} \\
B &=& \sum_{i=0}^{3} b_i X_\mathrm{cor} ^{i}  & \quad\text{, and} \\
X_\mathrm{cor} &=& 100 X  & \quad\text{.} \\
\end{split}
",
        parameters: &[
            p("a0", "$a_0$", NONE),
            p("a1", "$a_1$", NONE),
            p("a2", "$a_2$", NONE),
            p("a3", "$a_3$", NONE),
            p("C", "$C$", NONE),
            p("m", "$m$", NONE),
            p("n", "$n$", NONE),
            p("r", "$r$", PER_PASCAL),
            p("b0", "$b_0$", NONE),
            p("b1", "$b_1$", NONE),
            p("b2", "$b_2$", NONE),
            p("b3", "$b_3$", NONE),
            p("D", "$D$", KELVIN),
            p("E", "$E$", "$\\si{\\square\\kelvin}$"),
            p("q", "$q$", NONE),
        ],
    },
    "WilsonFixedDl" => Template {
        intro: ACTIVITY,
        statement: r"\begin{split}
p &=& \gamma_1 x_1 p_\mathrm{sat,1} & \quad\text{, and} \\
\gamma_1 &=& \exp \left( - \ln \left( x_1 + \Lambda_{12} x_2 \right) + x_2 \left( \frac{\Lambda_{12}}{x_1 + \Lambda_{12} x_2} - \frac{\Lambda_{21}}{x_2 + \Lambda_{21} x_1} \right) \right) & \quad\text{, and} \\
\Lambda_{12} &=& \begin{cases} \nicefrac{v_2}{v_1} \exp \left( - \nicefrac{\Delta\lambda_{12}}{R T} \right) & \quad \text{if } \Lambda_{12}^{*} = 0 \\ \Lambda_{12}^{*}  & \quad \text{else} \end{cases}  & \quad\text{, and} \\
\Lambda_{21} &=& \begin{cases} \nicefrac{v_1}{v_2} \exp \left( - \nicefrac{\Delta\lambda_{21}}{R T} \right) & \quad \text{if } \Lambda_{21}^{*} = 0 \\ \Lambda_{21}^{*}  & \quad \text{else} \end{cases}  & \quad\text{, and} \\
x_2 &=& 1 - x_1  & \quad\text{.} \\
\end{split}
",
        parameters: &[
            p("A_12", "$\\Lambda_{12}^{*}$", NONE),
            p("d_lambda_12", "$\\Delta\\lambda_{12}$", J_PER_MOL),
            p("v_1", "$v_1$", M3_PER_MOL),
            p("A_21", "$\\Lambda_{21}^{*}$", NONE),
            p("d_lambda_21", "$\\Delta\\lambda_{21}$", J_PER_MOL),
            p("v_2", "$v_2$", M3_PER_MOL),
        ],
    },
};

/// Looks up the template of an equation family.
pub fn template(family: &str) -> Option<&'static Template> {
    TEMPLATES.get(family)
}

/// Renders the equation statement and coefficient table of one equation set.
pub fn render(kind: EntryKind, family: &str, set: &EquationSet) -> String {
    let mut out = String::from(HEADING);
    let Some(template) = template(family) else {
        let subject = match kind {
            EntryKind::Refrigerant => "equation",
            EntryKind::Adsorption => "adsorption isotherm",
            EntryKind::Absorption => "absorption isotherm",
        };
        let _ = write!(
            out,
            "For {} '{}', formatted LaTeX string is not implemented in manual!\n\n",
            subject,
            escape_underscore(family)
        );
        if !set.coefficients.is_empty() {
            push_table(&mut out, &generic_cells(set));
        }
        return out;
    };

    out.push_str(template.intro);
    out.push_str("\n%\n\\begin{equation*}\n");
    out.push_str(template.statement);
    out.push_str("\\end{equation*}\n");

    let cells = template_cells(template, set).unwrap_or_else(|missing| {
        warn!(
            "Equation set '{}' lacks coefficient '{}'; listing its stored coefficients instead.",
            family, missing
        );
        generic_cells(set)
    });
    push_table(&mut out, &cells);
    out
}

type Cell = (String, &'static str, String);

fn template_cells(template: &Template, set: &EquationSet) -> Result<Vec<Cell>, &'static str> {
    let flag = set.coefficient("flag").unwrap_or(0.0);
    template
        .parameters
        .iter()
        .map(|param| {
            let value = set.coefficient(param.key).ok_or(param.key)?;
            let unit = match param.unit {
                Unit::Fixed(unit) => unit,
                Unit::ByFlag {
                    non_negative,
                    negative,
                } => {
                    if flag >= 0.0 {
                        non_negative
                    } else {
                        negative
                    }
                }
            };
            Ok((param.symbol.to_string(), unit, scientific(value)))
        })
        .collect()
}

fn generic_cells(set: &EquationSet) -> Vec<Cell> {
    set.coefficients
        .iter()
        .map(|(name, value)| (escape(name), NONE, scientific(*value)))
        .collect()
}

fn push_table(out: &mut String, cells: &[Cell]) {
    out.push_str(TABLE_START);
    let rows = cells.len().div_ceil(2);
    for row in 0..rows {
        let (symbol, unit, value) = &cells[row];
        let _ = write!(out, "{} & {} & {}", symbol, unit, value);
        match cells.get(row + rows) {
            Some((symbol, unit, value)) => {
                let _ = writeln!(out, " & {} & {} & {} \\\\", symbol, unit, value);
            }
            None => out.push_str(" & & & \\\\\n"),
        }
    }
    out.push_str(TABLE_END);
}
