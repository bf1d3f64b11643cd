use crate::core::database::EquationSet;
use std::fmt::Write;

const HEADING: &str = "\\textbf{Properties of sorbent:}\n\\newline\n%\n";

const TABLE_START: &str = "\\begin{longtable}[l]{lll}\n\\toprule\n\\addlinespace\n\
\\textbf{Property} & \\textbf{Unit} & \\textbf{Value} \\\\\n\\addlinespace\n\\midrule\n\
\\endhead\n\\bottomrule\n\\endfoot\n\\bottomrule\n\\endlastfoot\n\\addlinespace\n\n";

const TABLE_END: &str = "\n\\addlinespace\\end{longtable}\n\n";

/// Database key, label and unit of every sorbent property, in display order.
const PROPERTIES: [(&str, &str, &str); 11] = [
    ("diameter-crystal", "Diameter of crystal", "\\si{\\milli\\meter}"),
    ("diameter-pore", "Diameter of pore", "\\si{\\milli\\meter}"),
    ("diameter-pellet", "Diameter of pellet", "\\si{\\milli\\meter}"),
    ("diameter-extrudate", "Diameter of extrudate", "\\si{\\milli\\meter}"),
    ("length-extrudate", "Length of extrudate", "\\si{\\milli\\meter}"),
    ("area-surface", "Surface area", "\\si{\\square\\meter\\per\\gram}"),
    ("volume-pore", "Pore volume", "\\si{\\milli\\cubic\\meter\\per\\gram}"),
    ("porosity-pellet", "Porosity of pellet", "-"),
    ("density-bulk", "Bulk density", "\\si{\\kilogram\\per\\cubic\\meter}"),
    ("density-pellet", "Pellet density", "\\si{\\kilogram\\per\\cubic\\meter}"),
    ("density-solid", "Solid density", "\\si{\\kilogram\\per\\cubic\\meter}"),
];

/// Renders the sorbent property table of an adsorption equation set.
pub fn render(set: &EquationSet) -> String {
    let present: Vec<_> = PROPERTIES
        .iter()
        .filter_map(|(key, label, unit)| {
            set.properties
                .as_ref()
                .and_then(|props| props.get(*key))
                .filter(|value| !value.is_empty())
                .map(|value| (*label, *unit, value.as_str()))
        })
        .collect();

    let mut out = String::from(HEADING);
    if present.is_empty() {
        out.push_str("Property data of sorbent and subtype does not exist.\n\n");
        return out;
    }

    out.push_str(TABLE_START);
    for (label, unit, value) in present {
        let _ = writeln!(out, "{} & {} & {}\\\\", label, unit, value);
    }
    out.push_str(TABLE_END);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;

    fn set(properties: Option<BTreeMap<String, String>>) -> EquationSet {
        EquationSet {
            citation: String::new(),
            comment: String::new(),
            equation: "Toth".to_string(),
            properties,
            validity: BTreeMap::new(),
            errors: None,
            coefficients: IndexMap::new(),
        }
    }

    #[test]
    fn only_filled_properties_are_listed() {
        let props = BTreeMap::from([
            ("area-surface".to_string(), "650".to_string()),
            ("density-bulk".to_string(), String::new()),
            ("diameter-pellet".to_string(), "2.5".to_string()),
        ]);
        let text = render(&set(Some(props)));
        assert!(text.contains("\\begin{longtable}[l]{lll}"));
        let pellet = text.find("Diameter of pellet & \\si{\\milli\\meter} & 2.5\\\\").unwrap();
        let area = text.find("Surface area & ").unwrap();
        assert!(pellet < area);
        assert!(!text.contains("Bulk density"));
    }

    #[test]
    fn missing_properties_produce_a_sentence() {
        let empty = BTreeMap::from([("area-surface".to_string(), String::new())]);
        for properties in [None, Some(empty)] {
            let text = render(&set(properties));
            assert!(text.ends_with("Property data of sorbent and subtype does not exist.\n\n"));
            assert!(!text.contains("longtable"));
        }
    }
}
