use super::numeric::Numeric;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kind of a database entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "refrig")]
    Refrigerant,
    #[serde(rename = "ads")]
    Adsorption,
    #[serde(rename = "abs")]
    Absorption,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [
        EntryKind::Refrigerant,
        EntryKind::Adsorption,
        EntryKind::Absorption,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Refrigerant => "refrig",
            EntryKind::Adsorption => "ads",
            EntryKind::Absorption => "abs",
        }
    }

    /// Directory name used for this kind in generated documentation.
    pub fn chapter(self) -> &'static str {
        match self {
            EntryKind::Refrigerant => "ref",
            EntryKind::Adsorption => "ads",
            EntryKind::Absorption => "abs",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refrig" => Ok(EntryKind::Refrigerant),
            "ads" => Ok(EntryKind::Adsorption),
            "abs" => Ok(EntryKind::Absorption),
            other => Err(other.to_string()),
        }
    }
}

/// Identity of an entry. Unique across a database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey {
    #[serde(rename = "_as_")]
    pub sorbent: String,
    #[serde(rename = "_rf_")]
    pub refrigerant: String,
    #[serde(rename = "_st_")]
    pub subtype: String,
    #[serde(rename = "_tp_")]
    pub kind: EntryKind,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} ({})",
            self.sorbent, self.subtype, self.refrigerant, self.kind
        )
    }
}

/// One fitted parameter set of an equation family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationSet {
    #[serde(rename = "_c_")]
    pub citation: String,
    #[serde(rename = "_n_")]
    pub comment: String,
    #[serde(rename = "_e_")]
    pub equation: String,
    #[serde(rename = "_pr_", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(rename = "_va_")]
    pub validity: BTreeMap<String, Numeric>,
    #[serde(rename = "_er_", default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Numeric>>,
    /// Coefficients in the column order of their source table.
    #[serde(rename = "_p_")]
    pub coefficients: IndexMap<String, f64>,
}

impl EquationSet {
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.coefficients.get(name).copied()
    }

    pub fn validity(&self, name: &str) -> Numeric {
        self.validity.get(name).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub procedure: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uncertainty {
    #[serde(rename = "data-source")]
    pub data_source: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, Numeric>,
}

/// One published series of measured equilibrium points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalSet {
    #[serde(rename = "_c_")]
    pub citation: String,
    #[serde(rename = "_n_")]
    pub comment: String,
    #[serde(rename = "_pr_", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(rename = "_m_")]
    pub measurement: Measurement,
    #[serde(rename = "_u_")]
    pub uncertainty: Uncertainty,
    #[serde(rename = "_d_")]
    pub data: BTreeMap<String, Vec<f64>>,
}

impl ExperimentalSet {
    /// Measured values of one quantity, empty when the set does not carry it.
    pub fn series(&self, name: &str) -> &[f64] {
        self.data.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryValue {
    #[serde(rename = "_ep_")]
    pub equations: BTreeMap<String, Vec<EquationSet>>,
    #[serde(rename = "_ed_")]
    pub experiments: Vec<ExperimentalSet>,
    #[serde(rename = "_r_")]
    pub refrigerant: String,
    #[serde(rename = "_s_")]
    pub sorbent: String,
    #[serde(rename = "_t_")]
    pub subtype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "k")]
    pub key: EntryKey,
    #[serde(rename = "v")]
    pub value: EntryValue,
}

impl Entry {
    pub fn new(key: EntryKey) -> Self {
        let value = EntryValue {
            equations: BTreeMap::new(),
            experiments: Vec::new(),
            refrigerant: key.refrigerant.clone(),
            sorbent: key.sorbent.clone(),
            subtype: key.subtype.clone(),
        };
        Self { key, value }
    }

    pub fn kind(&self) -> EntryKind {
        self.key.kind
    }

    pub fn equation(&self, family: &str, index: usize) -> Option<&EquationSet> {
        self.value.equations.get(family)?.get(index)
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.value
            .equations
            .get(family)
            .is_some_and(|sets| !sets.is_empty())
    }

    /// The first experimental set published under `citation`.
    pub fn experiment_for(&self, citation: &str) -> Option<&ExperimentalSet> {
        self.value
            .experiments
            .iter()
            .find(|set| set.citation == citation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EntryKey {
        EntryKey {
            sorbent: "zeolite".to_string(),
            refrigerant: "water".to_string(),
            subtype: "5a".to_string(),
            kind: EntryKind::Adsorption,
        }
    }

    #[test]
    fn key_serializes_with_short_field_names() {
        let json = serde_json::to_string(&key()).unwrap();
        assert_eq!(
            json,
            r#"{"_as_":"zeolite","_rf_":"water","_st_":"5a","_tp_":"ads"}"#
        );
    }

    #[test]
    fn new_entry_echoes_key_names() {
        let entry = Entry::new(key());
        assert_eq!(entry.value.sorbent, "zeolite");
        assert_eq!(entry.value.refrigerant, "water");
        assert_eq!(entry.value.subtype, "5a");
        assert!(entry.value.equations.is_empty());
    }

    #[test]
    fn uncertainty_flattens_numeric_fields() {
        let json = r#"{"data-source":"paper","pressure-abs":100.0,"pressure-rel":""}"#;
        let uncertainty: Uncertainty = serde_json::from_str(json).unwrap();
        assert_eq!(uncertainty.data_source, "paper");
        assert_eq!(
            uncertainty.values.get("pressure-abs"),
            Some(&Numeric::Value(100.0))
        );
        assert_eq!(uncertainty.values.get("pressure-rel"), Some(&Numeric::Absent));
    }

    #[test]
    fn entry_kind_parses_tags() {
        assert_eq!("ads".parse::<EntryKind>(), Ok(EntryKind::Adsorption));
        assert_eq!("refrig".parse::<EntryKind>(), Ok(EntryKind::Refrigerant));
        assert!("gas".parse::<EntryKind>().is_err());
    }
}
