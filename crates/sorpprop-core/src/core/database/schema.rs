//! Column vocabularies of the source tables.
//!
//! Each ordered map goes from a CSV column name to the key written into the
//! JSON database. Columns not named by any vocabulary of a table type form
//! the variable-width tail: coefficients for equation tables, measurement
//! series for experimental tables.

use super::model::EntryKind;
use phf::{OrderedMap, phf_ordered_map};

pub const SORBENT: &str = "sorbent";
pub const REFRIGERANT: &str = "refrigerant";
pub const SUBTYPE: &str = "sorbent-subtype";
pub const TYPE: &str = "type";

pub const IDENTIFICATION: [&str; 4] = [SORBENT, REFRIGERANT, SUBTYPE, TYPE];

pub const LITERATURE: &str = "literature";
pub const COMMENT: &str = "comment";

pub const UNCERTAINTY_SOURCE: &str = "uncertainty-data-source";

pub static SORBENT_PROPERTIES: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "prop-diameter-crystal" => "diameter-crystal",
    "prop-diameter-pore" => "diameter-pore",
    "prop-diameter-pellet" => "diameter-pellet",
    "prop-diameter-extrudate" => "diameter-extrudate",
    "prop-length-extrudate" => "length-extrudate",
    "prop-area-surface" => "area-surface",
    "prop-volume-pore" => "volume-pore",
    "props-porosity-pellet" => "porosity-pellet",
    "props-density-bulk" => "density-bulk",
    "props-density-pellet" => "density-pellet",
    "props-density-solid" => "density-solid",
};

pub static TEMPERATURE_VALIDITY: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "validity-temperature-min" => "temperature-min",
    "validity-temperature-max" => "temperature-max",
};

pub static ADSORPTION_VALIDITY: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "validity-pressure-min" => "pressure-min",
    "validity-pressure-max" => "pressure-max",
    "validity-temperature-min" => "temperature-min",
    "validity-temperature-max" => "temperature-max",
    "validity-loading-min" => "loading-min",
    "validity-loading-max" => "loading-max",
};

pub static FIT_ERRORS: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "error-are" => "are",
    "error-rmse" => "rmse",
};

pub static MEASUREMENT: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "measurements-procedure" => "procedure",
    "measurements-type" => "type",
};

pub static ADSORPTION_UNCERTAINTY: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "uncertainty-pressure-abs" => "pressure-abs",
    "uncertainty-pressure-rel" => "pressure-rel",
    "uncertainty-temperature-abs" => "temperature-abs",
    "uncertainty-temperature-rel" => "temperature-rel",
    "uncertainty-loading-abs" => "loading-abs",
    "uncertainty-loading-rel" => "loading-rel",
    "uncertainty-adsorptionPotential-abs" => "adsorptionPotential-abs",
    "uncertainty-adsorptionPotential-rel" => "adsorptionPotential-rel",
    "uncertainty-volumetricLoading-abs" => "volumetricLoading-abs",
    "uncertainty-volumetricLoading-rel" => "volumetricLoading-rel",
};

pub static ABSORPTION_UNCERTAINTY: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "uncertainty-pressure-abs" => "pressure-abs",
    "uncertainty-pressure-rel" => "pressure-rel",
    "uncertainty-temperature-abs" => "temperature-abs",
    "uncertainty-temperature-rel" => "temperature-rel",
    "uncertainty-loading-abs" => "loading-abs",
    "uncertainty-loading-rel" => "loading-rel",
};

/// Vocabularies of an equation table, by entry kind.
pub struct EquationColumns {
    pub properties: Option<&'static OrderedMap<&'static str, &'static str>>,
    pub validity: &'static OrderedMap<&'static str, &'static str>,
    pub errors: Option<&'static OrderedMap<&'static str, &'static str>>,
}

impl EquationColumns {
    pub fn for_kind(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Adsorption => Self {
                properties: Some(&SORBENT_PROPERTIES),
                validity: &ADSORPTION_VALIDITY,
                errors: Some(&FIT_ERRORS),
            },
            EntryKind::Refrigerant | EntryKind::Absorption => Self {
                properties: None,
                validity: &TEMPERATURE_VALIDITY,
                errors: None,
            },
        }
    }

    /// Whether `column` belongs to a fixed vocabulary rather than the
    /// coefficient tail.
    pub fn is_reserved(&self, column: &str) -> bool {
        IDENTIFICATION.contains(&column)
            || column == LITERATURE
            || column == COMMENT
            || self.validity.contains_key(column)
            || self.properties.is_some_and(|m| m.contains_key(column))
            || self.errors.is_some_and(|m| m.contains_key(column))
    }
}

/// Vocabularies of an experimental table, by entry kind.
pub struct ExperimentColumns {
    pub properties: Option<&'static OrderedMap<&'static str, &'static str>>,
    pub uncertainty: &'static OrderedMap<&'static str, &'static str>,
}

impl ExperimentColumns {
    /// `None` for kinds that carry no experimental layout.
    pub fn for_kind(kind: EntryKind) -> Option<Self> {
        match kind {
            EntryKind::Adsorption => Some(Self {
                properties: Some(&SORBENT_PROPERTIES),
                uncertainty: &ADSORPTION_UNCERTAINTY,
            }),
            EntryKind::Absorption => Some(Self {
                properties: None,
                uncertainty: &ABSORPTION_UNCERTAINTY,
            }),
            EntryKind::Refrigerant => None,
        }
    }

    pub fn is_reserved(&self, column: &str) -> bool {
        IDENTIFICATION.contains(&column)
            || column == LITERATURE
            || column == COMMENT
            || column == UNCERTAINTY_SOURCE
            || MEASUREMENT.contains_key(column)
            || self.uncertainty.contains_key(column)
            || self.properties.is_some_and(|m| m.contains_key(column))
    }
}
