use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one native evaluation.
///
/// The native library signals "not defined for this isotherm" by returning
/// exactly `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Defined(f64),
    Undefined,
}

impl Outcome {
    pub const UNDEFINED_SENTINEL: f64 = -1.0;

    pub fn from_native(value: f64) -> Self {
        if value == Self::UNDEFINED_SENTINEL {
            Outcome::Undefined
        } else {
            Outcome::Defined(value)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Outcome::Defined(v) => Some(v),
            Outcome::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Outcome::Defined(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Defined(v) => write!(f, "{}", v),
            Outcome::Undefined => f.write_str("undefined"),
        }
    }
}

/// The main value of a mixing-rule evaluation and the vapour mole fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixingValues<T> {
    pub value: T,
    pub y1: f64,
    pub y2: f64,
}

impl MixingValues<f64> {
    pub(crate) fn into_outcome(self) -> MixingValues<Outcome> {
        MixingValues {
            value: Outcome::from_native(self.value),
            y1: self.y1,
            y2: self.y2,
        }
    }
}

/// Molar volume input of the activity-coefficient family.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MolarVolume {
    /// Use the molar volume stored with the parameter set.
    #[default]
    Database,
    /// Molar volume in m³/mol.
    Given(f64),
}

impl MolarVolume {
    /// The native library reads any negative volume as "use the database value".
    pub(crate) fn to_native(self) -> f64 {
        match self {
            MolarVolume::Database => -1.0,
            MolarVolume::Given(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minus_one_is_undefined() {
        assert_eq!(Outcome::from_native(-1.0), Outcome::Undefined);
        assert_eq!(Outcome::from_native(-0.5), Outcome::Defined(-0.5));
        assert_eq!(Outcome::from_native(0.0), Outcome::Defined(0.0));
    }

    #[test]
    fn database_molar_volume_is_negative_at_the_boundary() {
        assert!(MolarVolume::Database.to_native() < 0.0);
        assert_eq!(MolarVolume::Given(1.8e-5).to_native(), 1.8e-5);
    }

    #[test]
    fn undefined_displays_as_word() {
        assert_eq!(Outcome::Undefined.to_string(), "undefined");
        assert_eq!(Outcome::Defined(2.5).to_string(), "2.5");
    }
}
