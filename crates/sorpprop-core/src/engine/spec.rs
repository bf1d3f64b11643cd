use super::error::BindingError;
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_int;
use std::path::Path;

pub const NO_VAPOR_PRESSURE: &str = "NoVaporPressure";
pub const NO_LIQUID_DENSITY: &str = "NoSaturatedLiquidDensity";

/// An equation family together with the 1-based index of its parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Approach {
    pub name: String,
    pub id: u32,
}

impl Approach {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: 1,
        }
    }

    pub fn with_id(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.name, self.id)
    }
}

/// Full description of a working pair as the native library expects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkingPairSpec {
    pub sorbent: String,
    pub subtype: String,
    pub refrigerant: String,
    pub isotherm: Approach,
    pub vapor_pressure: Approach,
    pub liquid_density: Approach,
}

impl WorkingPairSpec {
    /// A pair using the library's placeholder refrigerant approaches.
    pub fn new(
        sorbent: impl Into<String>,
        subtype: impl Into<String>,
        refrigerant: impl Into<String>,
        isotherm: Approach,
    ) -> Self {
        Self {
            sorbent: sorbent.into(),
            subtype: subtype.into(),
            refrigerant: refrigerant.into(),
            isotherm,
            vapor_pressure: Approach::new(NO_VAPOR_PRESSURE),
            liquid_density: Approach::new(NO_LIQUID_DENSITY),
        }
    }

    pub fn with_vapor_pressure(mut self, approach: Approach) -> Self {
        self.vapor_pressure = approach;
        self
    }

    pub fn with_liquid_density(mut self, approach: Approach) -> Self {
        self.liquid_density = approach;
        self
    }

    pub(crate) fn to_native(&self, database: &Path) -> Result<NativeSpec, BindingError> {
        let path = database
            .to_str()
            .ok_or_else(|| BindingError::NonUtf8Path(database.display().to_string()))?;
        Ok(NativeSpec {
            database: c_string("database path", path)?,
            sorbent: c_string("sorbent", &self.sorbent)?,
            subtype: c_string("subtype", &self.subtype)?,
            refrigerant: c_string("refrigerant", &self.refrigerant)?,
            isotherm: c_string("isotherm", &self.isotherm.name)?,
            isotherm_id: c_id("isotherm", self.isotherm.id)?,
            vapor_pressure: c_string("vapor pressure approach", &self.vapor_pressure.name)?,
            vapor_pressure_id: c_id("vapor pressure approach", self.vapor_pressure.id)?,
            liquid_density: c_string("liquid density approach", &self.liquid_density.name)?,
            liquid_density_id: c_id("liquid density approach", self.liquid_density.id)?,
        })
    }
}

impl fmt::Display for WorkingPairSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} (isotherm {}, vapor pressure {}, liquid density {})",
            self.sorbent,
            self.subtype,
            self.refrigerant,
            self.isotherm,
            self.vapor_pressure,
            self.liquid_density
        )
    }
}

/// NUL-terminated copies of a [`WorkingPairSpec`], alive for one native call.
pub(crate) struct NativeSpec {
    pub database: CString,
    pub sorbent: CString,
    pub subtype: CString,
    pub refrigerant: CString,
    pub isotherm: CString,
    pub isotherm_id: c_int,
    pub vapor_pressure: CString,
    pub vapor_pressure_id: c_int,
    pub liquid_density: CString,
    pub liquid_density_id: c_int,
}

fn c_string(field: &'static str, value: &str) -> Result<CString, BindingError> {
    CString::new(value).map_err(|e| BindingError::InvalidString { field, source: e })
}

fn c_id(field: &'static str, id: u32) -> Result<c_int, BindingError> {
    c_int::try_from(id).map_err(|_| BindingError::InvalidId { field, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_ids_default_to_one() {
        let spec = WorkingPairSpec::new("zeolite", "13x", "water", Approach::new("Toth"));
        assert_eq!(spec.isotherm.id, 1);
        assert_eq!(spec.vapor_pressure, Approach::new(NO_VAPOR_PRESSURE));
        assert_eq!(spec.liquid_density.id, 1);
    }

    #[test]
    fn native_conversion_keeps_ids_and_names() {
        let spec = WorkingPairSpec::new("zeolite", "13x", "water", Approach::with_id("Toth", 2))
            .with_vapor_pressure(Approach::new("VaporPressure_EoS1"));
        let native = spec.to_native(Path::new("/tmp/db.json")).unwrap();
        assert_eq!(native.isotherm_id, 2);
        assert_eq!(native.vapor_pressure.to_str().unwrap(), "VaporPressure_EoS1");
        assert_eq!(native.database.to_str().unwrap(), "/tmp/db.json");
    }

    #[test]
    fn approach_id_beyond_native_range_is_rejected() {
        let spec = WorkingPairSpec::new("zeolite", "13x", "water", Approach::new("Toth"))
            .with_liquid_density(Approach::with_id("RefrigerantDensity_Rackett", u32::MAX));
        assert!(matches!(
            spec.to_native(Path::new("db.json")),
            Err(BindingError::InvalidId {
                field: "liquid density approach",
                id: u32::MAX
            })
        ));

        let largest = c_int::MAX as u32;
        let spec = WorkingPairSpec::new("zeolite", "13x", "water", Approach::with_id("Toth", largest));
        assert_eq!(spec.to_native(Path::new("db.json")).unwrap().isotherm_id, c_int::MAX);
    }

    #[test]
    fn interior_nul_is_rejected() {
        let spec = WorkingPairSpec::new("zeo\0lite", "", "water", Approach::new("Toth"));
        assert!(matches!(
            spec.to_native(Path::new("db.json")),
            Err(BindingError::InvalidString { field: "sorbent", .. })
        ));
    }
}
