//! Choice of refrigerant functions for evaluating a working pair.

use crate::core::database::{Database, Entry, EntryKind};
use crate::engine::spec::{NO_LIQUID_DENSITY, NO_VAPOR_PRESSURE};
use crate::engine::{Approach, WorkingPairSpec};

/// Vapour-pressure families in order of preference.
pub const VAPOR_PRESSURE_PRIORITY: [&str; 5] = [
    "VaporPressure_EoS1",
    "VaporPressure_EoS2",
    "VaporPressure_EoS3",
    "VaporPressure_EoSCubic",
    "VaporPressure_Antoine",
];

pub const LIQUID_DENSITY: &str = "SaturatedLiquidDensity_EoS1";

/// Refrigerant functions combined with an isotherm to form a working pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefrigerantFunctions {
    pub vapor_pressure: Approach,
    pub liquid_density: Approach,
}

impl Default for RefrigerantFunctions {
    fn default() -> Self {
        Self {
            vapor_pressure: Approach::new(NO_VAPOR_PRESSURE),
            liquid_density: Approach::new(NO_LIQUID_DENSITY),
        }
    }
}

impl RefrigerantFunctions {
    /// Picks the preferred functions of `refrigerant`, using the first
    /// parameter set of each family.
    pub fn select(database: &Database, refrigerant: &str) -> Self {
        let Some(entry) = refrigerant_entry(database, refrigerant) else {
            return Self::default();
        };
        let vapor_pressure = VAPOR_PRESSURE_PRIORITY
            .iter()
            .find(|family| entry.has_family(family))
            .copied()
            .unwrap_or(NO_VAPOR_PRESSURE);
        let liquid_density = if entry.has_family(LIQUID_DENSITY) {
            LIQUID_DENSITY
        } else {
            NO_LIQUID_DENSITY
        };
        Self {
            vapor_pressure: Approach::new(vapor_pressure),
            liquid_density: Approach::new(liquid_density),
        }
    }
}

pub fn refrigerant_entry<'a>(database: &'a Database, refrigerant: &str) -> Option<&'a Entry> {
    database
        .entries_of(EntryKind::Refrigerant)
        .find(|entry| entry.key.refrigerant == refrigerant)
}

/// Working pair evaluating parameter set `index` of `family` of `entry`.
pub fn working_pair(
    entry: &Entry,
    family: &str,
    index: usize,
    functions: &RefrigerantFunctions,
) -> WorkingPairSpec {
    WorkingPairSpec::new(
        entry.key.sorbent.clone(),
        entry.key.subtype.clone(),
        entry.key.refrigerant.clone(),
        Approach::with_id(family, one_based(index)),
    )
    .with_vapor_pressure(functions.vapor_pressure.clone())
    .with_liquid_density(functions.liquid_density.clone())
}

/// Working pair exercising refrigerant function `family`/`index`.
///
/// The native library only evaluates refrigerant functions through a working
/// pair, so the first adsorption or absorption pair using the refrigerant
/// lends its first isotherm. `None` when no such pair exists.
pub fn refrigerant_probe(
    database: &Database,
    refrigerant: &str,
    family: &str,
    index: usize,
) -> Option<WorkingPairSpec> {
    let host = database.entries().iter().find(|entry| {
        entry.kind() != EntryKind::Refrigerant
            && entry.key.refrigerant == refrigerant
            && !entry.value.equations.is_empty()
    })?;
    let isotherm = host.value.equations.keys().next()?;
    let own = Approach::with_id(family, one_based(index));
    Some(
        WorkingPairSpec::new(
            host.key.sorbent.clone(),
            host.key.subtype.clone(),
            host.key.refrigerant.clone(),
            Approach::new(isotherm.clone()),
        )
        .with_vapor_pressure(own.clone())
        .with_liquid_density(own),
    )
}

fn one_based(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
