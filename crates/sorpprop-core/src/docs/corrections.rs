//! Equilibrium models used for comparison figures.
//!
//! Some published volumetric isotherms were fitted with refrigerant data the
//! library does not provide, e.g. an extrapolated vapour pressure above the
//! critical point or an adsorbed-phase density that differs from the
//! saturated liquid. Those fits are looked up by the DOI of their citation in
//! [`CORRECTIONS`] and evaluated with the published substitute.

use crate::core::database::{EntryKey, EntryKind};
use crate::engine::{BindingError, MolarVolume, Outcome, SorptionEngine, WorkingPair};
use phf::phf_map;

type Result<T> = std::result::Result<T, BindingError>;

/// Equilibrium functions evaluated against experimental data.
#[allow(non_snake_case)]
pub trait EquilibriumModel {
    /// Loading (adsorption) or concentration (absorption) at `p` and `T`.
    fn loading(&self, p: f64, T: f64) -> Result<Outcome>;

    /// Equilibrium pressure at loading or concentration `w` and `T`.
    fn pressure(&self, w: f64, T: f64) -> Result<Outcome>;

    /// Volumetric loading of the characteristic curve at adsorption potential `A`.
    fn characteristic(&self, A: f64) -> Result<Outcome>;
}

/// Substitute refrigerant data for a published volumetric fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// Methane above 188 K: vapour pressure extrapolated from the critical
    /// point, adsorbed-phase density from an exponential specific volume.
    SupercriticalMethane,
    /// Adsorbed-phase density from a specific volume that rises
    /// exponentially from `reference` m³/kg at 246.78 K to 9.39e-4 m³/kg at
    /// 374.21 K.
    AdsorbedVolume { reference: f64 },
    /// Adsorbed-phase density equal to the library's saturated liquid density.
    LiquidDensity,
}

impl Correction {
    #[allow(non_snake_case)]
    fn vapor_pressure<E: SorptionEngine>(self, pair: &WorkingPair<E>, T: f64) -> Result<Outcome> {
        match self {
            Correction::SupercriticalMethane if T > 188.0 => {
                Ok(Outcome::Defined(4_599_200.0 * (T / 190.564).powi(2)))
            }
            _ => pair.refrigerant().p_sat_T(T),
        }
    }

    #[allow(non_snake_case)]
    fn adsorbed_density<E: SorptionEngine>(
        self,
        pair: &WorkingPair<E>,
        T: f64,
    ) -> Result<Outcome> {
        match self {
            Correction::SupercriticalMethane => Ok(Outcome::Defined(
                1.0 / (2.3677e-3 * (0.0043 * (T - 111.67)).exp()),
            )),
            Correction::AdsorbedVolume { reference } => {
                let omega = (9.39e-4 / reference).ln() / (374.21 - 246.78);
                Ok(Outcome::Defined(
                    1.0 / (reference * (omega * (T - 246.78)).exp()),
                ))
            }
            // The evaluated saturated liquid density is passed, not a -1 placeholder.
            Correction::LiquidDensity => pair.refrigerant().rho_l_T(T),
        }
    }
}

/// A correction restricted to one refrigerant and, optionally, one sorbent
/// and subtype.
#[derive(Debug)]
pub struct Rule {
    pub refrigerant: &'static str,
    pub sorbent: Option<&'static str>,
    pub subtype: Option<&'static str>,
    pub correction: Correction,
}

impl Rule {
    fn applies_to(&self, key: &EntryKey) -> bool {
        key.refrigerant == self.refrigerant
            && self.sorbent.is_none_or(|s| s == key.sorbent)
            && self.subtype.is_none_or(|s| s == key.subtype)
    }
}

pub static CORRECTIONS: phf::Map<&'static str, Rule> = phf_map! {
    // Rahman et al. (2012), Int. J. Heat Mass Transf. 55
    "10.1016/j.ijheatmasstransfer.2011.10.056" => Rule {
        refrigerant: "Methane",
        sorbent: Some("activated carbon powder"),
        subtype: Some("Maxsorb III"),
        correction: Correction::SupercriticalMethane,
    },
    // Akkimaradi et al. (2001), J. Chem. Eng. Data 46
    "10.1021/je000277e" => Rule {
        refrigerant: "R-134a",
        sorbent: None,
        subtype: None,
        correction: Correction::AdsorbedVolume { reference: 7.2643e-4 },
    },
    // Saha et al. (2009), Int. J. Refrig. 32
    "10.1016/j.ijrefrig.2009.03.010" => Rule {
        refrigerant: "R-134a",
        sorbent: None,
        subtype: None,
        correction: Correction::AdsorbedVolume { reference: 7.26e-4 },
    },
    // Saha et al. (2012), Int. J. Refrig. 35
    "10.1016/j.ijrefrig.2011.05.002" => Rule {
        refrigerant: "R-134a",
        sorbent: None,
        subtype: None,
        correction: Correction::AdsorbedVolume { reference: 7.2643e-4 },
    },
    // Saha et al. (2008), J. Chem. Eng. Data 53
    "10.1021/je800204p" => Rule {
        refrigerant: "507a",
        sorbent: None,
        subtype: None,
        correction: Correction::LiquidDensity,
    },
    // Loh et al. (2012), J. Chem. Eng. Data 57
    "10.1021/je3008099" => Rule {
        refrigerant: "507a",
        sorbent: None,
        subtype: None,
        correction: Correction::LiquidDensity,
    },
};

/// Isotherm families whose fits may carry a correction.
const VOLUMETRIC_FAMILIES: [&str; 2] = ["DubininArctan1", "DubininAstakhov"];

/// Extracts the DOI from a citation ending in `DOI: <doi>.`.
pub fn doi(citation: &str) -> Option<&str> {
    let (_, tail) = citation.rsplit_once("DOI:")?;
    let doi = tail.trim().trim_end_matches('.');
    (!doi.is_empty()).then_some(doi)
}

/// The correction applying to an equation set, if any.
pub fn lookup(key: &EntryKey, family: &str, citation: &str) -> Option<Correction> {
    if key.kind != EntryKind::Adsorption || !VOLUMETRIC_FAMILIES.contains(&family) {
        return None;
    }
    let rule = CORRECTIONS.get(doi(citation)?)?;
    rule.applies_to(key).then_some(rule.correction)
}

/// How an absorption family is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsorptionForm {
    Conventional,
    Mixing,
    /// Activity-coefficient family with the molar volumes of the database.
    Activity,
}

impl AbsorptionForm {
    pub fn for_family(family: &str) -> Self {
        match family {
            "Antoine" | "Duehring" => AbsorptionForm::Conventional,
            "MixingRule" => AbsorptionForm::Mixing,
            _ => AbsorptionForm::Activity,
        }
    }
}

/// Evaluates the equation set a working pair was created for.
pub enum PairModel<'a, E: SorptionEngine> {
    Adsorption {
        pair: &'a WorkingPair<E>,
        correction: Option<Correction>,
    },
    Absorption {
        pair: &'a WorkingPair<E>,
        form: AbsorptionForm,
    },
}

impl<'a, E: SorptionEngine> PairModel<'a, E> {
    /// Model for `family` of the entry identified by `key`, or `None` for
    /// refrigerant entries.
    pub fn new(pair: &'a WorkingPair<E>, key: &EntryKey, family: &str, citation: &str) -> Option<Self> {
        match key.kind {
            EntryKind::Adsorption => Some(PairModel::Adsorption {
                pair,
                correction: lookup(key, family, citation),
            }),
            EntryKind::Absorption => Some(PairModel::Absorption {
                pair,
                form: AbsorptionForm::for_family(family),
            }),
            EntryKind::Refrigerant => None,
        }
    }
}

#[allow(non_snake_case)]
impl<E: SorptionEngine> EquilibriumModel for PairModel<'_, E> {
    fn loading(&self, p: f64, T: f64) -> Result<Outcome> {
        match *self {
            PairModel::Adsorption {
                pair,
                correction: None,
            } => pair.adsorption().w_pT(p, T),
            PairModel::Adsorption {
                pair,
                correction: Some(correction),
            } => {
                let (Some(p_sat), Some(rho)) = (
                    correction.vapor_pressure(pair, T)?.value(),
                    correction.adsorbed_density(pair, T)?.value(),
                ) else {
                    return Ok(Outcome::Undefined);
                };
                pair.adsorption().volumetric().w_pTpsatRho(p, T, p_sat, rho)
            }
            PairModel::Absorption { pair, form } => match form {
                AbsorptionForm::Conventional => pair.absorption().conventional().X_pT(p, T),
                AbsorptionForm::Mixing => Ok(pair.absorption().mixing().x_pT(p, T)?.value),
                AbsorptionForm::Activity => pair.absorption().activity().x_pTv1v2(
                    p,
                    T,
                    MolarVolume::Database,
                    MolarVolume::Database,
                ),
            },
        }
    }

    fn pressure(&self, w: f64, T: f64) -> Result<Outcome> {
        match *self {
            PairModel::Adsorption { pair, .. } => pair.adsorption().p_wT(w, T),
            PairModel::Absorption { pair, form } => match form {
                AbsorptionForm::Conventional => pair.absorption().conventional().p_XT(w, T),
                AbsorptionForm::Mixing => Ok(pair.absorption().mixing().p_Tx(T, w)?.value),
                AbsorptionForm::Activity => pair.absorption().activity().p_Txv1v2(
                    T,
                    w,
                    MolarVolume::Database,
                    MolarVolume::Database,
                ),
            },
        }
    }

    fn characteristic(&self, A: f64) -> Result<Outcome> {
        match *self {
            PairModel::Adsorption { pair, .. } => pair.adsorption().volumetric().W_ARho(A, 1.0),
            PairModel::Absorption { .. } => Ok(Outcome::Undefined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::engine::{Approach, Operation, WorkingPairSpec};
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    const RAHMAN: &str = "Rahman, Kazi Afzalur; Chakraborty, Anutosh; Saha, Bidyut Baran; Ng, \
        Kim Choon (2012): On thermodynamics of methane+carbonaceous materials adsorption. In: \
        International Journal of Heat and Mass Transfer 55 (4), S. 565\u{2013}573. DOI: \
        10.1016/j.ijheatmasstransfer.2011.10.056.";

    fn key(kind: EntryKind, sorbent: &str, subtype: &str, refrigerant: &str) -> EntryKey {
        EntryKey {
            sorbent: sorbent.to_string(),
            refrigerant: refrigerant.to_string(),
            subtype: subtype.to_string(),
            kind,
        }
    }

    fn pair(engine: MockEngine) -> WorkingPair<MockEngine> {
        let spec = WorkingPairSpec::new("s", "t", "r", Approach::new("DubininAstakhov"));
        WorkingPair::new(Arc::new(engine), "db.json", spec).unwrap()
    }

    #[test]
    fn doi_is_taken_from_citation_tail() {
        assert_eq!(doi(RAHMAN), Some("10.1016/j.ijheatmasstransfer.2011.10.056"));
        assert_eq!(doi("Doe (2020): Title."), None);
        assert_eq!(doi("Doe (2020). DOI: ."), None);
    }

    #[test]
    fn lookup_checks_family_kind_and_pair() {
        let methane = key(
            EntryKind::Adsorption,
            "activated carbon powder",
            "Maxsorb III",
            "Methane",
        );
        assert_eq!(
            lookup(&methane, "DubininAstakhov", RAHMAN),
            Some(Correction::SupercriticalMethane)
        );
        assert_eq!(lookup(&methane, "Toth", RAHMAN), None);

        let other_subtype = key(EntryKind::Adsorption, "activated carbon powder", "A-20", "Methane");
        assert_eq!(lookup(&other_subtype, "DubininAstakhov", RAHMAN), None);

        let absorption = key(EntryKind::Absorption, "activated carbon powder", "Maxsorb III", "Methane");
        assert_eq!(lookup(&absorption, "DubininAstakhov", RAHMAN), None);

        let r134a = key(EntryKind::Adsorption, "activated carbon", "Maxsorb III", "R-134a");
        assert_eq!(
            lookup(&r134a, "DubininArctan1", "Saha (2009). DOI: 10.1016/j.ijrefrig.2009.03.010."),
            Some(Correction::AdsorbedVolume { reference: 7.26e-4 })
        );
    }

    #[test]
    fn supercritical_methane_extrapolates_vapor_pressure() {
        let seen_psat = Arc::new(AtomicU64::new(0));
        let seen = seen_psat.clone();
        let engine = MockEngine::new()
            .with_constant(Operation::RefPsatT, 1.0e6)
            .with_function(Operation::VolWpTpsatRho, move |args| {
                seen.store(args[2].to_bits(), Ordering::SeqCst);
                args[3]
            });
        let pair = pair(engine);
        let model = PairModel::Adsorption {
            pair: &pair,
            correction: Some(Correction::SupercriticalMethane),
        };

        let rho = model.loading(1e5, 250.0).unwrap().value().unwrap();
        assert_relative_eq!(
            f64::from_bits(seen_psat.load(Ordering::SeqCst)),
            4_599_200.0 * (250.0f64 / 190.564).powi(2),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            rho,
            1.0 / (2.3677e-3 * (0.0043f64 * (250.0 - 111.67)).exp()),
            max_relative = 1e-12
        );

        model.loading(1e5, 150.0).unwrap();
        assert_eq!(f64::from_bits(seen_psat.load(Ordering::SeqCst)), 1.0e6);
    }

    #[test]
    fn adsorbed_volume_matches_both_anchor_points() {
        let engine = MockEngine::new().with_function(Operation::VolWpTpsatRho, |args| args[3]);
        let pair = pair(engine);
        let model = PairModel::Adsorption {
            pair: &pair,
            correction: Some(Correction::AdsorbedVolume { reference: 7.2643e-4 }),
        };
        let low = model.loading(1e5, 246.78).unwrap().value().unwrap();
        let high = model.loading(1e5, 374.21).unwrap().value().unwrap();
        assert_relative_eq!(low, 1.0 / 7.2643e-4, max_relative = 1e-12);
        assert_relative_eq!(high, 1.0 / 9.39e-4, max_relative = 1e-12);
    }

    #[test]
    fn liquid_density_correction_passes_the_library_density() {
        let engine = MockEngine::new()
            .with_function(Operation::RefPsatT, |a| 10.0 * a[0])
            .with_function(Operation::RefRhoLT, |a| 1500.0 - a[0])
            .with_function(Operation::VolWpTpsatRho, |a| a[3]);
        let pair = pair(engine);
        let model = PairModel::Adsorption {
            pair: &pair,
            correction: Some(Correction::LiquidDensity),
        };
        assert_eq!(model.loading(1000.0, 300.0).unwrap(), Outcome::Defined(1200.0));
    }

    #[test]
    fn undefined_refrigerant_data_yields_undefined_loading() {
        let engine = MockEngine::new()
            .with_constant(Operation::RefPsatT, 2000.0)
            .with_constant(Operation::RefRhoLT, -1.0)
            .with_constant(Operation::VolWpTpsatRho, 0.2);
        let pair = pair(engine);
        let model = PairModel::Adsorption {
            pair: &pair,
            correction: Some(Correction::LiquidDensity),
        };
        assert_eq!(model.loading(1000.0, 300.0).unwrap(), Outcome::Undefined);
    }

    #[test]
    fn absorption_forms_dispatch_to_their_family() {
        let engine = MockEngine::new()
            .with_constant(Operation::ConXpT, 0.4)
            .with_constant(Operation::ActPTxv1v2, 1500.0)
            .with_mixing(Operation::MixPTx, |_, _| (900.0, 0.1, 0.9));
        let pair = pair(engine);

        let conventional = PairModel::Absorption {
            pair: &pair,
            form: AbsorptionForm::for_family("Duehring"),
        };
        assert_eq!(conventional.loading(1000.0, 300.0).unwrap(), Outcome::Defined(0.4));

        let mixing = PairModel::Absorption {
            pair: &pair,
            form: AbsorptionForm::for_family("MixingRule"),
        };
        assert_eq!(mixing.pressure(0.5, 300.0).unwrap(), Outcome::Defined(900.0));

        let activity = PairModel::Absorption {
            pair: &pair,
            form: AbsorptionForm::for_family("WilsonFixedDl"),
        };
        assert_eq!(activity.pressure(0.5, 300.0).unwrap(), Outcome::Defined(1500.0));
        assert_eq!(activity.characteristic(1000.0).unwrap(), Outcome::Undefined);
    }
}
