//! The declarative signature table of the native library.
//!
//! Every exported evaluation is one [`Operation`]. A handle-based operation
//! is exported as `symbol()` and takes `arity()` doubles followed by the
//! working-pair handle; its flat twin is exported as `direct_symbol()` and
//! takes the same doubles followed by the database path and the working-pair
//! description. Mixing operations additionally write the two vapour mole
//! fractions through out-pointers placed before the doubles.

use std::fmt;

/// How the native function returns its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single double.
    Scalar,
    /// A double plus the vapour mole fractions `y1`, `y2`.
    Mixing,
}

/// The group of native functions an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Adsorption,
    AdsorptionSurface,
    AdsorptionSurfaceVapor,
    AdsorptionVolumetric,
    AbsorptionConventional,
    AbsorptionActivity,
    AbsorptionMixing,
    Refrigerant,
}

macro_rules! operations {
    ($($family:ident { $($variant:ident => $symbol:literal, $arity:literal, $shape:ident;)+ })+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($($variant,)+)+
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$($(Operation::$variant,)+)+];

            pub fn symbol(self) -> &'static str {
                match self {
                    $($(Operation::$variant => $symbol,)+)+
                }
            }

            pub fn direct_symbol(self) -> &'static str {
                match self {
                    $($(Operation::$variant => concat!("direct_", $symbol),)+)+
                }
            }

            /// Number of double inputs, excluding out-pointers and the handle.
            pub fn arity(self) -> usize {
                match self {
                    $($(Operation::$variant => $arity,)+)+
                }
            }

            pub fn shape(self) -> Shape {
                match self {
                    $($(Operation::$variant => Shape::$shape,)+)+
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $($(Operation::$variant => Family::$family,)+)+
                }
            }
        }
    };
}

operations! {
    Adsorption {
        AdsWpT => "ads_w_pT", 2, Scalar;
        AdsPwT => "ads_p_wT", 2, Scalar;
        AdsTpw => "ads_T_pw", 2, Scalar;
        AdsDwDpPT => "ads_dw_dp_pT", 2, Scalar;
        AdsDwDTPT => "ads_dw_dT_pT", 2, Scalar;
        AdsDpDwWT => "ads_dp_dw_wT", 2, Scalar;
        AdsDpDTWT => "ads_dp_dT_wT", 2, Scalar;
        AdsPiStarPyxgTM => "ads_piStar_pyxgTM", 6, Scalar;
    }
    AdsorptionSurface {
        SurWpT => "ads_sur_w_pT", 2, Scalar;
        SurPwT => "ads_sur_p_wT", 2, Scalar;
        SurTpw => "ads_sur_T_pw", 2, Scalar;
        SurDwDpPT => "ads_sur_dw_dp_pT", 2, Scalar;
        SurDwDTPT => "ads_sur_dw_dT_pT", 2, Scalar;
        SurDpDwWT => "ads_sur_dp_dw_wT", 2, Scalar;
        SurDpDTWT => "ads_sur_dp_dT_wT", 2, Scalar;
        SurPiStarPyxgTM => "ads_sur_piStar_pyxgTM", 6, Scalar;
    }
    AdsorptionSurfaceVapor {
        SurWpTpsat => "ads_sur_w_pTpsat", 3, Scalar;
        SurPwTpsat => "ads_sur_p_wTpsat", 3, Scalar;
        SurTpwpsat => "ads_sur_T_pwpsat", 3, Scalar;
        SurDwDpPTpsat => "ads_sur_dw_dp_pTpsat", 3, Scalar;
        SurDwDTPTpsat => "ads_sur_dw_dT_pTpsat", 4, Scalar;
        SurDpDwWTpsat => "ads_sur_dp_dw_wTpsat", 3, Scalar;
        SurDpDTWTpsat => "ads_sur_dp_dT_wTpsat", 4, Scalar;
        SurPiStarPyxgTpsatM => "ads_sur_piStar_pyxgTpsatM", 7, Scalar;
    }
    AdsorptionVolumetric {
        VolWARho => "ads_vol_W_ARho", 2, Scalar;
        VolAWRho => "ads_vol_A_WRho", 2, Scalar;
        VolDWDAARho => "ads_vol_dW_dA_ARho", 2, Scalar;
        VolDADWWRho => "ads_vol_dA_dW_WRho", 2, Scalar;
        VolWpTpsatRho => "ads_vol_w_pTpsatRho", 4, Scalar;
        VolPwTpsatRho => "ads_vol_p_wTpsatRho", 4, Scalar;
        VolTpwpsatRho => "ads_vol_T_pwpsatRho", 4, Scalar;
        VolDwDpPTpsatRho => "ads_vol_dw_dp_pTpsatRho", 4, Scalar;
        VolDwDTPTpsatRho => "ads_vol_dw_dT_pTpsatRho", 6, Scalar;
        VolDpDwWTpsatRho => "ads_vol_dp_dw_wTpsatRho", 4, Scalar;
        VolDpDTWTpsatRho => "ads_vol_dp_dT_wTpsatRho", 6, Scalar;
        VolPiStarPyxgTpsatRhoM => "ads_vol_piStar_pyxgTpsatRhoM", 8, Scalar;
    }
    AbsorptionConventional {
        ConXpT => "abs_con_X_pT", 2, Scalar;
        ConPXT => "abs_con_p_XT", 2, Scalar;
        ConTpX => "abs_con_T_pX", 2, Scalar;
        ConDXDpPT => "abs_con_dX_dp_pT", 2, Scalar;
        ConDXDTPT => "abs_con_dX_dT_pT", 2, Scalar;
        ConDpDXXT => "abs_con_dp_dX_XT", 2, Scalar;
        ConDpDTXT => "abs_con_dp_dT_XT", 2, Scalar;
    }
    AbsorptionActivity {
        ActGTxv1v2 => "abs_act_g_Txv1v2", 4, Scalar;
        ActPTxv1v2 => "abs_act_p_Txv1v2", 4, Scalar;
        ActXpTv1v2 => "abs_act_x_pTv1v2", 4, Scalar;
        ActPTxv1v2psat => "abs_act_p_Txv1v2psat", 5, Scalar;
        ActXpTv1v2psat => "abs_act_x_pTv1v2psat", 5, Scalar;
    }
    AbsorptionMixing {
        MixXpT => "abs_mix_x_pT", 2, Mixing;
        MixPTx => "abs_mix_p_Tx", 2, Mixing;
        MixTpx => "abs_mix_T_px", 2, Mixing;
        MixDpDxTx => "abs_mix_dp_dx_Tx", 2, Scalar;
        MixDpDTTx => "abs_mix_dp_dT_Tx", 2, Scalar;
    }
    Refrigerant {
        RefPsatT => "ref_p_sat_T", 1, Scalar;
        RefDpsatDTT => "ref_dp_sat_dT_T", 1, Scalar;
        RefRhoLT => "ref_rho_l_T", 1, Scalar;
        RefDrhoLDTT => "ref_drho_l_dT_T", 1, Scalar;
        RefTsatP => "ref_T_sat_p", 1, Scalar;
    }
}

impl Operation {
    /// Looks up an operation by its handle-based or direct symbol name.
    pub fn from_symbol(name: &str) -> Option<Self> {
        let name = name.strip_prefix("direct_").unwrap_or(name);
        Operation::ALL.iter().copied().find(|op| op.symbol() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
