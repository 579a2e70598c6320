//! Battery model and incentive program catalogs.
//!
//! Both catalogs are fixed lookup tables resolved by string id. An unknown
//! id falls back to the first entry so a stale or mistyped selection still
//! produces a usable estimate instead of an error.

use serde::Deserialize;

/// A battery product with nameplate figures used by the estimator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatteryModel {
    /// Catalog key, e.g. `"PW3"`.
    pub id: String,
    /// Display name, e.g. `"Tesla Powerwall 3"`.
    pub label: String,
    /// Usable energy per unit (kWh, nameplate).
    pub usable_kwh: f64,
    /// Continuous power per unit (kW, nameplate).
    pub power_kw: f64,
}

/// Payout structure of a demand-response program.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgramTerms {
    /// Annual payout capped per battery, scaled by fleet utilization.
    Cap {
        /// Maximum annual payout per battery (dollars).
        cap_per_battery_year: f64,
    },
    /// Linear payout per credited kW per season.
    Rate {
        /// Payout per credited kW per season (dollars).
        rate_per_kw_season: f64,
        /// Number of paying seasons per year.
        seasons_per_year: u32,
    },
}

/// A demand-response program offering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Program {
    /// Catalog key, e.g. `"APS_TESLA_VPP"`.
    pub id: String,
    /// Display name.
    pub label: String,
    /// Marketing/disclaimer text prepended to the derivation note.
    pub note: String,
    /// Payout structure.
    #[serde(flatten)]
    pub terms: ProgramTerms,
}

impl Program {
    /// Annualized rate per credited kW for rate-structured programs.
    pub fn rate_per_kw_year(&self) -> Option<f64> {
        match self.terms {
            ProgramTerms::Rate {
                rate_per_kw_season,
                seasons_per_year,
            } => Some(rate_per_kw_season * f64::from(seasons_per_year)),
            ProgramTerms::Cap { .. } => None,
        }
    }
}

/// Battery and program lookup tables.
///
/// Constructed from validated configuration or [`Catalog::builtin`]; both
/// tables are guaranteed non-empty so first-entry fallback always resolves.
#[derive(Debug, Clone)]
pub struct Catalog {
    batteries: Vec<BatteryModel>,
    programs: Vec<Program>,
}

impl Catalog {
    /// Creates a catalog from explicit tables.
    ///
    /// # Panics
    ///
    /// Panics if either table is empty. Configuration validation rejects
    /// empty tables before they reach this constructor.
    pub fn new(batteries: Vec<BatteryModel>, programs: Vec<Program>) -> Self {
        assert!(!batteries.is_empty(), "battery catalog must be non-empty");
        assert!(!programs.is_empty(), "program catalog must be non-empty");
        Self {
            batteries,
            programs,
        }
    }

    /// The built-in catalog shipped with the estimator.
    pub fn builtin() -> Self {
        Self::new(builtin_batteries(), builtin_programs())
    }

    /// All battery models, in catalog order.
    pub fn batteries(&self) -> &[BatteryModel] {
        &self.batteries
    }

    /// All programs, in catalog order.
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Resolves a battery by id, falling back to the first entry.
    pub fn battery(&self, id: &str) -> &BatteryModel {
        self.batteries
            .iter()
            .find(|b| b.id == id)
            .unwrap_or(&self.batteries[0])
    }

    /// Resolves a program by id, falling back to the first entry.
    pub fn program(&self, id: &str) -> &Program {
        self.programs
            .iter()
            .find(|p| p.id == id)
            .unwrap_or(&self.programs[0])
    }
}

/// Built-in battery models.
pub fn builtin_batteries() -> Vec<BatteryModel> {
    vec![
        BatteryModel {
            id: "PW3".to_string(),
            label: "Tesla Powerwall 3".to_string(),
            usable_kwh: 13.5,
            power_kw: 11.5,
        },
        BatteryModel {
            id: "PW2".to_string(),
            label: "Tesla Powerwall 2".to_string(),
            usable_kwh: 13.5,
            power_kw: 5.0,
        },
        BatteryModel {
            id: "FRANKLIN".to_string(),
            label: "FranklinWH (aPower)".to_string(),
            usable_kwh: 13.6,
            power_kw: 5.0,
        },
    ]
}

/// Built-in program offerings.
///
/// APS Tesla VPP is marketed as up to about $600 per battery per year,
/// often paid twice a year but still $600/yr total, modeled as an annual
/// cap. SRP Battery Partner pays $55 per kW per season across 2 seasons.
pub fn builtin_programs() -> Vec<Program> {
    vec![
        Program {
            id: "APS_TESLA_VPP".to_string(),
            label: "APS Tesla VPP".to_string(),
            note: "APS Tesla VPP is commonly described as up to about $600 per battery \
                   per year (often paid twice per year). This estimator scales toward \
                   that annual cap based on avg event kW and performance."
                .to_string(),
            terms: ProgramTerms::Cap {
                cap_per_battery_year: 600.0,
            },
        },
        Program {
            id: "SRP_BATTERY_PARTNER".to_string(),
            label: "SRP Battery Partner".to_string(),
            note: "SRP Battery Partner is $55 per kW per season, 2 seasons per year \
                   (annualized here). Actual payouts depend on measured event \
                   performance vs baseline."
                .to_string(),
            terms: ProgramTerms::Rate {
                rate_per_kw_season: 55.0,
                seasons_per_year: 2,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_shape() {
        let cat = Catalog::builtin();
        assert_eq!(cat.batteries().len(), 3);
        assert_eq!(cat.programs().len(), 2);
        assert_eq!(cat.batteries()[0].id, "PW3");
        assert_eq!(cat.programs()[0].id, "APS_TESLA_VPP");
    }

    #[test]
    fn battery_lookup_by_id() {
        let cat = Catalog::builtin();
        let b = cat.battery("FRANKLIN");
        assert_eq!(b.label, "FranklinWH (aPower)");
        assert_eq!(b.usable_kwh, 13.6);
    }

    #[test]
    fn unknown_battery_falls_back_to_first() {
        let cat = Catalog::builtin();
        let b = cat.battery("NOT_A_BATTERY");
        assert_eq!(b.id, "PW3");
    }

    #[test]
    fn unknown_program_falls_back_to_first() {
        let cat = Catalog::builtin();
        let p = cat.program("");
        assert_eq!(p.id, "APS_TESLA_VPP");
    }

    #[test]
    fn rate_program_annualizes() {
        let cat = Catalog::builtin();
        let srp = cat.program("SRP_BATTERY_PARTNER");
        assert_eq!(srp.rate_per_kw_year(), Some(110.0));

        let aps = cat.program("APS_TESLA_VPP");
        assert_eq!(aps.rate_per_kw_year(), None);
    }

    #[test]
    #[should_panic]
    fn empty_battery_table_rejected() {
        Catalog::new(vec![], builtin_programs());
    }

    #[test]
    #[should_panic]
    fn empty_program_table_rejected() {
        Catalog::new(builtin_batteries(), vec![]);
    }
}
