//! TOML-based estimator configuration.
//!
//! Business constants — escalation defaults, performance and commit
//! defaults, the peak-to-average-event factor, and the battery/program
//! catalogs — are approximate, rate-sheet-derived figures. They load from
//! TOML so an updated rate sheet never requires a rebuild; the built-in
//! values match the current published program terms.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{self, BatteryModel, Catalog, Program, ProgramTerms};
use crate::escalation::{YEARS_MAX, YEARS_MIN};
use crate::incentive::IncentiveDefaults;

/// Top-level estimator configuration parsed from TOML.
///
/// All fields default to the built-in rate sheet. Load from TOML with
/// [`EstimatorConfig::from_toml_file`] or use [`EstimatorConfig::builtin`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Utility-cost escalation defaults.
    pub escalation: EscalationConfig,
    /// Incentive field defaults and conversion constants.
    pub incentive: IncentiveDefaults,
    /// Battery model catalog (`[[battery]]` tables).
    #[serde(rename = "battery")]
    pub batteries: Vec<BatteryModel>,
    /// Program catalog (`[[program]]` tables).
    #[serde(rename = "program")]
    pub programs: Vec<Program>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Utility-cost escalation defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscalationConfig {
    /// Default annual escalation rate (fractional, 0.09 = 9%).
    pub default_annual_rate: f64,
    /// Default projection term in years.
    pub default_years: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            default_annual_rate: 0.09,
            default_years: 25,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"incentive.performance"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl EstimatorConfig {
    /// Returns the built-in configuration (current published rate sheet).
    pub fn builtin() -> Self {
        Self {
            escalation: EscalationConfig::default(),
            incentive: IncentiveDefaults::default(),
            batteries: catalog::builtin_batteries(),
            programs: catalog::builtin_programs(),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds the lookup catalog from the configured tables.
    ///
    /// Call only after [`validate`](Self::validate) passes; the catalog
    /// constructor rejects empty tables.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.batteries.clone(), self.programs.clone())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let esc = &self.escalation;
        if !esc.default_annual_rate.is_finite() {
            errors.push(ConfigError {
                field: "escalation.default_annual_rate".into(),
                message: "must be finite".into(),
            });
        }
        if !(YEARS_MIN..=YEARS_MAX).contains(&esc.default_years) {
            errors.push(ConfigError {
                field: "escalation.default_years".into(),
                message: format!("must be in [{YEARS_MIN}, {YEARS_MAX}]"),
            });
        }

        let inc = &self.incentive;
        if !(inc.performance > 0.0 && inc.performance <= 1.0) {
            errors.push(ConfigError {
                field: "incentive.performance".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(inc.commit_kw_per_unit >= 0.0 && inc.commit_kw_per_unit.is_finite()) {
            errors.push(ConfigError {
                field: "incentive.commit_kw_per_unit".into(),
                message: "must be >= 0 and finite".into(),
            });
        }
        if !(inc.event_avg_factor > 0.0 && inc.event_avg_factor <= 1.0) {
            errors.push(ConfigError {
                field: "incentive.event_avg_factor".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }

        if self.batteries.is_empty() {
            errors.push(ConfigError {
                field: "battery".into(),
                message: "at least one battery model is required".into(),
            });
        }
        for (i, b) in self.batteries.iter().enumerate() {
            if b.id.is_empty() {
                errors.push(ConfigError {
                    field: format!("battery[{i}].id"),
                    message: "must be non-empty".into(),
                });
            }
            if !(b.usable_kwh > 0.0) {
                errors.push(ConfigError {
                    field: format!("battery[{i}].usable_kwh"),
                    message: "must be > 0".into(),
                });
            }
            if !(b.power_kw > 0.0) {
                errors.push(ConfigError {
                    field: format!("battery[{i}].power_kw"),
                    message: "must be > 0".into(),
                });
            }
        }

        if self.programs.is_empty() {
            errors.push(ConfigError {
                field: "program".into(),
                message: "at least one program is required".into(),
            });
        }
        for (i, p) in self.programs.iter().enumerate() {
            if p.id.is_empty() {
                errors.push(ConfigError {
                    field: format!("program[{i}].id"),
                    message: "must be non-empty".into(),
                });
            }
            match p.terms {
                ProgramTerms::Cap {
                    cap_per_battery_year,
                } => {
                    if !(cap_per_battery_year > 0.0) {
                        errors.push(ConfigError {
                            field: format!("program[{i}].cap_per_battery_year"),
                            message: "must be > 0".into(),
                        });
                    }
                }
                ProgramTerms::Rate {
                    rate_per_kw_season,
                    seasons_per_year,
                } => {
                    if !(rate_per_kw_season > 0.0) {
                        errors.push(ConfigError {
                            field: format!("program[{i}].rate_per_kw_season"),
                            message: "must be > 0".into(),
                        });
                    }
                    if seasons_per_year == 0 {
                        errors.push(ConfigError {
                            field: format!("program[{i}].seasons_per_year"),
                            message: "must be >= 1".into(),
                        });
                    }
                }
            }
        }

        errors
    }
}
