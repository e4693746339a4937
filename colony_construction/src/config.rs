// Data-driven scheduler configuration.
//
// Every tunable number the scheduler uses lives in `SchedulerConfig`, loaded
// from JSON at startup. The scheduler never hard-codes world constants: the
// global hard ceiling on outstanding construction orders and the safety
// buffer kept below it belong to the external world and differ between
// environments, so they are configuration inputs. The adaptive throughput
// heuristic (`budget.rs`) reads its baseline, scaling bounds and per-tier
// ceilings from the nested `BudgetConfig`.
//
// Missing fields fall back to `Default` (`#[serde(default)]`), so a config
// file only needs the values it overrides. `from_json()` and `load()` both
// run `validate()` before returning.
//
// See also: `budget.rs` which consumes `BudgetConfig`, `executor.rs` and
// `colony.rs` which read the ceiling and buffer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failure to load or validate a `SchedulerConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One step of the per-tier throughput ceiling: from `min_tier` upward, at
/// most `max_orders` new orders per tick (until the next step).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCeiling {
    pub min_tier: u8,
    pub max_orders: u32,
}

/// Parameters of the adaptive per-territory budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Orders per tick before any scaling.
    pub baseline_orders_per_tick: u32,

    /// One extra order per this many builder-class units.
    pub builders_per_extra_order: u32,

    /// Stored energy that yields a stored-energy factor of exactly 1.0.
    pub stored_energy_reference: f64,

    /// Lower clamp of the stored-energy factor. Keeps an empty territory
    /// building at reduced pace instead of stopping.
    pub stored_factor_min: f64,

    /// Upper clamp of the stored-energy factor.
    pub stored_factor_max: f64,

    /// Hard per-tick ceilings by development tier, sorted by `min_tier`
    /// ascending. The first step must start at tier 0.
    pub tier_ceilings: Vec<TierCeiling>,
}

impl BudgetConfig {
    /// Per-tick order ceiling for a development tier.
    pub fn ceiling_for(&self, tier: u8) -> u32 {
        self.tier_ceilings
            .iter()
            .take_while(|step| step.min_tier <= tier)
            .last()
            .map_or(0, |step| step.max_orders)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            baseline_orders_per_tick: 2,
            builders_per_extra_order: 2,
            stored_energy_reference: 50_000.0,
            stored_factor_min: 0.5,
            stored_factor_max: 1.5,
            tier_ceilings: vec![
                TierCeiling {
                    min_tier: 0,
                    max_orders: 2,
                },
                TierCeiling {
                    min_tier: 4,
                    max_orders: 3,
                },
                TierCeiling {
                    min_tier: 7,
                    max_orders: 5,
                },
            ],
        }
    }
}

/// Top-level scheduler configuration. Loaded from JSON, never mutated at
/// runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// The world's hard ceiling on outstanding construction orders across
    /// all territories.
    pub hard_order_ceiling: u32,

    /// Orders kept in reserve below `hard_order_ceiling`.
    pub order_safety_buffer: u32,

    pub budget: BudgetConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            hard_order_ceiling: 100,
            order_safety_buffer: 5,
            budget: BudgetConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded scheduler config from {}", path.display());
        Ok(config)
    }

    /// Orders that may be outstanding before the scheduler stops submitting.
    pub fn effective_order_ceiling(&self) -> u32 {
        self.hard_order_ceiling.saturating_sub(self.order_safety_buffer)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_safety_buffer >= self.hard_order_ceiling {
            return Err(ConfigError::Invalid(format!(
                "order_safety_buffer ({}) must be below hard_order_ceiling ({})",
                self.order_safety_buffer, self.hard_order_ceiling
            )));
        }

        let budget = &self.budget;
        if budget.builders_per_extra_order == 0 {
            return Err(ConfigError::Invalid(
                "budget.builders_per_extra_order must be at least 1".into(),
            ));
        }
        if !(budget.stored_energy_reference.is_finite() && budget.stored_energy_reference > 0.0)
        {
            return Err(ConfigError::Invalid(
                "budget.stored_energy_reference must be a positive number".into(),
            ));
        }
        if !(budget.stored_factor_min.is_finite()
            && budget.stored_factor_max.is_finite()
            && 0.0 <= budget.stored_factor_min
            && budget.stored_factor_min <= budget.stored_factor_max)
        {
            return Err(ConfigError::Invalid(format!(
                "budget stored factor bounds [{}, {}] are not a valid range",
                budget.stored_factor_min, budget.stored_factor_max
            )));
        }

        match budget.tier_ceilings.first() {
            None => {
                return Err(ConfigError::Invalid(
                    "budget.tier_ceilings must not be empty".into(),
                ));
            }
            Some(first) if first.min_tier != 0 => {
                return Err(ConfigError::Invalid(
                    "budget.tier_ceilings must start at tier 0".into(),
                ));
            }
            Some(_) => {}
        }
        if budget
            .tier_ceilings
            .windows(2)
            .any(|pair| pair[0].min_tier >= pair[1].min_tier)
        {
            return Err(ConfigError::Invalid(
                "budget.tier_ceilings must be sorted by strictly increasing min_tier".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SchedulerConfig::default().validate().unwrap();
    }

    #[test]
    fn default_config_serializes() {
        let config = SchedulerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = SchedulerConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SchedulerConfig::from_json(r#"{ "order_safety_buffer": 10 }"#).unwrap();
        assert_eq!(config.order_safety_buffer, 10);
        assert_eq!(config.hard_order_ceiling, 100);
        assert_eq!(config.budget, BudgetConfig::default());
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "hard_order_ceiling": 250,
            "order_safety_buffer": 20,
            "budget": {
                "baseline_orders_per_tick": 3,
                "builders_per_extra_order": 4,
                "stored_energy_reference": 100000.0,
                "stored_factor_min": 0.25,
                "stored_factor_max": 2.0,
                "tier_ceilings": [
                    { "min_tier": 0, "max_orders": 1 },
                    { "min_tier": 5, "max_orders": 8 }
                ]
            }
        }"#;
        let config = SchedulerConfig::from_json(json).unwrap();
        assert_eq!(config.effective_order_ceiling(), 230);
        assert_eq!(config.budget.baseline_orders_per_tick, 3);
        assert_eq!(config.budget.ceiling_for(4), 1);
        assert_eq!(config.budget.ceiling_for(5), 8);
    }

    #[test]
    fn default_tier_ceilings_step_at_breakpoints() {
        let budget = BudgetConfig::default();
        for tier in 0..=3 {
            assert_eq!(budget.ceiling_for(tier), 2, "tier {tier}");
        }
        for tier in 4..=6 {
            assert_eq!(budget.ceiling_for(tier), 3, "tier {tier}");
        }
        for tier in 7..=8 {
            assert_eq!(budget.ceiling_for(tier), 5, "tier {tier}");
        }
        assert_eq!(budget.ceiling_for(u8::MAX), 5);
    }

    #[test]
    fn rejects_buffer_at_or_above_ceiling() {
        let err = SchedulerConfig::from_json(
            r#"{ "hard_order_ceiling": 10, "order_safety_buffer": 10 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_builders_per_extra_order() {
        let mut config = SchedulerConfig::default();
        config.budget.builders_per_extra_order = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_stored_factor_bounds() {
        let mut config = SchedulerConfig::default();
        config.budget.stored_factor_min = 2.0;
        config.budget.stored_factor_max = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_positive_stored_reference() {
        let mut config = SchedulerConfig::default();
        config.budget.stored_energy_reference = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_bad_tier_tables() {
        let mut config = SchedulerConfig::default();
        config.budget.tier_ceilings.clear();
        assert!(config.validate().is_err());

        config.budget.tier_ceilings = vec![TierCeiling {
            min_tier: 2,
            max_orders: 3,
        }];
        assert!(config.validate().is_err());

        config.budget.tier_ceilings = vec![
            TierCeiling {
                min_tier: 0,
                max_orders: 2,
            },
            TierCeiling {
                min_tier: 0,
                max_orders: 3,
            },
        ];
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_json_rejects_invalid_json() {
        let err = SchedulerConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SchedulerConfig::load("/nonexistent/scheduler.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
