// Budget calculator: how many new construction orders a territory may
// submit this tick.
//
// The budget adapts to the territory's economy. Builders raise throughput
// (one extra order per `builders_per_extra_order` units on top of the
// baseline). The result is then scaled by two energy signals:
//
//   energy_ratio  = available / capacity, clamped to [0, 1]
//   stored_factor = stored / stored_energy_reference,
//                   clamped to [stored_factor_min, stored_factor_max]
//   scaled        = trunc(base * (0.5 + 0.5 * energy_ratio) * stored_factor)
//
// and clamped to the per-tier ceiling from `BudgetConfig::tier_ceilings`,
// which bounds world mutation cost even when every signal is saturated.
// A territory that can build at all always gets at least one attempt, and
// no territory may exceed the remaining global headroom.
//
// The heuristic is tunable. Its fixed properties: non-decreasing in
// builders and in both energy signals (below the tier ceiling), never
// negative, never above the global headroom.
//
// See also: `config.rs` for `BudgetConfig`, `executor.rs` for where the
// budget is spent, `colony.rs` for how headroom is shared between
// territories.

use crate::config::{BudgetConfig, SchedulerConfig};
use crate::query::{EnergyLevels, WorldView};
use crate::types::TerritoryId;

/// The live economic and population readings the budget depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerritorySignals {
    pub tier: u8,
    pub builders: u32,
    pub energy: EnergyLevels,
}

impl TerritorySignals {
    /// Read builder count and energy levels for `territory` from the world.
    pub fn observe<W: WorldView + ?Sized>(world: &W, territory: &TerritoryId, tier: u8) -> Self {
        Self {
            tier,
            builders: world.builders(territory),
            energy: world.energy(territory),
        }
    }
}

/// Orders that may still be outstanding globally before the scheduler must
/// stop: `max(0, hard ceiling - safety buffer - outstanding)`.
pub fn remaining_global(config: &SchedulerConfig, outstanding: u32) -> u32 {
    config.effective_order_ceiling().saturating_sub(outstanding)
}

/// Available spawn energy as a fraction of capacity. Zero capacity reads as
/// an empty territory.
pub fn energy_ratio(energy: &EnergyLevels) -> f64 {
    if energy.capacity == 0 {
        return 0.0;
    }
    (f64::from(energy.available) / f64::from(energy.capacity)).min(1.0)
}

/// Throughput multiplier from long-term storage.
pub fn stored_factor(stored: u32, config: &BudgetConfig) -> f64 {
    (f64::from(stored) / config.stored_energy_reference)
        .max(config.stored_factor_min)
        .min(config.stored_factor_max)
}

/// Orders this territory may submit this tick, capped at `global_headroom`.
pub fn budget(signals: &TerritorySignals, global_headroom: u32, config: &BudgetConfig) -> u32 {
    let base = config
        .baseline_orders_per_tick
        .saturating_add(signals.builders / config.builders_per_extra_order.max(1));

    let scale = (0.5 + 0.5 * energy_ratio(&signals.energy))
        * stored_factor(signals.energy.stored, config);
    let scaled = (f64::from(base) * scale) as u32;

    scaled
        .min(config.ceiling_for(signals.tier))
        .max(1)
        .min(global_headroom)
}
