// Capacity policy: how many structures of each kind a territory may hold at
// a given development tier.
//
// The table is a total function over `(tier, StructureType)`. Most kinds are
// piecewise by tier and look up a per-kind row below; a kind that is locked
// at a tier simply has a zero entry there. Roads and ramparts are not gated
// by tier at all and return the `Capacity::Practical` sentinel, which
// resolves to `PRACTICAL_CEILING` when compared against counts.
//
// Every row is non-decreasing in tier, so developing a territory never
// lowers a ceiling. Tiers above `MAX_TIER` use the `MAX_TIER` column.
//
// See also: `census.rs` for the built + queued counts compared against these
// ceilings, `executor.rs` for where the check sits in the validation chain.

use crate::types::{MAX_TIER, StructureType};

/// Count used for kinds the world does not meaningfully cap.
pub const PRACTICAL_CEILING: u32 = 2500;

/// Ceiling for one structure kind at one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
    Limited(u32),
    /// Tier-independent; large enough to never bind in practice.
    Practical,
}

impl Capacity {
    pub fn ceiling(self) -> u32 {
        match self {
            Capacity::Limited(n) => n,
            Capacity::Practical => PRACTICAL_CEILING,
        }
    }

    /// Whether one more structure fits when `existing` (built + queued)
    /// already count against the ceiling.
    pub fn allows(self, existing: u32) -> bool {
        existing < self.ceiling()
    }
}

// Rows indexed by tier 0..=8.
const SPAWN: [u32; 9] = [0, 1, 1, 1, 1, 1, 1, 2, 3];
const EXTENSION: [u32; 9] = [0, 0, 5, 10, 20, 30, 40, 50, 60];
const WALL: [u32; 9] = [0, 0, 2500, 2500, 2500, 2500, 2500, 2500, 2500];
const TOWER: [u32; 9] = [0, 0, 0, 1, 1, 2, 2, 3, 6];
const STORAGE: [u32; 9] = [0, 0, 0, 0, 1, 1, 1, 1, 1];
const LINK: [u32; 9] = [0, 0, 0, 0, 0, 2, 3, 4, 6];
const CONTAINER: [u32; 9] = [5, 5, 5, 5, 5, 5, 5, 5, 5];
const EXTRACTOR: [u32; 9] = [0, 0, 0, 0, 0, 0, 1, 1, 1];
const LAB: [u32; 9] = [0, 0, 0, 0, 0, 0, 3, 6, 10];
const TERMINAL: [u32; 9] = [0, 0, 0, 0, 0, 0, 1, 1, 1];
const MAX_TIER_ONLY: [u32; 9] = [0, 0, 0, 0, 0, 0, 0, 0, 1];

/// Ceiling for `kind` at development `tier`.
pub fn capacity(tier: u8, kind: StructureType) -> Capacity {
    let t = tier.min(MAX_TIER) as usize;
    let row = match kind {
        StructureType::Road | StructureType::Rampart => return Capacity::Practical,
        StructureType::Spawn => &SPAWN,
        StructureType::Extension => &EXTENSION,
        StructureType::Wall => &WALL,
        StructureType::Tower => &TOWER,
        StructureType::Storage => &STORAGE,
        StructureType::Link => &LINK,
        StructureType::Container => &CONTAINER,
        StructureType::Extractor => &EXTRACTOR,
        StructureType::Lab => &LAB,
        StructureType::Terminal => &TERMINAL,
        StructureType::Factory
        | StructureType::Observer
        | StructureType::PowerSpawn
        | StructureType::Nuker => &MAX_TIER_ONLY,
    };
    Capacity::Limited(row[t])
}

/// Integer form of `capacity()`.
pub fn limit(tier: u8, kind: StructureType) -> u32 {
    capacity(tier, kind).ceiling()
}
