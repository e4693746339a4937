// Legality checker: can a structure kind be placed on a tile right now?
//
// Rules, in order:
// - The tile must be inside the territory and off the boundary ring.
// - The terrain must not be `Terrain::Wall`.
// - The tile must not carry a pending order of any kind.
// - Ramparts may overlay anything.
// - Roads may share a tile only with other roads and ramparts.
// - Every other kind needs a tile with no structure at all.
//
// The check reads the world on every call. Orders submitted earlier in the
// same pass can change occupancy, so results are never cached.
//
// See also: `query.rs` for the world reads, `executor.rs` which combines
// this with the exact-kind duplicate check.

use crate::query::WorldView;
use crate::types::{StructureType, Terrain, TerritoryId, TileCoord};

/// Whether `kind` may be ordered at `position`.
pub fn placeable<W: WorldView + ?Sized>(
    world: &W,
    territory: &TerritoryId,
    position: TileCoord,
    kind: StructureType,
) -> bool {
    if !position.in_bounds() || position.on_boundary() {
        return false;
    }
    if world.terrain(territory, position) == Terrain::Wall {
        return false;
    }
    if world.order_at(territory, position).is_some() {
        return false;
    }

    match kind {
        StructureType::Rampart => true,
        StructureType::Road => world
            .structures_at(territory, position)
            .iter()
            .all(|s| s.is_overlay()),
        _ => world.structures_at(territory, position).is_empty(),
    }
}

/// Whether the tile already holds a structure or an order of exactly `kind`.
pub fn holds_same_kind<W: WorldView + ?Sized>(
    world: &W,
    territory: &TerritoryId,
    position: TileCoord,
    kind: StructureType,
) -> bool {
    world.order_at(territory, position) == Some(kind)
        || world.structures_at(territory, position).contains(&kind)
}
