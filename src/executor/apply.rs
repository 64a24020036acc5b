use tracing::{debug, info};

use crate::core::{Coord, FactionId, Holding, Terrain, TurnContext};
use crate::rules::BuildResult;

/// Which branch a capture took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureKind {
    /// A living faction's base fell; that faction is now dead.
    BaseFall {
        /// The defeated faction.
        defeated: FactionId,
    },
    /// A portal endpoint (and its linked partner, if any) changed hands.
    Portal {
        /// The partner endpoint captured in the same move.
        linked: Option<Coord>,
    },
    /// A tower became a tower + fortress holding.
    Tower,
    /// Water was bridged.
    BridgeBuilt,
    /// The cell became a fortress (bridge membership included on bridge terrain).
    Fortress,
    /// The cell became plain territory.
    Territory,
}

/// Applies validated captures.
pub struct MoveExecutor;

impl MoveExecutor {
    /// Apply `result` for `target` on behalf of `ctx.acting`.
    ///
    /// Ownership transfer is always remove-then-add; a cell never belongs to
    /// two factions at once.
    pub fn apply(target: Coord, result: &BuildResult, ctx: &mut TurnContext<'_>) -> CaptureKind {
        let terrain = ctx.world.terrain(target);
        let is_water = terrain == Some(Terrain::Water);
        let is_bridge = terrain == Some(Terrain::Bridge);
        let is_portal = terrain == Some(Terrain::Portal);
        let is_mountain = terrain == Some(Terrain::Mountain);
        let is_tower = ctx.world.is_tower(target);

        let living_owner = result.owner.filter(|owner| ctx.factions[*owner].is_alive());

        let kind = if let Some(owner) = living_owner {
            if target == ctx.factions[owner].base {
                Self::topple_base(target, owner, ctx)
            } else {
                Self::strip(owner, target, ctx);
                if is_portal {
                    Self::capture_portal(target, ctx)
                } else if is_tower {
                    Self::capture_tower(target, ctx)
                } else {
                    Self::fortify(target, is_bridge, ctx);
                    CaptureKind::Fortress
                }
            }
        } else {
            Self::purge_dead(target, ctx);
            if is_water {
                ctx.world.build_bridge(target);
                ctx.factions[ctx.acting].insert(Holding::Bridge, target);
                Self::add_fortress(target, true, ctx);
                CaptureKind::BridgeBuilt
            } else if is_tower {
                Self::capture_tower(target, ctx)
            } else if is_portal {
                Self::capture_portal(target, ctx)
            } else if result.is_fortress || is_bridge {
                Self::fortify(target, is_bridge, ctx);
                CaptureKind::Fortress
            } else {
                ctx.factions[ctx.acting].insert(Holding::Territory, target);
                CaptureKind::Territory
            }
        };

        if is_mountain && ctx.flags.mountain_efficiency {
            ctx.ledger.mountain_discounts.insert(target);
        }

        debug!(
            faction = %ctx.factions[ctx.acting].name,
            %target,
            ?kind,
            cost = result.cost,
            "capture applied"
        );
        kind
    }

    fn topple_base(target: Coord, owner: FactionId, ctx: &mut TurnContext<'_>) -> CaptureKind {
        ctx.factions[owner].kill();
        Self::add_fortress(target, false, ctx);

        let name = ctx.factions[owner].name.clone();
        info!(defeated = %name, by = %ctx.factions[ctx.acting].name, "faction defeated");
        ctx.events.push(format!("{} DEFEATED!", name));

        CaptureKind::BaseFall { defeated: owner }
    }

    fn fortify(target: Coord, is_bridge: bool, ctx: &mut TurnContext<'_>) {
        if is_bridge {
            ctx.factions[ctx.acting].insert(Holding::Bridge, target);
        }
        Self::add_fortress(target, true, ctx);
    }

    fn capture_tower(target: Coord, ctx: &mut TurnContext<'_>) -> CaptureKind {
        ctx.world.remove_tower(target);
        ctx.factions[ctx.acting].insert(Holding::Tower, target);
        Self::add_fortress(target, true, ctx);

        if ctx.ledger.captured_towers.insert(target) {
            let name = ctx.factions[ctx.acting].name.to_uppercase();
            ctx.events.push(format!("{} CAPTURED TOWER!", name));
        }
        CaptureKind::Tower
    }

    /// Both endpoints change owner in this one call.
    ///
    /// A partner that is a living faction's base (the actor's own included)
    /// stays where it is; bases only fall through a direct capture.
    fn capture_portal(target: Coord, ctx: &mut TurnContext<'_>) -> CaptureKind {
        Self::claim_portal_endpoint(target, ctx);

        let linked = ctx.world.linked_portal(target);
        if let Some(partner) = linked {
            let is_living_base = ctx.factions.living().any(|(_, f)| f.base == partner);
            if !is_living_base {
                Self::claim_portal_endpoint(partner, ctx);
            }
        }
        CaptureKind::Portal { linked }
    }

    fn claim_portal_endpoint(coord: Coord, ctx: &mut TurnContext<'_>) {
        let others: Vec<FactionId> = ctx.factions.ids().filter(|id| *id != ctx.acting).collect();
        for other in others {
            Self::strip(other, coord, ctx);
        }

        ctx.factions[ctx.acting].insert(Holding::Portal, coord);
        Self::add_fortress(coord, true, ctx);

        if let Some(entry) = ctx.world.portal_mut(coord) {
            entry.owner = Some(ctx.acting);
        }
    }

    /// Lazy cleanup of stale holdings left by defeated factions.
    fn purge_dead(target: Coord, ctx: &mut TurnContext<'_>) {
        let dead: Vec<FactionId> = ctx
            .factions
            .iter()
            .filter(|(_, f)| !f.is_alive())
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            Self::strip(id, target, ctx);
        }
    }

    /// Idempotent: removes `coord` from all five sets and drops its age entry.
    fn strip(faction: FactionId, coord: Coord, ctx: &mut TurnContext<'_>) {
        ctx.factions[faction].strip(coord);
        ctx.ledger.fortress_ages.remove(&coord);
    }

    fn add_fortress(coord: Coord, track_age: bool, ctx: &mut TurnContext<'_>) {
        ctx.factions[ctx.acting].insert(Holding::Fortress, coord);
        if track_age && ctx.flags.classic {
            ctx.ledger.fortress_ages.insert(coord, ctx.round);
        }
    }
}
