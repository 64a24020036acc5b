//! Faction identity and ownership storage.
//!
//! ## FactionId
//!
//! Type-safe faction identifier supporting 1-255 factions.
//!
//! ## FactionMap
//!
//! Dense per-faction storage backed by `Vec` for O(1) access by `FactionId`.
//! The roster itself is a `FactionMap<Faction>` (aliased as `Factions`).
//!
//! ## Faction
//!
//! A base plus five ownership sets, one per `Holding` category. The union of
//! the sets is always derived, never stored.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::coord::Coord;

/// Faction identifier. Indices are 0-based: the first faction is `FactionId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u8);

impl FactionId {
    /// Create a new faction ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw faction index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all faction IDs for a roster of `count` factions.
    ///
    /// ```
    /// use rust_conquest::core::FactionId;
    ///
    /// let ids: Vec<_> = FactionId::all(3).collect();
    /// assert_eq!(ids, vec![FactionId::new(0), FactionId::new(1), FactionId::new(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = FactionId> {
        (0..count as u8).map(FactionId)
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Faction {}", self.0)
    }
}

/// Per-faction data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionMap<T> {
    data: Vec<T>,
}

impl<T> FactionMap<T> {
    /// Create a map with one entry per faction from a factory function.
    pub fn new(count: usize, factory: impl Fn(FactionId) -> T) -> Self {
        assert!(count > 0, "Must have at least 1 faction");
        assert!(count <= 255, "At most 255 factions supported");

        Self {
            data: (0..count as u8).map(|i| factory(FactionId(i))).collect(),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(count, |_| value.clone())
    }

    /// Number of factions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a map holds at least one faction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a faction's entry.
    #[must_use]
    pub fn get(&self, id: FactionId) -> &T {
        &self.data[id.index()]
    }

    /// Get a faction's entry mutably.
    pub fn get_mut(&mut self, id: FactionId) -> &mut T {
        &mut self.data[id.index()]
    }

    /// Iterate over (FactionId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FactionId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (FactionId(i as u8), v))
    }

    /// Iterate over (FactionId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FactionId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (FactionId(i as u8), v))
    }

    /// Iterate over all faction IDs.
    pub fn ids(&self) -> impl Iterator<Item = FactionId> {
        FactionId::all(self.data.len())
    }
}

impl<T> Index<FactionId> for FactionMap<T> {
    type Output = T;

    fn index(&self, id: FactionId) -> &Self::Output {
        self.get(id)
    }
}

impl<T> IndexMut<FactionId> for FactionMap<T> {
    fn index_mut(&mut self, id: FactionId) -> &mut Self::Output {
        self.get_mut(id)
    }
}

/// The faction roster.
pub type Factions = FactionMap<Faction>;

impl FactionMap<Faction> {
    /// Build the roster from already-constructed factions.
    ///
    /// Faction `i` of the vector becomes `FactionId(i)`.
    ///
    /// # Panics
    ///
    /// Panics if the roster is empty, larger than 255, or two factions share a base.
    #[must_use]
    pub fn from_factions(factions: Vec<Faction>) -> Self {
        assert!(!factions.is_empty(), "Must have at least 1 faction");
        assert!(factions.len() <= 255, "At most 255 factions supported");

        let mut bases = FxHashSet::default();
        for faction in &factions {
            assert!(
                bases.insert(faction.base),
                "Two factions share base {}",
                faction.base
            );
        }

        Self { data: factions }
    }

    /// Factions that are still alive.
    pub fn living(&self) -> impl Iterator<Item = (FactionId, &Faction)> {
        self.iter().filter(|(_, f)| f.is_alive())
    }
}

/// Ownership category of a captured cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holding {
    /// Plain captured ground.
    Territory,
    /// Fortified cell. Towers, bridges and portals are also fortresses.
    Fortress,
    /// Captured watchtower (extended vision).
    Tower,
    /// Bridge built or captured over water.
    Bridge,
    /// Captured portal endpoint.
    Portal,
}

impl Holding {
    /// All categories in storage order.
    pub const ALL: [Holding; 5] = [
        Holding::Territory,
        Holding::Fortress,
        Holding::Tower,
        Holding::Bridge,
        Holding::Portal,
    ];

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Holding::Territory => "territory",
            Holding::Fortress => "fortress",
            Holding::Tower => "tower",
            Holding::Bridge => "bridge",
            Holding::Portal => "portal",
        }
    }

    /// Fortress-tier categories: everything stronger than plain territory.
    #[must_use]
    pub const fn is_fortress_tier(self) -> bool {
        !matches!(self, Holding::Territory)
    }
}

/// A faction: base, living flag and five ownership sets.
#[derive(Clone, Debug)]
pub struct Faction {
    /// Display name, used in event messages.
    pub name: String,
    /// Home cell. Losing it is terminal.
    pub base: Coord,
    alive: bool,
    territory: FxHashSet<Coord>,
    fortresses: FxHashSet<Coord>,
    towers: FxHashSet<Coord>,
    bridges: FxHashSet<Coord>,
    portals: FxHashSet<Coord>,
}

impl Faction {
    /// Create a living faction holding only its base.
    pub fn new(name: impl Into<String>, base: Coord) -> Self {
        Self {
            name: name.into(),
            base,
            alive: true,
            territory: FxHashSet::default(),
            fortresses: FxHashSet::default(),
            towers: FxHashSet::default(),
            bridges: FxHashSet::default(),
            portals: FxHashSet::default(),
        }
    }

    /// Add `coord` to a category at construction time.
    #[must_use]
    pub fn with(mut self, holding: Holding, coord: Coord) -> Self {
        self.insert(holding, coord);
        self
    }

    /// Whether the faction still plays.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the faction as defeated. There is no way back.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// The ownership set for a category.
    #[must_use]
    pub fn holdings(&self, holding: Holding) -> &FxHashSet<Coord> {
        match holding {
            Holding::Territory => &self.territory,
            Holding::Fortress => &self.fortresses,
            Holding::Tower => &self.towers,
            Holding::Bridge => &self.bridges,
            Holding::Portal => &self.portals,
        }
    }

    fn holdings_mut(&mut self, holding: Holding) -> &mut FxHashSet<Coord> {
        match holding {
            Holding::Territory => &mut self.territory,
            Holding::Fortress => &mut self.fortresses,
            Holding::Tower => &mut self.towers,
            Holding::Bridge => &mut self.bridges,
            Holding::Portal => &mut self.portals,
        }
    }

    /// Territory cells.
    #[must_use]
    pub fn territory(&self) -> &FxHashSet<Coord> {
        &self.territory
    }

    /// Fortress cells (includes towers, bridges and portals captured as fortresses).
    #[must_use]
    pub fn fortresses(&self) -> &FxHashSet<Coord> {
        &self.fortresses
    }

    /// Tower cells.
    #[must_use]
    pub fn towers(&self) -> &FxHashSet<Coord> {
        &self.towers
    }

    /// Bridge cells.
    #[must_use]
    pub fn bridges(&self) -> &FxHashSet<Coord> {
        &self.bridges
    }

    /// Portal cells.
    #[must_use]
    pub fn portals(&self) -> &FxHashSet<Coord> {
        &self.portals
    }

    /// Add `coord` to a category.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is the faction's own base; the base is never a holding.
    pub fn insert(&mut self, holding: Holding, coord: Coord) {
        assert!(
            coord != self.base,
            "{} cannot hold its own base {} as {}",
            self.name,
            coord,
            holding.name()
        );
        self.holdings_mut(holding).insert(coord);
    }

    /// Remove `coord` from a category. Returns true if it was present.
    pub fn remove(&mut self, holding: Holding, coord: Coord) -> bool {
        self.holdings_mut(holding).remove(&coord)
    }

    /// Whether `coord` is in the given category.
    #[must_use]
    pub fn holds(&self, holding: Holding, coord: Coord) -> bool {
        self.holdings(holding).contains(&coord)
    }

    /// Remove `coord` from every category. Returns true if anything was removed.
    pub fn strip(&mut self, coord: Coord) -> bool {
        let mut removed = false;
        for holding in Holding::ALL {
            removed |= self.remove(holding, coord);
        }
        removed
    }

    /// Whether `coord` is in any category.
    #[must_use]
    pub fn has_holding(&self, coord: Coord) -> bool {
        Holding::ALL.iter().any(|h| self.holds(*h, coord))
    }

    /// Base or any holding.
    #[must_use]
    pub fn owns(&self, coord: Coord) -> bool {
        coord == self.base || self.has_holding(coord)
    }

    /// Union of all holdings plus the base.
    #[must_use]
    pub fn owned_cells(&self) -> FxHashSet<Coord> {
        let mut cells: FxHashSet<Coord> = Holding::ALL
            .iter()
            .flat_map(|h| self.holdings(*h).iter().copied())
            .collect();
        cells.insert(self.base);
        cells
    }

    /// Base, territory and fortresses: the cells that count as presence on the map.
    #[must_use]
    pub fn core_cells(&self) -> FxHashSet<Coord> {
        let mut cells: FxHashSet<Coord> = self
            .territory
            .iter()
            .chain(self.fortresses.iter())
            .copied()
            .collect();
        cells.insert(self.base);
        cells
    }

    /// Military power: territory plus fortresses.
    #[must_use]
    pub fn power(&self) -> usize {
        self.territory.len() + self.fortresses.len()
    }

    /// Score: territory plus every holding.
    #[must_use]
    pub fn score(&self) -> usize {
        self.territory.len()
            + Holding::ALL
                .iter()
                .filter(|h| h.is_fortress_tier())
                .map(|h| self.holdings(*h).len())
                .sum::<usize>()
    }

    /// One-line human-readable status.
    #[must_use]
    pub fn summary(&self) -> String {
        let state = if self.alive { "ALIVE" } else { "DEAD" };
        format!(
            "{} ({}) | Territory: {} | F:{} B:{} T:{} P:{}",
            self.name,
            state,
            self.territory.len(),
            self.fortresses.len(),
            self.bridges.len(),
            self.towers.len(),
            self.portals.len(),
        )
    }
}
