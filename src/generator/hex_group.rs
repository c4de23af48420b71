/*
hex_group.rs

Copyright 2025 Hervé Quatremain

This file is part of Hexshuffle.

Hexshuffle is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hexshuffle is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hexshuffle. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Shuffle domains.
//!
//! Every shuffle stage is a backward Fisher-Yates pass: the slots are visited from the highest
//! index to the lowest, and each visited slot receives the content of a random slot that has not
//! been finalized yet. The index of the visited slot is the *frontier* of the domain: slots above
//! it are final, slots at or below it can still move.
//!
//! A [`HexGroup`] is one such domain. Slots that belong to a group only exchange their content
//! with slots of the same group, so a [`HexGroupSet`] keeps one [`HexGroup`] per group and
//! always works on the group with the largest frontier. This way the slots of the whole board are
//! visited in one strictly decreasing order, whatever their group.

use rand::Rng;
use std::collections::BTreeMap;

use super::board::{GroupId, Slot};

/// Which slots take part in a shuffle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DomainMode {
    /// Terrain shuffle: fixed slots are excluded.
    Terrain,

    /// Number shuffle: slots without a number token are excluded.
    Numbers,
}

impl DomainMode {
    fn accepts(self, slot: &Slot) -> bool {
        match self {
            DomainMode::Terrain => !slot.fixed,
            DomainMode::Numbers => slot.number.is_some(),
        }
    }
}

/// One shuffle domain.
#[derive(Debug, Clone)]
pub struct HexGroup {
    /// Slot indexes of the domain, in increasing order.
    indexes: Vec<usize>,

    /// Position of the frontier in [`HexGroup::indexes`]. `None` when every slot is final.
    cursor: Option<usize>,
}

impl HexGroup {
    /// Create a domain from the candidate slots that the mode accepts.
    ///
    /// The candidates must be given in increasing order.
    pub fn new(hexes: &[Slot], candidates: &[usize], mode: DomainMode) -> Self {
        let indexes: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| mode.accepts(&hexes[i]))
            .collect();
        debug_assert!(indexes.windows(2).all(|w| w[0] < w[1]));

        let cursor: Option<usize> = indexes.len().checked_sub(1);
        Self { indexes, cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Slot indexes of the domain.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Slot at the frontier, or `None` when the domain is finalized.
    pub fn frontier(&self) -> Option<usize> {
        self.cursor.map(|c| self.indexes[c])
    }

    /// Return a random slot at or below the frontier.
    ///
    /// # Panics
    ///
    /// The domain must not be finalized.
    pub fn random_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let cursor: usize = self
            .cursor
            .expect("Random candidate requested from a finalized domain");
        self.indexes[rng.random_range(0..=cursor)]
    }

    /// Finalize the frontier slot and return the next one.
    pub fn advance(&mut self) -> Option<usize> {
        self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
        self.frontier()
    }

    /// Make every slot of the domain movable again.
    pub fn reset(&mut self) {
        self.cursor = self.indexes.len().checked_sub(1);
    }
}

/// Set of domains, one per group.
#[derive(Debug, Clone)]
pub struct HexGroupSet {
    groups: Vec<HexGroup>,
}

impl HexGroupSet {
    /// Split the slots by group and create one domain per group. Ungrouped slots share a
    /// default domain.
    pub fn new(hexes: &[Slot], mode: DomainMode) -> Self {
        let mut by_group: BTreeMap<Option<GroupId>, Vec<usize>> = BTreeMap::new();
        for (i, slot) in hexes.iter().enumerate() {
            by_group.entry(slot.group).or_default().push(i);
        }

        let groups: Vec<HexGroup> = by_group
            .values()
            .map(|candidates| HexGroup::new(hexes, candidates, mode))
            .filter(|g| !g.is_empty())
            .collect();
        Self { groups }
    }

    /// Number of non-empty domains.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Position, in [`HexGroupSet::groups`], of the group with the largest frontier.
    fn current_group(&self) -> Option<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.frontier().map(|f| (i, f)))
            .max_by_key(|&(_, f)| f)
            .map(|(i, _)| i)
    }

    /// Slot to process next: the largest frontier of all the groups.
    pub fn frontier(&self) -> Option<usize> {
        self.groups.iter().filter_map(HexGroup::frontier).max()
    }

    /// Return a random, not yet finalized, slot of the group that owns the frontier.
    ///
    /// # Panics
    ///
    /// At least one group must not be finalized.
    pub fn random_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let current: usize = self
            .current_group()
            .expect("Random candidate requested from finalized domains");
        self.groups[current].random_candidate(rng)
    }

    /// Finalize the frontier slot and return the next slot to process.
    pub fn advance(&mut self) -> Option<usize> {
        if let Some(current) = self.current_group() {
            self.groups[current].advance();
        }
        self.frontier()
    }

    /// Make every slot of every group movable again.
    pub fn reset(&mut self) {
        for g in &mut self.groups {
            g.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::board::TerrainType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn slots() -> Vec<Slot> {
        // 0 sea, 1..=5 land, 3 without token, 4 and 5 in group 1
        let mut s: Vec<Slot> = vec![
            Slot::new(TerrainType::Sea, None),
            Slot::new(TerrainType::Hills, Some(5)),
            Slot::new(TerrainType::Forest, Some(6)),
            Slot::new(TerrainType::Desert, None),
            Slot::new(TerrainType::Fields, Some(9)),
            Slot::new(TerrainType::Pasture, Some(10)),
        ];
        s[4].group = Some(1);
        s[5].group = Some(1);
        s
    }

    #[test]
    fn filters_by_mode() {
        let s = slots();
        let all: Vec<usize> = (0..s.len()).collect();

        let terrain = HexGroup::new(&s, &all, DomainMode::Terrain);
        assert_eq!(terrain.indexes(), &[1, 2, 3, 4, 5]);

        let numbers = HexGroup::new(&s, &all, DomainMode::Numbers);
        assert_eq!(numbers.indexes(), &[1, 2, 4, 5]);
    }

    #[test]
    fn advance_and_reset() {
        let s = slots();
        let mut g = HexGroup::new(&s, &[1, 2, 4], DomainMode::Numbers);
        assert_eq!(g.frontier(), Some(4));
        assert_eq!(g.advance(), Some(2));
        assert_eq!(g.advance(), Some(1));
        assert_eq!(g.advance(), None);
        assert_eq!(g.advance(), None);
        g.reset();
        assert_eq!(g.frontier(), Some(4));
    }

    #[test]
    fn empty_group() {
        let s = slots();
        let mut g = HexGroup::new(&s, &[0, 3], DomainMode::Numbers);
        assert!(g.is_empty());
        assert_eq!(g.frontier(), None);
        assert_eq!(g.advance(), None);
    }

    #[test]
    fn candidates_stay_below_frontier() {
        let s = slots();
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = HexGroup::new(&s, &[1, 2, 3, 4, 5], DomainMode::Terrain);
        g.advance();
        g.advance();
        for _ in 0..200 {
            let c = g.random_candidate(&mut rng);
            assert!([1, 2, 3].contains(&c));
        }
    }

    #[test]
    #[should_panic]
    fn candidate_from_finalized_group() {
        let s = slots();
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = HexGroup::new(&s, &[1], DomainMode::Terrain);
        g.advance();
        g.random_candidate(&mut rng);
    }

    #[test]
    fn set_visits_in_decreasing_order() {
        let s = slots();
        let mut set = HexGroupSet::new(&s, DomainMode::Terrain);
        assert_eq!(set.num_groups(), 2);

        let mut visited: Vec<usize> = Vec::new();
        let mut current = set.frontier();
        while let Some(i) = current {
            visited.push(i);
            current = set.advance();
        }
        assert_eq!(visited, vec![5, 4, 3, 2, 1]);

        set.reset();
        assert_eq!(set.frontier(), Some(5));
    }

    #[test]
    fn set_candidates_stay_in_group() {
        let s = slots();
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = HexGroupSet::new(&s, DomainMode::Terrain);

        // Frontier 5 belongs to group 1
        for _ in 0..100 {
            assert!([4, 5].contains(&set.random_candidate(&mut rng)));
        }

        // Frontier 3 belongs to the default group
        set.advance();
        set.advance();
        assert_eq!(set.frontier(), Some(3));
        for _ in 0..100 {
            assert!([1, 2, 3].contains(&set.random_candidate(&mut rng)));
        }
    }
}
