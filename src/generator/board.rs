/*
board.rs

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

//! Board graph: the slots of a board and their adjacency.
//!
//! A [`BoardGraph`] is built once (see [`super::board_parse`]) and is never modified by the
//! shuffle stages, which work on a clone of [`BoardGraph::recommended_layout`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::pips;

/// Identifier of a group of slots that shuffle, or stay pinned, together.
pub type GroupId = usize;

/// Terrain of a slot.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TerrainType {
    Hills,
    Forest,
    Mountains,
    Fields,
    Pasture,
    Gold,
    Desert,
    Sea,
}

impl TerrainType {
    /// Whether a slot of this terrain carries a number token.
    pub fn produces(&self) -> bool {
        !matches!(self, TerrainType::Desert | TerrainType::Sea)
    }

    /// Character used for this terrain in board templates and in the CLI output.
    pub fn to_char(self) -> char {
        match self {
            TerrainType::Hills => 'h',
            TerrainType::Forest => 'f',
            TerrainType::Mountains => 'm',
            TerrainType::Fields => 'g',
            TerrainType::Pasture => 'p',
            TerrainType::Gold => 'o',
            TerrainType::Desert => 'd',
            TerrainType::Sea => 's',
        }
    }

    /// Terrain for a template character, case insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'h' => Some(TerrainType::Hills),
            'f' => Some(TerrainType::Forest),
            'm' => Some(TerrainType::Mountains),
            'g' => Some(TerrainType::Fields),
            'p' => Some(TerrainType::Pasture),
            'o' => Some(TerrainType::Gold),
            'd' => Some(TerrainType::Desert),
            's' => Some(TerrainType::Sea),
            _ => None,
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TerrainType::Hills => write!(f, "Hills"),
            TerrainType::Forest => write!(f, "Forest"),
            TerrainType::Mountains => write!(f, "Mountains"),
            TerrainType::Fields => write!(f, "Fields"),
            TerrainType::Pasture => write!(f, "Pasture"),
            TerrainType::Gold => write!(f, "Gold"),
            TerrainType::Desert => write!(f, "Desert"),
            TerrainType::Sea => write!(f, "Sea"),
        }
    }
}

/// Trade rate offered by a harbor.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HarborType {
    /// Any resource, 3:1.
    Generic,
    Brick,
    Lumber,
    Ore,
    Grain,
    Wool,
}

impl fmt::Display for HarborType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HarborType::Generic => write!(f, "3:1"),
            HarborType::Brick => write!(f, "2:1 brick"),
            HarborType::Lumber => write!(f, "2:1 lumber"),
            HarborType::Ore => write!(f, "2:1 ore"),
            HarborType::Grain => write!(f, "2:1 grain"),
            HarborType::Wool => write!(f, "2:1 wool"),
        }
    }
}

/// Harbor token attached to a slot.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Harbor {
    pub kind: HarborType,

    /// A fixed harbor keeps its type during the harbor stage.
    pub fixed: bool,
}

/// One position on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub terrain: TerrainType,

    /// Number token, `None` for the desert and the sea.
    #[serde(default)]
    pub number: Option<u8>,

    #[serde(default)]
    pub harbor: Option<Harbor>,

    /// The terrain of a fixed slot never moves. Sea slots are always fixed.
    #[serde(default)]
    pub fixed: bool,

    #[serde(default)]
    pub group: Option<GroupId>,
}

impl Slot {
    /// Create a non-fixed, ungrouped slot without harbor.
    pub fn new(terrain: TerrainType, number: Option<u8>) -> Self {
        Self {
            terrain,
            number,
            harbor: None,
            fixed: terrain == TerrainType::Sea,
            group: None,
        }
    }

    /// Pip value of the number token, or `0` when the slot has no token.
    pub fn pips(&self) -> u8 {
        self.number.map_or(0, pips::pips)
    }
}

/// Static description of a board.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BoardGraph {
    /// Slots in left-to-right, top-to-bottom order.
    pub recommended_layout: Vec<Slot>,

    /// `neighbors[i]` lists the slots adjacent to slot `i`.
    pub neighbors: Vec<Vec<usize>>,

    /// Lowest pip value allowed on a slot of the given terrain. Defaults to 1.
    #[serde(default)]
    pub min_pips_by_type: BTreeMap<TerrainType, u8>,

    /// Highest pip value allowed on a slot of the given terrain. Defaults to 5.
    #[serde(default)]
    pub max_pips_by_type: BTreeMap<TerrainType, u8>,

    /// Absolute pip cap for each slot. A missing entry means 5.
    #[serde(default)]
    pub max_pips_per_slot: Vec<u8>,

    /// Groups whose number tokens stay where the recommended layout puts them.
    #[serde(default)]
    pub pinned_number_groups: Vec<GroupId>,
}

impl BoardGraph {
    /// Number of slots.
    pub fn len(&self) -> usize {
        self.recommended_layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommended_layout.is_empty()
    }

    /// Lowest pip value allowed for the given terrain.
    pub fn min_pips(&self, terrain: TerrainType) -> u8 {
        self.min_pips_by_type
            .get(&terrain)
            .copied()
            .unwrap_or(pips::MIN_PIPS)
    }

    /// Highest pip value allowed for the given terrain.
    pub fn max_pips(&self, terrain: TerrainType) -> u8 {
        self.max_pips_by_type
            .get(&terrain)
            .copied()
            .unwrap_or(pips::MAX_PIPS)
    }

    /// Absolute pip cap of the given slot.
    pub fn slot_pip_cap(&self, index: usize) -> u8 {
        self.max_pips_per_slot
            .get(index)
            .copied()
            .unwrap_or(pips::MAX_PIPS)
    }

    /// Whether the number token of the slot must stay in place.
    pub fn is_pinned(&self, index: usize) -> bool {
        self.recommended_layout[index]
            .group
            .is_some_and(|g| self.pinned_number_groups.contains(&g))
    }

    /// Verify the structural preconditions of the board.
    ///
    /// # Errors
    ///
    /// Return a description of the first problem found: a neighbor table that does not match the
    /// slot list, an out-of-range or asymmetric adjacency, an invalid number token, or a sea slot
    /// that is not fixed.
    pub fn validate(&self) -> Result<(), String> {
        let n: usize = self.len();
        if self.neighbors.len() != n {
            return Err(format!(
                "The board has {n} slots but {} neighbor lists",
                self.neighbors.len()
            ));
        }

        let mut edges: HashSet<(usize, usize)> = HashSet::new();
        for (i, adjacent) in self.neighbors.iter().enumerate() {
            for &j in adjacent {
                if j >= n {
                    return Err(format!("Slot {i} has an out-of-range neighbor {j}"));
                }
                if j == i {
                    return Err(format!("Slot {i} is its own neighbor"));
                }
                edges.insert((i, j));
            }
        }
        if let Some((i, j)) = edges.iter().find(|(i, j)| !edges.contains(&(*j, *i))) {
            return Err(format!("Slot {j} does not list slot {i} as a neighbor"));
        }

        for (i, slot) in self.recommended_layout.iter().enumerate() {
            if let Some(number) = slot.number
                && !pips::is_valid_token(number)
            {
                return Err(format!("Slot {i} has an invalid number token {number}"));
            }
            if slot.terrain == TerrainType::Sea && !slot.fixed {
                return Err(format!("Sea slot {i} must be fixed"));
            }
        }
        Ok(())
    }
}
