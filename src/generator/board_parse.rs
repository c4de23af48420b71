/*
board_parse.rs

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

//! Compile an "ASCII art" board template into a [`BoardGraph`].
//!
//! The template describes the board with one character per slot:
//!
//! ```text
//!   m p f
//!  g h p h
//! g f d f m
//!  f m g p
//!   h g p
//! ```
//!
//! Slots of the same row are two columns apart, and each row is shifted by one column from the
//! row above. Slot indexes follow the reading order (left to right, top to bottom).
//!
//! - `h`, `f`, `m`, `g`, `p`, `o`, `d`, and `s` are hills, forest, mountains, fields, pasture,
//!   gold, desert, and sea. An uppercase letter marks a fixed slot. Sea slots are always fixed.
//! - `*` is a sea slot with a harbor, and `#` is a sea slot with a fixed harbor.
//! - All other characters are ignored (background).

use log::{Level, debug, log_enabled};
use std::collections::{BTreeMap, HashMap};

use super::board::{BoardGraph, GroupId, Harbor, HarborType, Slot, TerrainType};
use super::pips;

/// Definition of a board.
#[derive(Debug, Clone)]
pub struct BoardTemplate {
    /// Name of the board, used on the command line.
    pub name: &'static str,

    /// Short description printed by `--ls`.
    pub description: &'static str,

    /// "ASCII art" layout.
    pub layout: &'static str,

    /// Number tokens of the recommended layout, in slot order, for the slots that produce
    /// resources (not desert, not sea).
    pub numbers: &'static [u8],

    /// Harbor types, in slot order, for the `*` and `#` slots.
    pub harbors: &'static [HarborType],

    /// Group of the given slots.
    pub groups: &'static [(usize, GroupId)],

    /// Groups with pinned number tokens.
    pub pinned_number_groups: &'static [GroupId],

    pub min_pips_by_type: &'static [(TerrainType, u8)],
    pub max_pips_by_type: &'static [(TerrainType, u8)],

    /// Pip cap of the given slots. The other slots are capped at 5.
    pub max_pips_per_slot: &'static [(usize, u8)],
}

/// Position of the slot in the template.
#[derive(Debug, Copy, Clone)]
struct Cell {
    x: usize,
    y: usize,
}

impl BoardTemplate {
    /// Parse the template and build its board graph.
    ///
    /// # Errors
    ///
    /// The method returns an error when the template is inconsistent: isolated slot, wrong
    /// number of number tokens or harbors, invalid token, or group annotation for a slot that
    /// does not exist.
    pub fn build(&self) -> Result<BoardGraph, String> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut cells: Vec<Cell> = Vec::new();
        let mut coordinates: HashMap<(usize, usize), usize> = HashMap::new();
        let mut numbers = self.numbers.iter();
        let mut harbors = self.harbors.iter();

        for (y, row) in self
            .layout
            .lines()
            .filter(|r| !r.trim().is_empty())
            .enumerate()
        {
            for (x, c) in row.chars().enumerate() {
                let mut slot: Slot = match c {
                    '*' | '#' => {
                        let kind: HarborType = *harbors.next().ok_or_else(|| {
                            format!("{}: not enough harbors for the template", self.name)
                        })?;
                        let mut s: Slot = Slot::new(TerrainType::Sea, None);
                        s.harbor = Some(Harbor {
                            kind,
                            fixed: c == '#',
                        });
                        s
                    }
                    _ => match TerrainType::from_char(c) {
                        Some(terrain) => {
                            let mut s: Slot = Slot::new(terrain, None);
                            s.fixed = s.fixed || c.is_ascii_uppercase();
                            s
                        }
                        None => continue,
                    },
                };

                if slot.terrain.produces() {
                    let number: u8 = *numbers.next().ok_or_else(|| {
                        format!("{}: not enough number tokens for the template", self.name)
                    })?;
                    if !pips::is_valid_token(number) {
                        return Err(format!("{}: invalid number token {number}", self.name));
                    }
                    slot.number = Some(number);
                }

                coordinates.insert((x, y), slots.len());
                cells.push(Cell { x, y });
                slots.push(slot);
            }
        }

        if numbers.next().is_some() {
            return Err(format!("{}: too many number tokens", self.name));
        }
        if harbors.next().is_some() {
            return Err(format!("{}: too many harbors", self.name));
        }

        let neighbors: Vec<Vec<usize>> = cells
            .iter()
            .map(|cell| Self::adjacent(cell, &coordinates))
            .collect();
        if slots.len() > 1
            && let Some(i) = neighbors.iter().position(Vec::is_empty)
        {
            return Err(format!("{}: slot {i} does not have any neighbors", self.name));
        }

        for &(i, group) in self.groups {
            match slots.get_mut(i) {
                Some(s) => s.group = Some(group),
                None => return Err(format!("{}: no slot {i} for group {group}", self.name)),
            }
        }

        let mut max_pips_per_slot: Vec<u8> = vec![pips::MAX_PIPS; slots.len()];
        for &(i, cap) in self.max_pips_per_slot {
            match max_pips_per_slot.get_mut(i) {
                Some(c) => *c = cap,
                None => return Err(format!("{}: no slot {i} for the pip cap", self.name)),
            }
        }

        let board = BoardGraph {
            recommended_layout: slots,
            neighbors,
            min_pips_by_type: self.min_pips_by_type.iter().copied().collect::<BTreeMap<_, _>>(),
            max_pips_by_type: self.max_pips_by_type.iter().copied().collect::<BTreeMap<_, _>>(),
            max_pips_per_slot,
            pinned_number_groups: self.pinned_number_groups.to_vec(),
        };
        board.validate().map_err(|e| format!("{}: {e}", self.name))?;

        if log_enabled!(Level::Debug) {
            self.debug(&board, &cells);
        }
        Ok(board)
    }

    /// Slots adjacent to the given cell, in increasing order.
    fn adjacent(cell: &Cell, coordinates: &HashMap<(usize, usize), usize>) -> Vec<usize> {
        let (x, y) = (cell.x, cell.y);
        let mut around: Vec<(usize, usize)> = vec![(x + 2, y), (x + 1, y + 1)];
        if x >= 2 {
            around.push((x - 2, y));
        }
        if x >= 1 {
            around.push((x - 1, y + 1));
        }
        if y >= 1 {
            around.push((x + 1, y - 1));
            if x >= 1 {
                around.push((x - 1, y - 1));
            }
        }

        let mut adjacent: Vec<usize> = around
            .iter()
            .filter_map(|c| coordinates.get(c).copied())
            .collect();
        adjacent.sort_unstable();
        adjacent
    }

    /// Print the slot indexes and the recommended layout.
    fn debug(&self, board: &BoardGraph, cells: &[Cell]) {
        debug!("Board {}: {} slots", self.name, board.len());
        let width: usize = cells.iter().map(|c| c.x + 1).max().unwrap_or(0);
        let height: usize = cells.iter().map(|c| c.y + 1).max().unwrap_or(0);
        let mut rows: Vec<String> = vec![" ".repeat(width * 3); height];

        for (i, cell) in cells.iter().enumerate() {
            let s: &mut String = &mut rows[cell.y];
            s.replace_range(cell.x * 3..cell.x * 3 + 3, &format!("{i:^3}"));
        }
        for r in rows {
            debug!("{}", r.trim_end());
        }
        for (i, (slot, adjacent)) in board
            .recommended_layout
            .iter()
            .zip(&board.neighbors)
            .enumerate()
        {
            debug!("{i:>3} {:?} {:?} --> {adjacent:?}", slot.terrain, slot.number);
        }
    }
}
