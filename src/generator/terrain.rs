/*
terrain.rs

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

//! Terrain stage: shuffle the tiles so that no group of connected slots sharing the same terrain
//! is larger than the user's limit.

use log::debug;
use rand::Rng;

use super::board::{BoardGraph, Slot, TerrainType};
use super::constraints::{NumericConstraints, ShuffleSettings};
use super::hex_group::{DomainMode, HexGroupSet};
use super::shuffle::ShuffleError;

/// Shuffle the terrain of the non-fixed slots in place.
///
/// A tile carries its number token along; the harbor, the group, and the fixed flag belong to the
/// position and do not move.
///
/// Fixed land slots are visited in the same decreasing order as the other slots. They cannot
/// receive another tile, but the group of like terrain they belong to is still measured, and a
/// group that is too large restarts the pass.
///
/// Return the number of times the pass restarted.
///
/// # Errors
///
/// [`ShuffleError::Terrain`] when the pass restarted more than
/// [`ShuffleSettings::max_retries`] times.
pub fn shuffle_terrain<R: Rng + ?Sized>(
    tiles: &mut [Slot],
    board: &BoardGraph,
    numeric: &NumericConstraints,
    settings: &ShuffleSettings,
    rng: &mut R,
) -> Result<usize, ShuffleError> {
    let mut domain: HexGroupSet = HexGroupSet::new(tiles, DomainMode::Terrain);
    debug!("Terrain: {} domains", domain.num_groups());

    // Highest index first
    let fixed: Vec<usize> = (0..tiles.len())
        .rev()
        .filter(|&i| tiles[i].fixed && tiles[i].terrain != TerrainType::Sea)
        .collect();
    let mut next_fixed: usize = 0;
    let mut retries: usize = 0;

    loop {
        let current: Option<usize> = domain.frontier();
        // A fixed slot is final as soon as the frontier is below it
        let fixed_slot: Option<usize> = fixed
            .get(next_fixed)
            .copied()
            .filter(|&f| current.is_none_or(|s| f > s));

        let (slot, placed): (usize, bool) = match (fixed_slot, current) {
            (Some(f), _) => {
                let fits: bool = !numeric.limits_like_terrain()
                    || like_terrain_within(tiles, board, f, numeric.max_connected_like_terrain);
                if fits {
                    next_fixed += 1;
                }
                (f, fits)
            }
            (None, Some(s)) => {
                let fits: bool = place_terrain(tiles, board, &domain, s, numeric, settings, rng);
                if fits {
                    domain.advance();
                }
                (s, fits)
            }
            (None, None) => break,
        };
        if placed {
            continue;
        }

        retries += 1;
        if retries > settings.max_retries {
            debug!("Terrain: giving up after {retries} restarts");
            return Err(ShuffleError::Terrain { retries });
        }
        if retries % 1000 == 0 {
            debug!("Terrain: {retries} restarts (stuck at slot {slot})");
        }
        domain.reset();
        next_fixed = 0;
    }
    debug!("Terrain: done after {retries} restarts");
    Ok(retries)
}

/// Try to put an acceptable tile in the given slot.
fn place_terrain<R: Rng + ?Sized>(
    tiles: &mut [Slot],
    board: &BoardGraph,
    domain: &HexGroupSet,
    slot: usize,
    numeric: &NumericConstraints,
    settings: &ShuffleSettings,
    rng: &mut R,
) -> bool {
    for _ in 0..settings.attempts_per_slot {
        let candidate: usize = domain.random_candidate(rng);
        swap_tiles(tiles, slot, candidate);

        if !numeric.limits_like_terrain()
            || tiles[slot].terrain == TerrainType::Sea
            || like_terrain_within(tiles, board, slot, numeric.max_connected_like_terrain)
        {
            return true;
        }
    }
    false
}

/// Exchange the terrain and the number token of two slots.
fn swap_tiles(tiles: &mut [Slot], a: usize, b: usize) {
    if a == b {
        return;
    }
    let (terrain, number) = (tiles[a].terrain, tiles[a].number);
    tiles[a].terrain = tiles[b].terrain;
    tiles[a].number = tiles[b].number;
    tiles[b].terrain = terrain;
    tiles[b].number = number;
}

/// Whether the connected group of slots sharing the terrain of `slot` has at most `bound` slots.
///
/// Only finalized slots (above `slot`) and fixed slots are counted: the other slots below `slot`
/// are still going to change.
fn like_terrain_within(tiles: &[Slot], board: &BoardGraph, slot: usize, bound: usize) -> bool {
    let terrain: TerrainType = tiles[slot].terrain;
    let mut visited: Vec<bool> = vec![false; tiles.len()];
    let mut stack: Vec<usize> = vec![slot];
    let mut size: usize = 1;

    visited[slot] = true;
    while let Some(i) = stack.pop() {
        for &j in &board.neighbors[i] {
            if visited[j] || tiles[j].terrain != terrain || (j < slot && !tiles[j].fixed) {
                continue;
            }
            visited[j] = true;
            size += 1;
            if size > bound {
                return false;
            }
            stack.push(j);
        }
    }
    true
}
