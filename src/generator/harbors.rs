/*
harbors.rs

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

//! Harbor stage.
//!
//! Harbors only move between harbor positions. Fixed harbors keep their type, the others are
//! shuffled without any constraint.

use rand::Rng;

use super::board::{BoardGraph, Harbor, Slot};

/// Shuffle the harbors of the recommended layout and attach them to the tiles, in slot order.
pub fn shuffle_harbors<R: Rng + ?Sized>(tiles: &mut [Slot], board: &BoardGraph, rng: &mut R) {
    let mut harbors: Vec<Harbor> = board
        .recommended_layout
        .iter()
        .filter_map(|s| s.harbor)
        .collect();
    if harbors.is_empty() {
        return;
    }
    shuffle_unfixed(&mut harbors, rng);

    let mut shuffled = harbors.into_iter();
    for tile in tiles.iter_mut().filter(|t| t.harbor.is_some()) {
        tile.harbor = shuffled.next();
    }
}

/// Fisher-Yates shuffle that leaves the fixed harbors in place.
fn shuffle_unfixed<R: Rng + ?Sized>(harbors: &mut [Harbor], rng: &mut R) {
    for i in (1..harbors.len()).rev() {
        if harbors[i].fixed {
            continue;
        }
        // Terminates: `i` itself is not fixed
        let mut j: usize = rng.random_range(0..=i);
        while harbors[j].fixed {
            j = rng.random_range(0..=i);
        }
        harbors.swap(i, j);
    }
}
