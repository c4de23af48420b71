/*
boards.rs

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

//! Built-in boards.
//!
//! For developers: add new boards to the [`BOARDS`] list.

use std::collections::HashMap;

use super::board::HarborType;
use super::board_parse::BoardTemplate;

/// Base game board with the recommended beginner layout.
const BASE_LAYOUT: &str = "
  m p f
 g h p h
g f d f m
 f m g p
  h g p
";

const BASE_NUMBERS: [u8; 18] = [10, 2, 9, 12, 6, 4, 10, 9, 11, 3, 8, 8, 3, 4, 5, 5, 6, 11];

/// Base game board surrounded by the sea frame and its nine harbors.
const HARBORS_LAYOUT: &str = "
   * s * s
  s m p f *
 * g h p h s
s g f d f m *
 * f m g p s
  s h g p *
   * s * s
";

const HARBORS: [HarborType; 9] = [
    HarborType::Generic,
    HarborType::Grain,
    HarborType::Ore,
    HarborType::Lumber,
    HarborType::Generic,
    HarborType::Brick,
    HarborType::Wool,
    HarborType::Generic,
    HarborType::Generic,
];

/// The desert stays in the center, the six slots around it keep their number tokens.
const ANCHORED_LAYOUT: &str = "
  m p f
 g h p h
g f D f m
 f m g p
  h g p
";

/// Inner ring around the desert.
const ANCHORED_GROUPS: [(usize, usize); 6] = [(4, 1), (5, 1), (8, 1), (10, 1), (13, 1), (14, 1)];

/// No 6 or 8 on the corners.
const ANCHORED_CORNER_CAPS: [(usize, u8); 6] = [(0, 4), (2, 4), (7, 4), (11, 4), (16, 4), (18, 4)];

/// Return the built-in boards indexed by name.
pub fn board_map() -> HashMap<String, BoardTemplate> {
    BOARDS.iter().map(|b| (b.name.to_string(), b.clone())).collect()
}

/// Built-in boards.
pub const BOARDS: [BoardTemplate; 3] = [
    BoardTemplate {
        name: "base",
        description: "Base game, 19 land slots, no harbors",
        layout: BASE_LAYOUT,
        numbers: &BASE_NUMBERS,
        harbors: &[],
        groups: &[],
        pinned_number_groups: &[],
        min_pips_by_type: &[],
        max_pips_by_type: &[],
        max_pips_per_slot: &[],
    },
    BoardTemplate {
        name: "harbors",
        description: "Base game in its sea frame, with 9 harbors",
        layout: HARBORS_LAYOUT,
        numbers: &BASE_NUMBERS,
        harbors: &HARBORS,
        groups: &[],
        pinned_number_groups: &[],
        min_pips_by_type: &[],
        max_pips_by_type: &[],
        max_pips_per_slot: &[],
    },
    BoardTemplate {
        name: "anchored",
        description: "Base game, desert in the center, pinned numbers around it",
        layout: ANCHORED_LAYOUT,
        numbers: &BASE_NUMBERS,
        harbors: &[],
        groups: &ANCHORED_GROUPS,
        pinned_number_groups: &[1],
        min_pips_by_type: &[],
        max_pips_by_type: &[],
        max_pips_per_slot: &ANCHORED_CORNER_CAPS,
    },
];
