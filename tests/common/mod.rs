/*
mod.rs

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

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use hexshuffle::generator::board::{BoardGraph, Slot, TerrainType};
use hexshuffle::generator::board_parse::BoardTemplate;
use hexshuffle::generator::boards;

/// Build one of the built-in boards.
pub fn board(name: &str) -> BoardGraph {
    boards::board_map()[name].build().unwrap()
}

/// Build a board from an ASCII-art layout without harbors or annotations.
pub fn custom_board(layout: &'static str, numbers: &'static [u8]) -> BoardGraph {
    BoardTemplate {
        name: "custom",
        description: "",
        layout,
        numbers,
        harbors: &[],
        groups: &[],
        pinned_number_groups: &[],
        min_pips_by_type: &[],
        max_pips_by_type: &[],
        max_pips_per_slot: &[],
    }
    .build()
    .unwrap()
}

/// Sorted terrain of the tiles.
pub fn terrain_multiset(tiles: &[Slot]) -> Vec<TerrainType> {
    let mut t: Vec<TerrainType> = tiles.iter().map(|s| s.terrain).collect();
    t.sort();
    t
}

/// Sorted number tokens of the tiles.
pub fn token_multiset(tiles: &[Slot]) -> Vec<u8> {
    let mut t: Vec<u8> = tiles.iter().filter_map(|s| s.number).collect();
    t.sort_unstable();
    t
}

/// Pairs of adjacent slots, each pair once.
pub fn adjacent_pairs(board: &BoardGraph) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, neighbors) in board.neighbors.iter().enumerate() {
        for &j in neighbors {
            if j > i {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Whether two adjacent slots hold tokens that match the predicate.
pub fn has_adjacent(tiles: &[Slot], board: &BoardGraph, pred: impl Fn(u8, u8) -> bool) -> bool {
    adjacent_pairs(board)
        .into_iter()
        .any(|(i, j)| match (tiles[i].number, tiles[j].number) {
            (Some(a), Some(b)) => pred(a, b),
            _ => false,
        })
}

pub fn six_eight(a: u8, b: u8) -> bool {
    matches!(a, 6 | 8) && matches!(b, 6 | 8)
}

pub fn two_twelve(a: u8, b: u8) -> bool {
    matches!(a, 2 | 12) && matches!(b, 2 | 12)
}

pub fn equal(a: u8, b: u8) -> bool {
    a == b
}

/// Size of the largest group of connected land slots with the same terrain.
pub fn largest_like_terrain(tiles: &[Slot], board: &BoardGraph) -> usize {
    let mut seen: Vec<bool> = vec![false; tiles.len()];
    let mut largest: usize = 0;
    for start in 0..tiles.len() {
        if seen[start] || tiles[start].terrain == TerrainType::Sea {
            continue;
        }
        seen[start] = true;
        let mut stack: Vec<usize> = vec![start];
        let mut size: usize = 0;
        while let Some(i) = stack.pop() {
            size += 1;
            for &j in &board.neighbors[i] {
                if !seen[j] && tiles[j].terrain == tiles[start].terrain {
                    seen[j] = true;
                    stack.push(j);
                }
            }
        }
        largest = largest.max(size);
    }
    largest
}

/// Pip sums of every corner shared by three slots.
pub fn vertex_sums(tiles: &[Slot], board: &BoardGraph) -> Vec<u8> {
    let mut sums: Vec<u8> = Vec::new();
    for (i, j) in adjacent_pairs(board) {
        for &k in &board.neighbors[j] {
            if k > j && board.neighbors[i].contains(&k) {
                sums.push(tiles[i].pips() + tiles[j].pips() + tiles[k].pips());
            }
        }
    }
    sums
}
