/*
numbers.rs

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

//! Number stage: shuffle the number tokens of a board whose terrain is already placed.
//!
//! A token placed in slot `i` is only checked against the neighbors of `i` with a greater index.
//! Those slots are final when `i` is processed, so every adjacency and every vertex is checked
//! exactly once in a single backward pass.

use log::debug;
use rand::Rng;

use super::board::{BoardGraph, Slot};
use super::constraints::{BinaryConstraints, NumericConstraints, ShuffleSettings};
use super::hex_group::{DomainMode, HexGroupSet};
use super::pips;
use super::shuffle::ShuffleError;

/// Shuffle the number tokens in place.
///
/// Slots of the board's pinned groups get their recommended token back and keep it (see
/// [`restore_pinned`]).
///
/// Return the number of times the pass restarted.
///
/// # Errors
///
/// [`ShuffleError::Numbers`] when the pass restarted more than
/// [`ShuffleSettings::max_retries`] times.
pub fn shuffle_numbers<R: Rng + ?Sized>(
    tiles: &mut [Slot],
    board: &BoardGraph,
    binary: &BinaryConstraints,
    numeric: &NumericConstraints,
    settings: &ShuffleSettings,
    rng: &mut R,
) -> Result<usize, ShuffleError> {
    restore_pinned(tiles, board);

    let mut domain: HexGroupSet = HexGroupSet::new(tiles, DomainMode::Numbers);
    let mut retries: usize = 0;
    let mut current: Option<usize> = domain.frontier();

    while let Some(slot) = current {
        let placed: bool = if board.is_pinned(slot) {
            number_fits(tiles, board, binary, numeric, slot, false)
        } else {
            place_number(tiles, board, &domain, slot, binary, numeric, settings, rng)
        };
        if placed {
            current = domain.advance();
            continue;
        }

        retries += 1;
        if retries > settings.max_retries {
            debug!("Numbers: giving up after {retries} restarts");
            return Err(ShuffleError::Numbers { retries });
        }
        if retries % 1000 == 0 {
            debug!("Numbers: {retries} restarts (stuck at slot {slot})");
        }
        domain.reset();
        current = domain.frontier();
    }
    debug!("Numbers: done after {retries} restarts");
    Ok(retries)
}

/// Give the pinned slots their recommended token back.
///
/// The terrain stage moves the tokens with the terrain. The recommended token is exchanged with
/// the slot that received it, so that no token is lost or duplicated. Pinned slots without a
/// token after the terrain stage (desert moved within the group) are left as they are.
pub fn restore_pinned(tiles: &mut [Slot], board: &BoardGraph) {
    for i in 0..tiles.len() {
        let wanted: Option<u8> = board.recommended_layout[i].number;
        if !board.is_pinned(i) || wanted.is_none() || tiles[i].number == wanted {
            continue;
        }
        if tiles[i].number.is_none() {
            debug!(
                "Numbers: pinned slot {i} holds {:?} and cannot take back its token {wanted:?}",
                tiles[i].terrain
            );
            continue;
        }
        let holder: Option<usize> = (0..tiles.len()).find(|&j| {
            j != i
                && tiles[j].number == wanted
                && !(board.is_pinned(j) && tiles[j].number == board.recommended_layout[j].number)
        });
        if let Some(j) = holder {
            tiles[j].number = tiles[i].number;
            tiles[i].number = wanted;
        }
    }
}

/// Try to put an acceptable token in the given slot.
#[allow(clippy::too_many_arguments)]
fn place_number<R: Rng + ?Sized>(
    tiles: &mut [Slot],
    board: &BoardGraph,
    domain: &HexGroupSet,
    slot: usize,
    binary: &BinaryConstraints,
    numeric: &NumericConstraints,
    settings: &ShuffleSettings,
    rng: &mut R,
) -> bool {
    for _ in 0..settings.attempts_per_slot {
        let candidate: usize = domain.random_candidate(rng);
        let number: Option<u8> = tiles[candidate].number;
        tiles[candidate].number = tiles[slot].number;
        tiles[slot].number = number;

        if number_fits(tiles, board, binary, numeric, slot, true) {
            return true;
        }
    }
    false
}

fn is_six_eight(token: u8) -> bool {
    token == 6 || token == 8
}

fn is_two_twelve(token: u8) -> bool {
    token == 2 || token == 12
}

/// Check the token of the slot against the constraints.
///
/// The checks run from the cheapest to the most expensive and stop at the first failure.
/// `check_pips` is `false` for pinned tokens, which cannot be replaced anyway.
pub fn number_fits(
    tiles: &[Slot],
    board: &BoardGraph,
    binary: &BinaryConstraints,
    numeric: &NumericConstraints,
    slot: usize,
    check_pips: bool,
) -> bool {
    let Some(token) = tiles[slot].number else {
        return true;
    };
    let token_pips: u8 = pips::pips(token);

    if check_pips {
        let terrain = tiles[slot].terrain;
        if token_pips < board.min_pips(terrain)
            || token_pips > board.max_pips(terrain)
            || token_pips > board.slot_pip_cap(slot)
        {
            return false;
        }
    }

    // Finalized neighbors only
    let mut later: Vec<usize> = board.neighbors[slot]
        .iter()
        .copied()
        .filter(|&j| j > slot)
        .collect();
    later.sort_unstable();

    let later_holds = |pred: &dyn Fn(u8) -> bool| {
        later
            .iter()
            .any(|&j| tiles[j].number.is_some_and(|n| pred(n)))
    };

    if binary.forbid_six_eight_adjacent && is_six_eight(token) && later_holds(&is_six_eight) {
        return false;
    }
    if binary.forbid_two_twelve_adjacent && is_two_twelve(token) && later_holds(&is_two_twelve) {
        return false;
    }
    if binary.forbid_equal_adjacent && later_holds(&|n: u8| n == token) {
        return false;
    }

    let vertexes: Vec<(usize, usize)> = match later.as_slice() {
        [low, mid, high] => vec![(*low, *high), (*mid, *high)],
        [a, b] => vec![(*a, *b)],
        _ => Vec::new(),
    };
    vertexes.iter().all(|&(a, b)| {
        token_pips + tiles[a].pips() + tiles[b].pips() <= numeric.max_vertex_pip_sum
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::board::TerrainType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Four slots around two vertexes:
    ///
    /// ```text
    ///  0 1
    /// 2 3
    /// ```
    ///
    /// Slot 0 touches 1, 2, and 3; slot 1 touches 0 and 3; slot 2 touches 0 and 3.
    fn diamond(numbers: [u8; 4]) -> (Vec<Slot>, BoardGraph) {
        let tiles: Vec<Slot> = numbers
            .iter()
            .map(|&n| Slot::new(TerrainType::Fields, Some(n)))
            .collect();
        let board = BoardGraph {
            recommended_layout: tiles.clone(),
            neighbors: vec![vec![1, 2, 3], vec![0, 3], vec![0, 3], vec![0, 1, 2]],
            ..Default::default()
        };
        (tiles, board)
    }

    #[test]
    fn six_next_to_eight() {
        let (tiles, board) = diamond([6, 8, 3, 4]);
        let numeric = NumericConstraints::default();
        assert!(!number_fits(
            &tiles,
            &board,
            &BinaryConstraints::default(),
            &numeric,
            0,
            true
        ));
        assert!(number_fits(&tiles, &board, &BinaryConstraints::none(), &numeric, 0, true));
    }

    #[test]
    fn only_later_neighbors_are_checked() {
        let (tiles, board) = diamond([6, 8, 3, 4]);
        // Slot 1 has the 6 at slot 0 as a neighbor, but 0 is not finalized yet
        assert!(number_fits(
            &tiles,
            &board,
            &BinaryConstraints::default(),
            &NumericConstraints::default(),
            1,
            true
        ));
    }

    #[test]
    fn two_next_to_twelve_and_equal_tokens() {
        let numeric = NumericConstraints::default();
        let binary = BinaryConstraints::default();

        let (tiles, board) = diamond([2, 12, 5, 9]);
        assert!(!number_fits(&tiles, &board, &binary, &numeric, 0, true));

        let (tiles, board) = diamond([9, 4, 5, 9]);
        assert!(!number_fits(&tiles, &board, &binary, &numeric, 0, true));

        let relaxed = BinaryConstraints {
            forbid_equal_adjacent: false,
            ..Default::default()
        };
        assert!(number_fits(&tiles, &board, &relaxed, &numeric, 0, true));
    }

    #[test]
    fn vertex_sum() {
        // Vertexes of slot 0: (0, 1, 3) and (0, 2, 3)
        let (tiles, board) = diamond([5, 9, 3, 10]);
        let binary = BinaryConstraints::none();
        // (0, 1, 3) = 4 + 4 + 3 = 11, (0, 2, 3) = 4 + 2 + 3 = 9
        let strict = NumericConstraints {
            max_vertex_pip_sum: 10,
            ..Default::default()
        };
        assert!(!number_fits(&tiles, &board, &binary, &strict, 0, true));
        let loose = NumericConstraints {
            max_vertex_pip_sum: 11,
            ..Default::default()
        };
        assert!(number_fits(&tiles, &board, &binary, &loose, 0, true));
    }

    #[test]
    fn pip_bounds() {
        let (tiles, mut board) = diamond([6, 3, 4, 10]);
        let binary = BinaryConstraints::none();
        let numeric = NumericConstraints::default();
        assert!(number_fits(&tiles, &board, &binary, &numeric, 0, true));

        board.max_pips_by_type.insert(TerrainType::Fields, 4);
        assert!(!number_fits(&tiles, &board, &binary, &numeric, 0, true));
        assert!(number_fits(&tiles, &board, &binary, &numeric, 0, false));

        board.max_pips_by_type.clear();
        board.max_pips_per_slot = vec![3, 5, 5, 5];
        assert!(!number_fits(&tiles, &board, &binary, &numeric, 0, true));

        board.max_pips_per_slot.clear();
        board.min_pips_by_type.insert(TerrainType::Fields, 2);
        let (tiles, _) = diamond([2, 3, 4, 10]);
        assert!(!number_fits(&tiles, &board, &binary, &numeric, 0, true));
    }

    #[test]
    fn tokens_are_permuted() {
        let (mut tiles, board) = diamond([6, 8, 3, 4]);
        let mut rng = StdRng::seed_from_u64(9);
        let binary = BinaryConstraints::default();
        let numeric = NumericConstraints::default();

        for _ in 0..20 {
            shuffle_numbers(
                &mut tiles,
                &board,
                &binary,
                &numeric,
                &ShuffleSettings::default(),
                &mut rng,
            )
            .unwrap();
            let mut numbers: Vec<u8> = tiles.iter().filter_map(|t| t.number).collect();
            numbers.sort_unstable();
            assert_eq!(numbers, vec![3, 4, 6, 8]);

            // 6 and 8 are only apart on slots 1 and 2
            let six_eight: Vec<usize> = (0..4)
                .filter(|&i| matches!(tiles[i].number, Some(6 | 8)))
                .collect();
            assert_eq!(six_eight, vec![1, 2]);
        }
    }

    #[test]
    fn pinned_tokens_stay() {
        let (mut tiles, mut board) = diamond([3, 4, 5, 9]);
        for (i, t) in board.recommended_layout.iter_mut().enumerate() {
            if i < 2 {
                t.group = Some(1);
            }
        }
        for (i, t) in tiles.iter_mut().enumerate() {
            t.group = board.recommended_layout[i].group;
        }
        board.pinned_number_groups.push(1);

        // Simulate a terrain shuffle that moved the pinned tokens
        tiles[0].number = Some(4);
        tiles[1].number = Some(3);

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..10 {
            shuffle_numbers(
                &mut tiles,
                &board,
                &BinaryConstraints::none(),
                &NumericConstraints::default(),
                &ShuffleSettings::default(),
                &mut rng,
            )
            .unwrap();
            assert_eq!(tiles[0].number, Some(3));
            assert_eq!(tiles[1].number, Some(4));
        }
    }

    #[test]
    fn restoring_pinned_tokens_keeps_every_token() {
        let (mut tiles, mut board) = diamond([3, 4, 5, 9]);
        board.recommended_layout[3].group = Some(2);
        board.pinned_number_groups.push(2);

        // The 9 of the pinned slot went to slot 0 with its terrain
        tiles[3].number = Some(3);
        tiles[0].number = Some(9);
        restore_pinned(&mut tiles, &board);

        assert_eq!(tiles[3].number, Some(9));
        assert_eq!(tiles[0].number, Some(3));
        let mut numbers: Vec<u8> = tiles.iter().filter_map(|t| t.number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![3, 4, 5, 9]);
    }

    #[test]
    fn pinned_slot_without_token_is_left_alone() {
        let (mut tiles, mut board) = diamond([3, 4, 5, 9]);
        board.recommended_layout[2].group = Some(2);
        board.pinned_number_groups.push(2);

        // A desert moved onto the pinned slot
        tiles[2].terrain = TerrainType::Desert;
        tiles[2].number = None;
        let before: Vec<Slot> = tiles.clone();
        restore_pinned(&mut tiles, &board);
        assert_eq!(tiles, before);
    }

    #[test]
    fn impossible_tokens_exhaust_the_budget() {
        // Every slot of a triangle holds a 6 or an 8
        let tiles: Vec<Slot> = [6, 8, 6]
            .iter()
            .map(|&n| Slot::new(TerrainType::Hills, Some(n)))
            .collect();
        let board = BoardGraph {
            recommended_layout: tiles.clone(),
            neighbors: vec![vec![1, 2], vec![0, 2], vec![0, 1]],
            ..Default::default()
        };
        let mut tiles = tiles;
        let settings = ShuffleSettings {
            attempts_per_slot: 10,
            max_retries: 40,
        };
        let mut rng = StdRng::seed_from_u64(4);

        let err = shuffle_numbers(
            &mut tiles,
            &board,
            &BinaryConstraints::default(),
            &NumericConstraints::default(),
            &settings,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, ShuffleError::Numbers { retries: 41 });
    }
}
