/*
shuffle.rs

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

//! Generate a random board layout.
//!
//! The [`Shuffler`] clones the recommended layout of a [`BoardGraph`] and runs the three stages
//! on it: terrain ([`super::terrain`]), number tokens ([`super::numbers`]), and harbors
//! ([`super::harbors`]).

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Instant;
use thiserror::Error;

use super::board::{BoardGraph, Slot};
use super::constraints::{BinaryConstraints, NumericConstraints, ShuffleSettings};
use super::harbors;
use super::numbers;
use super::terrain;

/// Shuffling failures.
///
/// Both are raised when a stage runs out of retries, which usually means that the constraints
/// are too strict for the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShuffleError {
    /// The terrain could not be placed.
    #[error(
        "Cannot place the terrain after {retries} attempts. Try a larger maximum of connected like terrain."
    )]
    Terrain { retries: usize },

    /// The number tokens could not be placed.
    #[error(
        "Cannot place the number tokens after {retries} attempts. Try to allow more adjacent numbers or a larger vertex pip sum."
    )]
    Numbers { retries: usize },
}

impl ShuffleError {
    /// Number of stage restarts before giving up.
    pub fn retries(&self) -> usize {
        match self {
            ShuffleError::Terrain { retries } | ShuffleError::Numbers { retries } => *retries,
        }
    }

    /// Whether the error comes from an exhausted retry budget.
    ///
    /// Always true for now. Callers use it to tell shuffling failures from the other errors of
    /// a run (invalid board, I/O).
    pub fn is_shuffling_failure(&self) -> bool {
        matches!(self, ShuffleError::Terrain { .. } | ShuffleError::Numbers { .. })
    }
}

/// Board shuffler.
pub struct Shuffler<R: Rng> {
    /// Random source.
    rng: R,

    /// Retry policy.
    pub settings: ShuffleSettings,

    /// Number of times the terrain stage restarted during the last shuffle.
    pub terrain_retries: usize,

    /// Number of times the number stage restarted during the last shuffle.
    pub number_retries: usize,

    /// Duration in seconds of the last shuffle.
    pub duration: f32,
}

impl Default for Shuffler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler<ThreadRng> {
    /// Create a shuffler that uses the thread-local random generator and the default settings.
    pub fn new() -> Self {
        Self::with_rng(rand::rng(), ShuffleSettings::default())
    }
}

impl<R: Rng> Shuffler<R> {
    /// Create a shuffler with the given random source.
    pub fn with_rng(rng: R, settings: ShuffleSettings) -> Self {
        Self {
            rng,
            settings,
            terrain_retries: 0,
            number_retries: 0,
            duration: 0.0,
        }
    }

    /// Generate and return a random layout for the board.
    ///
    /// The returned slots are a permutation of the recommended layout: same terrain, same number
    /// tokens, and same harbors, with the fixed slots in place.
    ///
    /// # Errors
    ///
    /// Return the error of the stage that ran out of retries. No partial layout is returned.
    pub fn shuffle(
        &mut self,
        board: &BoardGraph,
        binary: &BinaryConstraints,
        numeric: &NumericConstraints,
    ) -> Result<Vec<Slot>, ShuffleError> {
        debug_assert_eq!(board.validate(), Ok(()));
        debug_assert_eq!(numeric.validate(), Ok(()));

        self.terrain_retries = 0;
        self.number_retries = 0;
        self.duration = 0.0;
        let start: Instant = Instant::now();

        let res: Result<Vec<Slot>, ShuffleError> = self.run_stages(board, binary, numeric);
        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Terrain restarts = {}  Number restarts = {}  Duration = {}",
            self.terrain_retries, self.number_retries, self.duration
        );
        res
    }

    fn run_stages(
        &mut self,
        board: &BoardGraph,
        binary: &BinaryConstraints,
        numeric: &NumericConstraints,
    ) -> Result<Vec<Slot>, ShuffleError> {
        let mut tiles: Vec<Slot> = board.recommended_layout.clone();

        match terrain::shuffle_terrain(&mut tiles, board, numeric, &self.settings, &mut self.rng) {
            Ok(retries) => self.terrain_retries = retries,
            Err(e) => {
                self.terrain_retries = e.retries();
                return Err(e);
            }
        }

        match numbers::shuffle_numbers(
            &mut tiles,
            board,
            binary,
            numeric,
            &self.settings,
            &mut self.rng,
        ) {
            Ok(retries) => self.number_retries = retries,
            Err(e) => {
                self.number_retries = e.retries();
                return Err(e);
            }
        }

        harbors::shuffle_harbors(&mut tiles, board, &mut self.rng);

        if log_enabled!(Level::Debug) {
            let s: Vec<String> = tiles
                .iter()
                .map(|t| match t.number {
                    Some(n) => format!("{}{n}", t.terrain.to_char()),
                    None => t.terrain.to_char().to_string(),
                })
                .collect();
            debug!("Layout = {}", s.join(" "));
        }
        Ok(tiles)
    }
}

/// Generate a random layout with the thread-local random generator and the default settings.
///
/// # Errors
///
/// See [`Shuffler::shuffle`].
pub fn shuffle(
    board: &BoardGraph,
    binary: &BinaryConstraints,
    numeric: &NumericConstraints,
) -> Result<Vec<Slot>, ShuffleError> {
    Shuffler::new().shuffle(board, binary, numeric)
}
