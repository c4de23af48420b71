/*
constraints.rs

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

//! User-selected placement constraints and shuffle settings.

use serde::{Deserialize, Serialize};

/// Lowest accepted value for [`NumericConstraints::max_connected_like_terrain`].
pub const MIN_CONNECTED_LIKE_TERRAIN: usize = 1;

/// A bound of 7 (or more) connected slots disables the terrain constraint.
pub const UNCONSTRAINED_LIKE_TERRAIN: usize = 7;

/// Accepted range for [`NumericConstraints::max_vertex_pip_sum`].
pub const MIN_VERTEX_PIP_SUM: u8 = 10;
pub const MAX_VERTEX_PIP_SUM: u8 = 15;

/// On/off constraints on adjacent number tokens.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct BinaryConstraints {
    /// No 6 next to an 8 (nor 6 next to 6, 8 next to 8).
    #[serde(default = "default_true")]
    pub forbid_six_eight_adjacent: bool,

    /// No 2 next to a 12 (nor 2 next to 2, 12 next to 12).
    #[serde(default = "default_true")]
    pub forbid_two_twelve_adjacent: bool,

    /// No two adjacent identical tokens.
    #[serde(default = "default_true")]
    pub forbid_equal_adjacent: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BinaryConstraints {
    fn default() -> Self {
        Self {
            forbid_six_eight_adjacent: true,
            forbid_two_twelve_adjacent: true,
            forbid_equal_adjacent: true,
        }
    }
}

impl BinaryConstraints {
    /// Constraints with every toggle off.
    pub fn none() -> Self {
        Self {
            forbid_six_eight_adjacent: false,
            forbid_two_twelve_adjacent: false,
            forbid_equal_adjacent: false,
        }
    }
}

/// Bounded constraints.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct NumericConstraints {
    /// Largest group of connected slots sharing the same terrain (1 to 7, 7 = no limit).
    #[serde(default = "default_max_connected_like_terrain")]
    pub max_connected_like_terrain: usize,

    /// Largest sum of pip values around a vertex (10 to 15).
    #[serde(default = "default_max_vertex_pip_sum")]
    pub max_vertex_pip_sum: u8,
}

fn default_max_connected_like_terrain() -> usize {
    UNCONSTRAINED_LIKE_TERRAIN
}
fn default_max_vertex_pip_sum() -> u8 {
    MAX_VERTEX_PIP_SUM
}

impl Default for NumericConstraints {
    fn default() -> Self {
        Self {
            max_connected_like_terrain: UNCONSTRAINED_LIKE_TERRAIN,
            max_vertex_pip_sum: MAX_VERTEX_PIP_SUM,
        }
    }
}

impl NumericConstraints {
    /// Whether the connected terrain size must be checked at all.
    pub fn limits_like_terrain(&self) -> bool {
        self.max_connected_like_terrain < UNCONSTRAINED_LIKE_TERRAIN
    }

    /// Verify that the values are in their accepted range.
    ///
    /// # Errors
    ///
    /// Return a message naming the out-of-range value.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CONNECTED_LIKE_TERRAIN..=UNCONSTRAINED_LIKE_TERRAIN)
            .contains(&self.max_connected_like_terrain)
        {
            return Err(format!(
                "The maximum connected like terrain must be between {MIN_CONNECTED_LIKE_TERRAIN} and {UNCONSTRAINED_LIKE_TERRAIN} (got {})",
                self.max_connected_like_terrain
            ));
        }
        if !(MIN_VERTEX_PIP_SUM..=MAX_VERTEX_PIP_SUM).contains(&self.max_vertex_pip_sum) {
            return Err(format!(
                "The maximum vertex pip sum must be between {MIN_VERTEX_PIP_SUM} and {MAX_VERTEX_PIP_SUM} (got {})",
                self.max_vertex_pip_sum
            ));
        }
        Ok(())
    }
}

/// Retry policy of the shuffle stages.
///
/// The defaults were tuned for boards of 20 to 40 slots.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShuffleSettings {
    /// Number of swaps tried for a slot before the whole stage restarts.
    #[serde(default = "default_attempts_per_slot")]
    pub attempts_per_slot: usize,

    /// Number of stage restarts allowed before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_attempts_per_slot() -> usize {
    10
}
fn default_max_retries() -> usize {
    10_000
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            attempts_per_slot: 10,
            max_retries: 10_000,
        }
    }
}
