/*
worker.rs

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

//! Run the shuffle in the background.
//!
//! Shuffling a strict set of constraints can take a while, so interactive callers hand the job
//! to a dedicated thread and wait for the answer on an [`async_channel`] channel.
//! The caller can `.await` the receiver from an async context or use
//! [`async_channel::Receiver::recv_blocking`].

use async_channel::{Receiver, Sender};
use log::debug;
use serde::{Deserialize, Serialize};
use std::thread;

use crate::generator::board::{BoardGraph, Slot};
use crate::generator::constraints::{BinaryConstraints, NumericConstraints, ShuffleSettings};
use crate::generator::shuffle::Shuffler;

/// Shuffle job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleRequest {
    pub board: BoardGraph,
    pub binary: BinaryConstraints,
    pub numeric: NumericConstraints,
    #[serde(default)]
    pub settings: ShuffleSettings,
}

/// Statistics of a successful shuffle.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShuffleStats {
    pub terrain_retries: usize,
    pub number_retries: usize,

    /// Duration in seconds.
    pub duration: f32,
}

/// Result of a shuffle job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShuffleResponse {
    /// The generated layout.
    Tiles { tiles: Vec<Slot>, stats: ShuffleStats },

    /// The error message of the stage that gave up.
    Error(String),
}

impl ShuffleResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, ShuffleResponse::Tiles { .. })
    }
}

/// Start the shuffle in a new thread.
///
/// The returned channel receives exactly one [`ShuffleResponse`]. It is closed afterward.
pub fn spawn_shuffle(request: ShuffleRequest) -> Receiver<ShuffleResponse> {
    let (sender, receiver): (Sender<ShuffleResponse>, Receiver<ShuffleResponse>) =
        async_channel::bounded::<ShuffleResponse>(1);

    thread::spawn(move || {
        let mut shuffler = Shuffler::new();
        shuffler.settings = request.settings;

        let response: ShuffleResponse =
            match shuffler.shuffle(&request.board, &request.binary, &request.numeric) {
                Ok(tiles) => ShuffleResponse::Tiles {
                    tiles,
                    stats: ShuffleStats {
                        terrain_retries: shuffler.terrain_retries,
                        number_retries: shuffler.number_retries,
                        duration: shuffler.duration,
                    },
                },
                Err(e) => ShuffleResponse::Error(e.to_string()),
            };
        // The receiver might be gone if the caller lost interest
        if sender.send_blocking(response).is_err() {
            debug!("Shuffle result dropped: nobody is listening");
        }
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::board::TerrainType;

    fn chain(terrain: &[TerrainType]) -> BoardGraph {
        let n: usize = terrain.len();
        BoardGraph {
            recommended_layout: terrain
                .iter()
                .enumerate()
                .map(|(i, &t)| Slot::new(t, t.produces().then_some([3, 4, 5, 9, 10, 11][i % 6])))
                .collect(),
            neighbors: (0..n)
                .map(|i: usize| {
                    [i.checked_sub(1), Some(i + 1).filter(|&j| j < n)]
                        .into_iter()
                        .flatten()
                        .collect()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn replies_with_tiles() {
        let board = chain(&[
            TerrainType::Hills,
            TerrainType::Forest,
            TerrainType::Desert,
            TerrainType::Pasture,
        ]);
        let receiver = spawn_shuffle(ShuffleRequest {
            board,
            binary: BinaryConstraints::default(),
            numeric: NumericConstraints::default(),
            settings: ShuffleSettings::default(),
        });

        let response = receiver.recv_blocking().unwrap();
        assert!(response.is_ok());
        match response {
            ShuffleResponse::Tiles { tiles, stats } => {
                assert_eq!(tiles.len(), 4);
                assert!(stats.duration >= 0.0);
            }
            ShuffleResponse::Error(e) => panic!("unexpected error: {e}"),
        }
        // Only one response
        assert!(receiver.recv_blocking().is_err());
    }

    #[test]
    fn replies_with_stage_error() {
        let mut board = chain(&[TerrainType::Forest; 3]);
        board.recommended_layout[0].fixed = true;
        let receiver = spawn_shuffle(ShuffleRequest {
            board,
            binary: BinaryConstraints::none(),
            numeric: NumericConstraints {
                max_connected_like_terrain: 1,
                ..Default::default()
            },
            settings: ShuffleSettings {
                attempts_per_slot: 1,
                max_retries: 3,
            },
        });

        match receiver.recv_blocking().unwrap() {
            ShuffleResponse::Error(e) => assert!(e.contains("terrain"), "{e}"),
            ShuffleResponse::Tiles { tiles, .. } => panic!("unexpected layout: {tiles:?}"),
        }
    }
}
