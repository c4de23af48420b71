/*
generator.rs

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

//! Board model and random layout generation.
//!
//! A board is described by a [`board::BoardGraph`]: the recommended layout (one
//! [`board::Slot`] per position) and the adjacency of the slots.
//! The built-in boards are listed in [`boards::BOARDS`] as [`board_parse::BoardTemplate`]
//! objects. Their [`board_parse::BoardTemplate::build`] method compiles the template into a
//! [`board::BoardGraph`].
//!
//! To get a random layout, create a [`shuffle::Shuffler`] object and use its
//! [`shuffle::Shuffler::shuffle`] method with the [`constraints::BinaryConstraints`] and
//! [`constraints::NumericConstraints`] to honor.
//! The shuffle runs in three stages:
//!
//! * The terrain stage ([`terrain`]) moves the terrain, with its number token, between the
//!   slots that are not fixed.
//!   It limits the size of the areas of connected slots with the same terrain.
//! * The number stage ([`numbers`]) shuffles the number tokens between the slots that produce
//!   resources.
//!   It enforces the adjacency rules (6 and 8, 2 and 12, equal tokens), the pip bounds, and the
//!   maximum pip sum of each vertex.
//! * The harbor stage ([`harbors`]) shuffles the harbors that are not fixed.
//!
//! The terrain and number stages use [`hex_group::HexGroupSet`] to walk the slots backward,
//! from the last slot to the first one.
//! When no acceptable candidate can be found for a slot, the stage restarts from scratch.
//! After too many restarts, the stage gives up and the shuffle returns a
//! [`shuffle::ShuffleError`].

pub mod board;
pub mod board_parse;
pub mod boards;
pub mod constraints;
pub mod harbors;
pub mod hex_group;
pub mod numbers;
pub mod pips;
pub mod shuffle;
pub mod terrain;
