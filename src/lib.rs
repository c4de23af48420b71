/*
lib.rs

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

//! Generate random layouts for hexagonal resource boards.
//!
//! The [`generator`] module holds the board model and the shuffle engine, [`worker`] runs the
//! engine in the background, and [`saver`] stores the preferences and the generated layouts.

pub mod generator;
pub mod saver;
pub mod worker;

pub use generator::board::{BoardGraph, Harbor, HarborType, Slot, TerrainType};
pub use generator::constraints::{BinaryConstraints, NumericConstraints, ShuffleSettings};
pub use generator::shuffle::{ShuffleError, Shuffler, shuffle};
