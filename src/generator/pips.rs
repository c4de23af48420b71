/*
pips.rs

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

//! Pip values of number tokens.
//!
//! The pip value is the number of dots printed under a token: the number of two-dice
//! combinations, out of 36, that roll the token's value.

/// Number tokens available on a board (7 is never a token).
pub const TOKENS: [u8; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];

/// Lowest pip value of a token.
pub const MIN_PIPS: u8 = 1;

/// Highest pip value of a token (6 and 8).
pub const MAX_PIPS: u8 = 5;

/// Pip value of the given token: `6 - |7 - token|`.
pub fn pips(token: u8) -> u8 {
    6 - 7u8.abs_diff(token)
}

/// Whether the value can be printed on a number token.
pub fn is_valid_token(token: u8) -> bool {
    TOKENS.contains(&token)
}
