/*
layouts.rs

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

//! Save and restore generated layouts.
//!
//! The document records the board name, the time of the generation, the constraints, and the
//! layouts themselves, so that a batch of boards can be reviewed or replayed later.

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::board::Slot;
use crate::generator::constraints::{BinaryConstraints, NumericConstraints};

/// Batch of generated layouts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutBatch {
    pub board: String,
    pub generated: DateTime<Local>,
    pub binary: BinaryConstraints,
    pub numeric: NumericConstraints,
    pub layouts: Vec<Vec<Slot>>,
}

impl LayoutBatch {
    /// Create an empty batch, stamped with the current time.
    pub fn new(board: &str, binary: &BinaryConstraints, numeric: &NumericConstraints) -> Self {
        Self {
            board: board.to_string(),
            generated: Local::now(),
            binary: *binary,
            numeric: *numeric,
            layouts: Vec::new(),
        }
    }
}

/// Object to save and restore a [`LayoutBatch`].
pub struct SaverLayouts {
    save_file: PathBuf,
}

impl SaverLayouts {
    /// Create a [`SaverLayouts`] object for the given file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Layouts file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the saved batch, or None if the file does not exist.
    pub fn get_layouts(&self) -> Result<Option<LayoutBatch>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let batch: LayoutBatch = serde_json::from_reader(reader)?;
        Ok(Some(batch))
    }

    /// Save the batch, replacing the previous file.
    pub fn save_layouts(&self, batch: &LayoutBatch) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, batch)?;
        writer.flush()?;
        debug!(
            "{} layouts saved to {:?}",
            batch.layouts.len(),
            self.save_file
        );
        Ok(())
    }
}
