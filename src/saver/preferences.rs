/*
preferences.rs

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

//! Save and restore the user preferences.
//!
//! The preferences are the selected board, the constraints, and the retry policy.
//! The saved object is a serialization of the [`Preferences`] object in JSON format by using
//! [`serde`].

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::constraints::{BinaryConstraints, NumericConstraints, ShuffleSettings};

/// Board used when the preferences do not name one.
pub const DEFAULT_BOARD: &str = "base";

fn default_board() -> String {
    DEFAULT_BOARD.to_string()
}

/// User preferences.
///
/// Missing fields take their default value, so that older files remain readable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default = "default_board")]
    pub board: String,

    #[serde(default)]
    pub binary: BinaryConstraints,

    #[serde(default)]
    pub numeric: NumericConstraints,

    #[serde(default)]
    pub settings: ShuffleSettings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            board: default_board(),
            binary: BinaryConstraints::default(),
            numeric: NumericConstraints::default(),
            settings: ShuffleSettings::default(),
        }
    }
}

/// Object to save and restore the preferences.
pub struct SaverPreferences {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverPreferences {
    /// Create a [`SaverPreferences`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the preferences must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("preferences.json");
        debug!("Preferences file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Preferences`] object from the preferences file.
    ///
    /// Return the [`Preferences`] object or None if the preferences file does not exist.
    /// Out of range constraints are reported as errors.
    pub fn get_preferences(&self) -> Result<Option<Preferences>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let preferences: Preferences = serde_json::from_reader(reader)?;
        preferences.numeric.validate()?;
        Ok(Some(preferences))
    }

    /// Save the provided [`Preferences`] object.
    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, preferences)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the preferences file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir: PathBuf = env::temp_dir().join(format!("hexshuffle-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file() {
        let saver = SaverPreferences::new(scratch_dir("prefs-missing"));
        saver.delete_save();
        assert!(saver.get_preferences().unwrap().is_none());
    }

    #[test]
    fn save_and_restore() {
        let dir: PathBuf = scratch_dir("prefs-save");
        let saver = SaverPreferences::new(dir.clone());
        let preferences = Preferences {
            board: "harbors".to_string(),
            binary: BinaryConstraints {
                forbid_equal_adjacent: false,
                ..Default::default()
            },
            numeric: NumericConstraints {
                max_connected_like_terrain: 2,
                max_vertex_pip_sum: 12,
            },
            settings: ShuffleSettings::default(),
        };
        saver.save_preferences(&preferences).unwrap();
        assert_eq!(saver.get_preferences().unwrap(), Some(preferences));

        saver.delete_save();
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn partial_and_invalid_files() {
        let dir: PathBuf = scratch_dir("prefs-partial");
        let saver = SaverPreferences::new(dir.clone());

        fs::write(dir.join("preferences.json"), r#"{"board": "anchored"}"#).unwrap();
        let p: Preferences = saver.get_preferences().unwrap().unwrap();
        assert_eq!(p.board, "anchored");
        assert_eq!(p.numeric, NumericConstraints::default());

        fs::write(
            dir.join("preferences.json"),
            r#"{"numeric": {"max_vertex_pip_sum": 20}}"#,
        )
        .unwrap();
        assert!(saver.get_preferences().is_err());

        fs::write(dir.join("preferences.json"), "not json").unwrap();
        assert!(saver.get_preferences().is_err());

        fs::remove_dir_all(dir).unwrap();
    }
}
