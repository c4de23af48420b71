/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! List the available boards:
//!
//! ```text
//! $ hexshuffle --ls
//! anchored   Base game, desert in the center, pinned numbers around it
//! base       Base game, 19 land slots, no harbors
//! harbors    Base game in its sea frame, with 9 harbors
//! ```
//!
//! Generate three layouts for the base board without two adjacent slots of the same terrain,
//! and save them:
//!
//! ```text
//! $ hexshuffle -b base -c 3 --max-like-terrain 1 -o layouts.json
//! ```
//!
//! Print the layouts saved in a file:
//!
//! ```text
//! $ hexshuffle --show layouts.json
//! ```

use clap::Parser;
use log::{LevelFilter, debug};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use hexshuffle::generator::board::{BoardGraph, Slot};
use hexshuffle::generator::board_parse::BoardTemplate;
use hexshuffle::generator::boards;
use hexshuffle::saver::layouts::{LayoutBatch, SaverLayouts};
use hexshuffle::saver::preferences::{Preferences, SaverPreferences};
use hexshuffle::worker::{self, ShuffleRequest, ShuffleResponse};

const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\nLicense GPL-3.0-or-later"
);

/// Generate random layouts for hexagonal resource boards.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the boards
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Name of the board to shuffle (default: the saved preference, or "base")
    #[arg(short, long)]
    board: Option<String>,

    /// Number of layouts to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Allow 6 and 8 on adjacent slots
    #[arg(long, default_value_t = false)]
    allow_six_eight: bool,

    /// Allow 2 and 12 on adjacent slots
    #[arg(long, default_value_t = false)]
    allow_two_twelve: bool,

    /// Allow the same number on adjacent slots
    #[arg(long, default_value_t = false)]
    allow_equal: bool,

    /// Largest group of connected slots with the same terrain (1 to 7)
    #[arg(long, value_name = "N")]
    max_like_terrain: Option<usize>,

    /// Largest sum of pips around a vertex (10 to 15)
    #[arg(long, value_name = "N")]
    max_vertex_pips: Option<u8>,

    /// Number of restarts before a stage gives up
    #[arg(long, value_name = "N")]
    max_retries: Option<usize>,

    /// Directory of the preferences file
    #[arg(long, value_name = "DIR")]
    preferences: Option<PathBuf>,

    /// Save the resulting preferences
    #[arg(long, default_value_t = false, requires = "preferences")]
    save_preferences: bool,

    /// Delete the saved preferences and start from the defaults
    #[arg(long, default_value_t = false, requires = "preferences")]
    reset_preferences: bool,

    /// Save the layouts in a JSON file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the layouts saved in a JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "output")]
    show: Option<PathBuf>,

    /// Print some statistics after generating the layouts
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
///
/// Return the exit code of the program.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let board_hash: HashMap<String, BoardTemplate> = boards::board_map();

    //
    // List the boards
    //
    if args.ls {
        let mut names: Vec<&String> = board_hash.keys().collect();
        names.sort();
        for name in names {
            println!("{name:<10} {}", board_hash[name].description);
        }
        return 0;
    }

    if let Some(file) = &args.show {
        return show_layouts(file.clone());
    }

    //
    // Saved preferences first, then the command-line options
    //
    let saver: Option<SaverPreferences> = args.preferences.clone().map(SaverPreferences::new);
    if args.reset_preferences
        && let Some(s) = &saver
    {
        s.delete_save();
    }
    let mut preferences: Preferences = match saver.as_ref().map(|s| s.get_preferences()) {
        None | Some(Ok(None)) => Preferences::default(),
        Some(Ok(Some(p))) => p,
        Some(Err(e)) => {
            eprintln!("Cannot read the preferences: {e}");
            return 1;
        }
    };
    apply_options(&args, &mut preferences);
    if let Err(msg) = preferences.numeric.validate() {
        eprintln!("{msg}");
        return 1;
    }
    debug!("Preferences: {preferences:?}");

    let board: BoardGraph = match board_hash.get(&preferences.board) {
        Some(template) => match template.build() {
            Ok(b) => b,
            Err(msg) => {
                eprintln!("Error: {msg}");
                return 1;
            }
        },
        None => {
            eprintln!(
                "Unknown board {}. Use --ls to list the available boards.",
                preferences.board
            );
            return 1;
        }
    };

    if args.save_preferences
        && let Some(s) = &saver
        && let Err(e) = s.save_preferences(&preferences)
    {
        eprintln!("Cannot save the preferences: {e}");
        return 1;
    }

    //
    // Generate the layouts
    //
    let request = ShuffleRequest {
        board,
        binary: preferences.binary,
        numeric: preferences.numeric,
        settings: preferences.settings,
    };
    let mut batch = LayoutBatch::new(&preferences.board, &preferences.binary, &preferences.numeric);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut terrain_retries: usize = 0;
    let mut number_retries: usize = 0;
    let mut errors: usize = 0;
    let start: Instant = Instant::now();

    for i in 0..args.count {
        debug!("Layout {i}");

        match worker::spawn_shuffle(request.clone()).recv_blocking() {
            Ok(ShuffleResponse::Tiles { tiles, stats }) => {
                total += stats.duration;
                if stats.duration > max {
                    max = stats.duration;
                }
                terrain_retries += stats.terrain_retries;
                number_retries += stats.number_retries;
                println!("{:>3}: {}", i + 1, format_layout(&tiles));
                batch.layouts.push(tiles);
            }
            Ok(ShuffleResponse::Error(msg)) => {
                errors += 1;
                eprintln!("{:>3}: {msg}", i + 1);
            }
            Err(e) => {
                errors += 1;
                eprintln!("{:>3}: the shuffle did not complete: {e}", i + 1);
            }
        }
    }

    if let Some(file) = &args.output
        && let Err(e) = SaverLayouts::new(file.clone()).save_layouts(&batch)
    {
        eprintln!("Cannot save the layouts: {e}");
        return 1;
    }

    // Print some stats
    if args.summary {
        let done: usize = batch.layouts.len().max(1);
        println!(
            "
        wall time = {}s
       total time = {}s
     average time = {}s
         max time = {}s
 terrain restarts = {} (average {})
  number restarts = {} (average {})
           errors = {}",
            start.elapsed().as_secs_f32(),
            total,
            total / done as f32,
            max,
            terrain_retries,
            terrain_retries / done,
            number_retries,
            number_retries / done,
            errors
        );
    }

    if args.count > 0 && errors == args.count {
        1
    } else {
        0
    }
}

/// Print a batch of layouts saved with `--output`.
fn show_layouts(file: PathBuf) -> u8 {
    let batch: LayoutBatch = match SaverLayouts::new(file.clone()).get_layouts() {
        Ok(Some(b)) => b,
        Ok(None) => {
            eprintln!("No such file: {}", file.display());
            return 1;
        }
        Err(e) => {
            eprintln!("Cannot read the layouts: {e}");
            return 1;
        }
    };

    println!(
        "Board {}, generated {}",
        batch.board,
        batch.generated.format("%Y-%m-%d %H:%M:%S")
    );
    println!("{:?}", batch.binary);
    println!("{:?}", batch.numeric);
    for (i, tiles) in batch.layouts.iter().enumerate() {
        println!("{:>3}: {}", i + 1, format_layout(tiles));
    }
    0
}

/// Override the preferences with the command-line options.
fn apply_options(args: &Args, preferences: &mut Preferences) {
    if let Some(name) = &args.board {
        preferences.board = name.clone();
    }
    if args.allow_six_eight {
        preferences.binary.forbid_six_eight_adjacent = false;
    }
    if args.allow_two_twelve {
        preferences.binary.forbid_two_twelve_adjacent = false;
    }
    if args.allow_equal {
        preferences.binary.forbid_equal_adjacent = false;
    }
    if let Some(n) = args.max_like_terrain {
        preferences.numeric.max_connected_like_terrain = n;
    }
    if let Some(n) = args.max_vertex_pips {
        preferences.numeric.max_vertex_pip_sum = n;
    }
    if let Some(n) = args.max_retries {
        preferences.settings.max_retries = n;
    }
}

/// One-line representation of a layout: terrain letter and number token of each slot, and the
/// harbors between brackets.
fn format_layout(tiles: &[Slot]) -> String {
    tiles
        .iter()
        .map(|t| {
            let mut s: String = t.terrain.to_char().to_string();
            if let Some(n) = t.number {
                s.push_str(&n.to_string());
            }
            if let Some(h) = t.harbor {
                s.push_str(&format!("[{}]", h.kind));
            }
            s
        })
        .collect::<Vec<String>>()
        .join(" ")
}
