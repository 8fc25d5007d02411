/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

/// Process arguments for the interactive shell.
#[derive(Debug, Clone, Parser)]
#[command(about, version)]
pub struct Cli {
    /// Side length of the game board.
    ///
    /// If not supplied, the shell prompts for one interactively.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(5..=9))]
    pub size: Option<u8>,
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board.
    #[command(alias = "d")]
    Display,

    /// Quit the game.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Move the knight to the next step in a solution, if one still exists.
    Hint,

    /// Move the knight to the cell at the specified row and column.
    ///
    /// The first move may place the knight on any cell; every later move must
    /// be a knight's L-shape jump onto an unvisited cell.
    #[command(alias = "m")]
    Move {
        /// Zero-based row of the destination cell.
        row: usize,

        /// Zero-based column of the destination cell.
        col: usize,
    },

    /// Reset the current puzzle, clearing the board.
    Reset,

    /// Report whether a complete tour is still reachable from the current position.
    Solvable,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;

    /// Attempt to parse an [`EngineCommand`] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
