/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The game board: cell states, move validation, and neighbor enumeration.
mod board;

/// Console command grammar for the interactive shell.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Tour search logic; all solving and hint related code.
mod solver;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use solver::*;
