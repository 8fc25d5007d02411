/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, Write},
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::{Board, EngineCommand, MoveOutcome, Solver, Square};

/// Smallest board the shell will play on.
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest board the shell will play on.
///
/// The engine itself has no upper bound; larger boards just make the hint
/// search take unreasonably long for an interactive session.
pub const MAX_BOARD_SIZE: usize = 9;

/// The interactive Knight's Tour shell.
#[derive(Debug)]
pub struct Engine {
    /// The live game board, as known to the engine.
    ///
    /// This is the only board mutated in place: confirmed moves and hints
    /// update it, and `reset` clears it back to its starting state.
    board: Board,

    /// Best-first tour search, used for hints and solvability checks.
    ///
    /// The solver only ever explores copies of the live board.
    solver: Solver,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    ///
    /// Prints the welcome banner and, if `size` was not supplied on the
    /// command line, prompts for one until a valid size is entered.
    pub fn new(size: Option<usize>) -> Result<Self> {
        println!("Welcome to ♘ The Knight's Tour ♘ !");

        let dim = match size {
            Some(dim) => dim,
            None => prompt_for_size()?,
        };

        let (sender, receiver) = channel();

        Ok(Self {
            board: Board::new(dim)?,
            solver: Solver::default(),
            sender,
            receiver,
        })
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        self.display();
        println!("Enter 'help' to see the list of commands.");

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            match cmd {
                EngineCommand::Display => self.display(),

                EngineCommand::Exit => {
                    println!("Exiting the game...");
                    break;
                }

                EngineCommand::Hint => self.hint(),

                EngineCommand::Move { row, col } => {
                    // A fault leaves the board usable, so keep running
                    if let Err(e) = self.make_move(Square::new(row, col)) {
                        eprintln!("Error: {e}");
                    }
                }

                EngineCommand::Reset => {
                    println!("Resetting the game...");
                    self.board.reset();
                    self.display();
                }

                EngineCommand::Solvable => {
                    if self.solver.solve(&self.board) {
                        println!("A complete tour is still reachable from this position.");
                    } else {
                        println!("No complete tour was found from this position.");
                    }
                }
            };
        }

        Ok(())
    }

    /// Executes the `display` command, printing the current board.
    fn display(&self) {
        print!("{}", self.board);
    }

    /// Executes the `move` command, applying the move to the live board.
    fn make_move(&mut self, sq: Square) -> Result<()> {
        match self.board.apply_move(sq)? {
            MoveOutcome::Applied => {
                println!("Successfully moved to {sq}");
                self.display();
                self.check_game_over();
            }

            MoveOutcome::Rejected => {
                println!("Moving to {sq} is an invalid move.");
                self.display();
            }
        }

        Ok(())
    }

    /// Executes the `hint` command, playing the first move from which the
    /// solver can still complete a tour.
    fn hint(&mut self) {
        if let Some(sq) = self.solver.make_next_move(&mut self.board) {
            println!("Moved to {sq}.");
            self.display();
            self.check_game_over();
        } else {
            println!("No more moves lead to a complete tour. Enter 'reset' to start over.");
        }
    }

    /// Prints the end-of-game message if the live board is won or dead-ended.
    fn check_game_over(&self) {
        if self.board.is_solved() {
            println!(
                "Congratulations, you won The Knight's Tour! Enter 'reset' to play again, or 'exit' to quit."
            );
        } else if self.board.has_no_moves() {
            println!("Game over: no more valid moves! Enter 'reset' to play again, or 'exit' to quit.");
        }
    }
}

/// Prompts on stdout for a board size until a valid one is entered.
fn prompt_for_size() -> Result<usize> {
    let mut buffer = String::new();

    loop {
        print!("Enter the length of the game board ({MIN_BOARD_SIZE}-{MAX_BOARD_SIZE}): ");
        io::stdout().flush().context("failed to flush size prompt")?;

        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("failed to read board size")?;

        // For ctrl + d
        if 0 == bytes {
            bail!("reached end of input before a board size was entered");
        }

        match buffer.trim().parse::<usize>() {
            Ok(dim) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&dim) => return Ok(dim),
            _ => println!(
                "The board size must be an integer between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}."
            ),
        }
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(128);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(EngineCommand::Exit)
                .context("failed to send 'exit' command after receiving empty input")?;

            bail!("engine received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            // If successful, send the command to the engine
            Ok(cmd) => sender
                .send(cmd)
                .context("failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running.
            // This is also how 'help' output is served.
            Err(err) => eprintln!("{err}"),
        }
    }
}
