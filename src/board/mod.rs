/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

mod square;

pub use square::{Square, KNIGHT_OFFSETS};

/// The state of a single cell on the board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// The knight has not yet touched this cell.
    #[default]
    Unvisited,

    /// The knight currently stands on this cell.
    ///
    /// At most one cell per board is ever in this state.
    Occupied,

    /// The knight has been here and left; it may never return.
    Visited,
}

/// The result of attempting to move the knight.
///
/// A rejected move is a normal negative outcome, not an error: the board
/// reports faults in its own bookkeeping separately, as [`anyhow::Error`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum MoveOutcome {
    /// The move was legal and has been applied to the board.
    Applied,

    /// The move failed validation; the board is unchanged.
    Rejected,
}

impl MoveOutcome {
    /// Returns `true` if the move was applied.
    #[inline(always)]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// An `n`x`n` Knight's Tour board: a grid of cell states plus the knight's
/// current position, if it has been placed.
///
/// A board starts empty. The first move may place the knight on any cell;
/// every move after that must be an L-shape jump onto an unvisited cell.
/// Boards are cheap to clone, and the tour search works exclusively on
/// clones: the only board mutated repeatedly is the live one owned by the
/// shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Side length of the board. Fixed for the lifetime of the value.
    dim: usize,

    /// Row-major grid of cell states, `dim * dim` entries.
    cells: Vec<CellState>,

    /// Location of the single `Occupied` cell, or `None` before the first move.
    position: Option<Square>,
}

impl Board {
    /// Constructs a new, empty [`Board`] with the provided side length.
    ///
    /// Will return an error if `dim` is zero. There is no upper bound beyond
    /// available memory; the interactive shell imposes its own range.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            bail!("board dimension must be positive");
        }

        Ok(Self {
            dim,
            cells: vec![CellState::Unvisited; dim * dim],
            position: None,
        })
    }

    /// Reconstructs a [`Board`] from a row-major grid snapshot, recovering
    /// the knight's position by scanning for the `Occupied` cell.
    ///
    /// Will return an error if `dim` is zero, if the snapshot is not
    /// `dim * dim` cells, or if more than one cell is `Occupied`.
    pub fn from_cells(dim: usize, cells: &[CellState]) -> Result<Self> {
        if dim == 0 {
            bail!("board dimension must be positive");
        }

        if cells.len() != dim * dim {
            bail!(
                "expected {} cells for a {dim}x{dim} board, got {}",
                dim * dim,
                cells.len()
            );
        }

        let mut position = None;
        for (i, &cell) in cells.iter().enumerate() {
            if cell == CellState::Occupied {
                let sq = Square::new(i / dim, i % dim);
                if let Some(prev) = position {
                    bail!("grid snapshot has more than one occupied cell: {prev} and {sq}");
                }
                position = Some(sq);
            }
        }

        Ok(Self {
            dim,
            cells: cells.to_vec(),
            position,
        })
    }

    /// Side length of this board.
    #[inline(always)]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// The knight's current square, or `None` before the first move.
    #[inline(always)]
    pub const fn position(&self) -> Option<Square> {
        self.position
    }

    /// The raw grid, row-major. Suitable for [`Board::from_cells`].
    #[inline(always)]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// The state of the cell at `sq`, or `None` if `sq` is off the board.
    #[inline(always)]
    pub fn cell(&self, sq: Square) -> Option<CellState> {
        self.in_bounds(sq).then(|| self.cells[self.index(sq)])
    }

    /// Row-major index of `sq`. Only meaningful if `sq` is in bounds.
    #[inline(always)]
    const fn index(&self, sq: Square) -> usize {
        sq.row * self.dim + sq.col
    }

    #[inline(always)]
    const fn in_bounds(&self, sq: Square) -> bool {
        sq.row < self.dim && sq.col < self.dim
    }

    /// Returns `true` if every cell has been visited, i.e. the tour is complete.
    #[inline(always)]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|&cell| cell != CellState::Unvisited)
    }

    /// Returns `true` if no legal move exists from the current state.
    ///
    /// A dead end is not a loss by itself; it only means the knight is stuck.
    #[inline(always)]
    pub fn has_no_moves(&self) -> bool {
        self.neighbors().is_empty()
    }

    /// Clears every cell and removes the knight, restoring the board to its
    /// freshly-constructed state. Idempotent.
    pub fn reset(&mut self) {
        self.position = None;
        self.cells.fill(CellState::Unvisited);
    }

    /// Returns `true` if the knight may move to `sq`.
    ///
    /// Out-of-bounds squares are never valid. Before the first move, every
    /// square on the board is valid. Afterwards, a move is valid iff it is an
    /// L-shape jump from the current position onto an unvisited cell.
    pub fn is_valid_move(&self, sq: Square) -> bool {
        if !self.in_bounds(sq) {
            return false;
        }

        let Some(from) = self.position else {
            // The knight hasn't been placed yet
            return true;
        };

        from.is_knight_jump_to(sq) && self.cells[self.index(sq)] == CellState::Unvisited
    }

    /// Moves the knight to `sq`, if doing so is valid.
    ///
    /// On [`MoveOutcome::Applied`], the previous square (if any) becomes
    /// `Visited`, `sq` becomes `Occupied`, and the position updates. On
    /// [`MoveOutcome::Rejected`] the board is unchanged. An `Err` means the
    /// board's own bookkeeping failed; the board is left unchanged and
    /// remains usable.
    pub fn apply_move(&mut self, sq: Square) -> Result<MoveOutcome> {
        if !self.is_valid_move(sq) {
            return Ok(MoveOutcome::Rejected);
        }

        // Resolve both indices before mutating either cell, so that a fault
        // cannot leave the board half-updated.
        let to = self.index(sq);
        let from = self.position.map(|prev| self.index(prev));
        if to >= self.cells.len() || from.is_some_and(|idx| idx >= self.cells.len()) {
            bail!("cell bookkeeping out of range on a {0}x{0} board", self.dim);
        }

        if let Some(from) = from {
            self.cells[from] = CellState::Visited;
        }
        self.cells[to] = CellState::Occupied;
        self.position = Some(sq);

        Ok(MoveOutcome::Applied)
    }

    /// Number of valid destinations from the current position.
    ///
    /// With no knight placed yet, every cell is a candidate first placement,
    /// so this is `dim * dim`. This count is the tour search's ordering key:
    /// positions with fewer onward options are explored first, since
    /// deferring them risks stranding those cells (Warnsdorff's heuristic).
    pub fn neighbor_count(&self) -> usize {
        let Some(from) = self.position else {
            return self.dim * self.dim;
        };

        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&offset| from.offset_by(offset, self.dim))
            .filter(|&sq| self.is_valid_move(sq))
            .count()
    }

    /// All boards reachable from this one by a single legal move.
    ///
    /// Before the first placement this does *not* enumerate all `dim * dim`
    /// starting cells: a tour exists from a cell iff one exists from any of
    /// its rotations and reflections, so only the upper-left octant of
    /// representative cells (`0 <= col <= row <= dim / 2`) is tried. With a
    /// knight on the board, the 8 offsets are tried in [`KNIGHT_OFFSETS`]
    /// order, keeping each copy whose move applied.
    pub fn neighbors(&self) -> Vec<Self> {
        match self.position {
            None => {
                let mut boards = Vec::new();
                for row in 0..=self.dim / 2 {
                    for col in 0..=row {
                        let mut board = self.clone();
                        let applied = board
                            .apply_move(Square::new(row, col))
                            .is_ok_and(|outcome| outcome.is_applied());
                        if applied {
                            boards.push(board);
                        }
                    }
                }
                boards
            }

            Some(from) => KNIGHT_OFFSETS
                .iter()
                .filter_map(|&offset| from.offset_by(offset, self.dim))
                .filter_map(|sq| {
                    let mut board = self.clone();
                    board
                        .apply_move(sq)
                        .is_ok_and(|outcome| outcome.is_applied())
                        .then_some(board)
                })
                .collect(),
        }
    }
}

impl fmt::Display for Board {
    /// Renders the board as a bordered grid: blank for an unvisited cell,
    /// `♞` for the knight, `x` for a visited cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.dim * 4 + 1);

        writeln!(f, "{border}")?;
        for row in 0..self.dim {
            write!(f, "|")?;
            for col in 0..self.dim {
                let glyph = match self.cells[self.index(Square::new(row, col))] {
                    CellState::Unvisited => ' ',
                    CellState::Occupied => '♞',
                    CellState::Visited => 'x',
                };
                write!(f, " {glyph} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{border}")?;
        }

        Ok(())
    }
}
