/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{cmp::Ordering, collections::BinaryHeap};

use anyhow::{ensure, Result};

use crate::{Board, MoveOutcome, Square};

/// Configuration variables for a [`Solver`].
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Node allowance.
    ///
    /// If a solvability search pops this many boards off its frontier without
    /// finding a tour, it gives up and reports the position unsolvable. This
    /// is the only bound on the search's runtime; callers needing latency
    /// guarantees should set it.
    pub max_nodes: u64,
}

impl Default for SolverConfig {
    /// A default [`SolverConfig`] will permit an "infinite" search.
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_nodes: u64::MAX,
        }
    }
}

/// A frontier entry: a board keyed by its onward-move count.
///
/// The ordering is reversed so that [`BinaryHeap`], a max-heap, pops the
/// board with the *fewest* onward moves first.
struct Candidate {
    priority: usize,
    board: Board,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

/// Best-first search over board states.
///
/// The frontier is ordered by [`Board::neighbor_count`] ascending, so the
/// search always extends the continuation whose knight has the fewest onward
/// options (Warnsdorff's heuristic). It never deduplicates states and never
/// removes a dead branch's ancestors, trading completeness guarantees for
/// speed: a `false` answer means no tour was found within the allowance, not
/// a proof that none exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct Solver {
    /// Configuration variables for this solver's searches.
    config: SolverConfig,
}

impl Solver {
    /// Constructs a new [`Solver`] with the provided configuration.
    #[inline(always)]
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns `true` if a complete tour was found starting from `board`'s
    /// current state.
    ///
    /// The caller's board is never touched; the search explores clones. Any
    /// internal fault during the search is swallowed and reported as `false`,
    /// since callers only ever need a yes/no answer.
    pub fn solve(&self, board: &Board) -> bool {
        self.search(board).unwrap_or(false)
    }

    /// Finds the first immediate move from which the search can complete a
    /// tour and plays it on `board`, returning the square moved to.
    ///
    /// Neighbors are tried in the fixed generation order, so the hint for a
    /// given position is the same on every run. Returns `None` and leaves
    /// the board untouched when no continuation can be completed, or when
    /// the search faulted; callers cannot tell the two apart.
    pub fn make_next_move(&self, board: &mut Board) -> Option<Square> {
        for neighbor in board.neighbors() {
            if !self.solve(&neighbor) {
                continue;
            }

            // The neighbor's knight square is exactly the move that derived it
            let sq = neighbor.position()?;
            return match board.apply_move(sq) {
                Ok(MoveOutcome::Applied) => Some(sq),
                Ok(MoveOutcome::Rejected) | Err(_) => None,
            };
        }

        None
    }

    /// The actual best-first loop. An `Err` is a fault or an exhausted node
    /// allowance; [`Solver::solve`] folds both into `false`.
    fn search(&self, board: &Board) -> Result<bool> {
        if board.is_solved() {
            return Ok(true);
        }

        let mut nodes = 0_u64;
        let mut frontier = BinaryHeap::new();
        frontier.push(Candidate {
            priority: 0,
            board: board.clone(),
        });

        while let Some(Candidate { board: current, .. }) = frontier.pop() {
            ensure!(
                nodes < self.config.max_nodes,
                "exceeded node allowance of {} boards",
                self.config.max_nodes
            );
            nodes += 1;

            if current.is_solved() {
                return Ok(true);
            }

            for neighbor in current.neighbors() {
                if neighbor.is_solved() {
                    return Ok(true);
                }

                let priority = neighbor.neighbor_count();
                frontier.push(Candidate {
                    priority,
                    board: neighbor,
                });
            }
        }

        // Frontier exhausted without reaching a full tour
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellState;

    /// A 5x5 board with every cell visited except the ones named in `unvisited`,
    /// and the knight standing on `knight`.
    fn endgame_board(knight: (usize, usize), unvisited: &[(usize, usize)]) -> Board {
        let mut cells = vec![CellState::Visited; 25];
        for &(row, col) in unvisited {
            cells[row * 5 + col] = CellState::Unvisited;
        }
        cells[knight.0 * 5 + knight.1] = CellState::Occupied;
        Board::from_cells(5, &cells).unwrap()
    }

    #[test]
    fn trivial_1x1_board_is_solvable() {
        let board = Board::new(1).unwrap();
        assert!(Solver::default().solve(&board));
    }

    #[test]
    fn already_complete_tour_solves_immediately() {
        let board = endgame_board((0, 0), &[]);
        assert!(board.is_solved());
        assert!(Solver::default().solve(&board));
    }

    #[test]
    fn one_jump_from_done_is_solvable() {
        let board = endgame_board((0, 0), &[(1, 2)]);
        assert!(Solver::default().solve(&board));
    }

    #[test]
    fn winning_hint_is_played_on_the_live_board() {
        let mut board = endgame_board((0, 0), &[(1, 2)]);
        let solver = Solver::default();

        assert_eq!(solver.make_next_move(&mut board), Some(Square::new(1, 2)));
        assert!(board.is_solved());
        assert_eq!(board.position(), Some(Square::new(1, 2)));
    }

    #[test]
    fn stranded_cell_is_unsolvable() {
        // The knight's only jumps from (0, 0) are already visited, so the
        // far corner can never be reached
        let board = endgame_board((0, 0), &[(4, 4)]);
        assert!(!Solver::default().solve(&board));
    }

    #[test]
    fn hint_leaves_a_dead_board_untouched() {
        let mut board = endgame_board((0, 0), &[(4, 4)]);
        let before = board.clone();

        assert_eq!(Solver::default().make_next_move(&mut board), None);
        assert_eq!(board, before);
    }

    #[test]
    fn node_allowance_bounds_the_search() {
        let board = Board::new(5).unwrap();
        let solver = Solver::new(SolverConfig { max_nodes: 1 });
        assert!(
            !solver.solve(&board),
            "a one-board allowance cannot complete a 25-cell tour"
        );
    }
}
