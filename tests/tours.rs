/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use destrier::{Board, CellState, Solver, SolverConfig, Square};

/// Builds a board from a text sketch: `.` unvisited, `x` visited, `N` knight.
fn board_from_sketch(sketch: &[&str]) -> Board {
    let dim = sketch.len();
    let mut cells = Vec::with_capacity(dim * dim);

    for row in sketch {
        assert_eq!(row.len(), dim, "sketch must be square");
        for glyph in row.chars() {
            cells.push(match glyph {
                '.' => CellState::Unvisited,
                'x' => CellState::Visited,
                'N' => CellState::Occupied,
                _ => panic!("unknown sketch glyph {glyph:?}"),
            });
        }
    }

    Board::from_cells(dim, &cells).unwrap()
}

#[test]
fn empty_5x5_board_is_solvable() {
    let board = Board::new(5).unwrap();
    assert!(
        Solver::default().solve(&board),
        "a 5x5 tour is known to exist"
    );
}

#[test]
fn hint_on_an_empty_5x5_board_moves() {
    let mut board = Board::new(5).unwrap();
    let hint = Solver::default().make_next_move(&mut board);

    assert!(hint.is_some(), "the first hint should always find a tour");
    assert_eq!(board.position(), hint);
}

#[test]
fn first_hint_starts_in_the_representative_octant() {
    let mut board = Board::new(5).unwrap();
    let hint = Solver::default().make_next_move(&mut board).unwrap();

    // Starting placements are drawn from the upper-left octant only
    assert!(hint.col <= hint.row && hint.row <= 2, "got {hint}");
}

#[test]
fn hints_walk_a_full_tour_on_5x5() {
    let mut board = Board::new(5).unwrap();
    let solver = Solver::default();

    for turn in 0..25 {
        assert!(
            solver.make_next_move(&mut board).is_some(),
            "hint {turn} should exist: every hinted position stays completable"
        );
    }

    assert!(board.is_solved());
    assert!(solver.make_next_move(&mut board).is_none(), "tour is over");
}

#[test]
fn unreachable_cell_makes_a_position_unsolvable() {
    let board = board_from_sketch(&[
        "Nxxxx", //
        "xxxxx", //
        "xxxxx", //
        "xxxxx", //
        "xxxx.", //
    ]);

    // Both jumps from the corner are spent, so (4, 4) is stranded
    assert!(board.has_no_moves());
    assert!(!Solver::default().solve(&board));
}

#[test]
fn reachable_endgame_is_still_solvable() {
    let board = board_from_sketch(&[
        "Nxxxx", //
        "xx.xx", //
        "xxxxx", //
        "xxxxx", //
        "xxxxx", //
    ]);

    let solver = Solver::default();
    assert!(solver.solve(&board));

    let mut board = board;
    assert_eq!(solver.make_next_move(&mut board), Some(Square::new(1, 2)));
    assert!(board.is_solved());
}

#[test]
fn node_allowance_is_honored() {
    let board = Board::new(5).unwrap();

    // Unlimited allowance: solvable. One board of allowance: reported unsolvable.
    assert!(Solver::default().solve(&board));
    assert!(!Solver::new(SolverConfig { max_nodes: 1 }).solve(&board));
}

#[test]
fn hints_resume_after_a_manual_move() {
    let mut board = Board::new(5).unwrap();
    let solver = Solver::default();

    // Start the tour by hand in a corner, then let the solver finish it
    assert!(board.apply_move(Square::new(0, 0)).unwrap().is_applied());

    for _ in 0..24 {
        assert!(solver.make_next_move(&mut board).is_some());
    }

    assert!(board.is_solved());
}
