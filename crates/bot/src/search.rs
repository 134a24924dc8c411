//! Exhaustive placement search
//!
//! Enumerates every rotation and column for the falling piece, drops it
//! straight down and scores the settled field with the evaluation
//! heuristic. Only straight drops are considered, so every candidate is
//! reachable by rotating, shifting and hard dropping from the spawn row.

use blockfall_core::{Engine, Grid, Piece, ShapeGrid};
use blockfall_types::{CellTag, GRID_WIDTH};

use crate::eval::{evaluate, Weights};

/// A reachable placement: rotate, shift to the column, hard drop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// Clockwise quarter turns to apply before shifting
    pub rotations: u8,
    /// Target column for the rotated shape's left edge
    pub column: i8,
    /// Row the rotated shape's top edge settles on
    pub landing_row: i8,
    /// Heuristic score of the resulting field
    pub score: f64,
}

/// Find the best placement for the engine's falling piece.
///
/// Searches a private copy of the grid with the falling piece erased,
/// so the piece never collides with itself and the live engine is not
/// touched. Returns `None` when no piece is in flight (landed pieces
/// are retired, and a game-over engine spawns nothing) or when no
/// column accepts the piece in any rotation.
pub fn find_best_move(engine: &Engine, weights: &Weights) -> Option<Move> {
    let piece = engine.active()?;
    let mut stack = engine.grid().clone();
    piece.erase_from(&mut stack);
    best_placement(&stack, piece, weights)
}

/// Best straight-drop placement for a piece on a settled stack.
///
/// `grid` must not contain the falling piece's own cells. Candidates
/// are scored with [`evaluate`]; ties keep the first candidate found,
/// scanning rotations outermost and columns left to right.
pub fn best_placement(grid: &Grid, piece: &Piece, weights: &Weights) -> Option<Move> {
    let mut best: Option<Move> = None;
    let mut scratch = grid.clone();
    let tag = CellTag::Piece(piece.kind);
    let mut shape = piece.shape();
    for rotations in 0..4u8 {
        if rotations > 0 {
            shape = shape.rotated_cw();
            if shape == piece.shape() {
                // Rotation period exhausted, further turns repeat earlier shapes
                break;
            }
        }
        let max_x = GRID_WIDTH as i8 - shape.width() as i8;
        for column in 0..=max_x {
            let Some(landing_row) = drop_row(grid, shape, column) else {
                continue;
            };
            scratch.commit_shape(shape, column, landing_row, tag);
            let score = evaluate(&scratch, weights);
            scratch.erase_shape(shape, column, landing_row);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Move {
                    rotations,
                    column,
                    landing_row,
                    score,
                });
            }
        }
    }
    best
}

/// Row where a shape settles when dropped into a column from the top.
/// None when the shape does not even fit at the surface row.
fn drop_row(grid: &Grid, shape: ShapeGrid, x: i8) -> Option<i8> {
    if !grid.can_place(shape, x, 0) {
        return None;
    }
    let mut y = 0;
    while grid.can_place(shape, x, y + 1) {
        y += 1;
    }
    Some(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::EngineConfig;
    use blockfall_types::{PieceKind, GRID_HEIGHT};

    #[test]
    fn test_square_hugs_the_left_wall() {
        // All floor placements tie on height; the wall avoids one bump
        // step and strict improvement keeps the leftmost of the rest.
        let grid = Grid::new();
        let piece = Piece::spawn(PieceKind::O);
        let best = best_placement(&grid, &piece, &Weights::default()).unwrap();
        assert_eq!(best.rotations, 0);
        assert_eq!(best.column, 0);
        assert_eq!(best.landing_row, 18);

        // Every open column rests the square on the floor
        for x in 0..GRID_WIDTH as i8 - 1 {
            assert_eq!(drop_row(&grid, piece.shape(), x), Some(GRID_HEIGHT as i8 - 2));
        }
    }

    #[test]
    fn test_bar_completes_an_open_row() {
        let grid = Grid::from_rows(&["######...."]);
        let piece = Piece::spawn(PieceKind::I);
        let best = best_placement(&grid, &piece, &Weights::default()).unwrap();
        assert_eq!(best.rotations, 0);
        assert_eq!(best.column, 6);
        assert_eq!(best.landing_row, 19);

        let expected = -0.510066 * 10.0 + 0.760666;
        assert!((best.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_upright_bar_fills_a_deep_well() {
        let grid = Grid::from_rows(&[
            "#########.", //
            "#########.",
            "#########.",
            "#########.",
        ]);
        let piece = Piece::spawn(PieceKind::I);
        let best = best_placement(&grid, &piece, &Weights::default()).unwrap();
        assert_eq!(best.rotations, 1);
        assert_eq!(best.column, 9);
        assert_eq!(best.landing_row, 16);
    }

    #[test]
    fn test_blocked_columns_are_skipped() {
        let mut grid = Grid::new();
        for x in [0, 1, 2, 3, 4, 5, 6, 9] {
            grid.set(x, 0, Some(CellTag::Garbage));
        }
        let piece = Piece::spawn(PieceKind::O);
        let best = best_placement(&grid, &piece, &Weights::default()).unwrap();
        assert_eq!(best.column, 7);
        assert_eq!(best.landing_row, 18);
    }

    #[test]
    fn test_sealed_surface_has_no_placement() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            grid.set(x, 0, Some(CellTag::Garbage));
        }
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(best_placement(&grid, &piece, &Weights::default()), None);
    }

    #[test]
    fn test_drop_row_rests_on_the_stack() {
        let grid = Grid::from_rows(&["....##...."]);
        let shape = Piece::spawn(PieceKind::O).shape();
        assert_eq!(drop_row(&grid, shape, 4), Some(17));
        assert_eq!(drop_row(&grid, shape, 0), Some(18));
    }

    #[test]
    fn test_engine_search_skips_the_falling_piece() {
        let mut engine = Engine::new(EngineConfig::classic());
        engine.set_next(PieceKind::O);
        engine.start();

        // The committed spawn cells must not read as stack
        let best = find_best_move(&engine, &Weights::default()).unwrap();
        assert_eq!(best.column, 0);
        assert_eq!(best.landing_row, 18);
    }

    #[test]
    fn test_no_move_without_an_active_piece() {
        let mut engine = Engine::new(EngineConfig::classic());
        assert_eq!(find_best_move(&engine, &Weights::default()), None);

        engine.start();
        engine.hard_drop();
        // Landed pieces are retired until the caller spawns the next
        assert_eq!(find_best_move(&engine, &Weights::default()), None);
    }
}
