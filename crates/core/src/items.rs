//! Items module - landing effects for item pieces
//!
//! Four behaviors cover the five item kinds (the twin row clear is the
//! row clear with a second marker). Every effect runs exactly once, at
//! the moment the carrying piece lands:
//!
//! - row clear: commit the piece, then remove the rows under its
//!   marked cells
//! - bomb: blank the 3x3 neighborhood around the marked cell and
//!   discard the piece's own cells
//! - gravity: drop each of the piece's sub-cells down its own column
//!   into the lowest open row
//! - weight: crush everything between the piece and the floor, then
//!   commit the piece on the floor
//!
//! Dispatch lives here so the engine's landing path is a single call
//! whether or not the piece carries an item.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::piece::Piece;
use blockfall_types::{CellTag, ItemKind, GRID_HEIGHT};

/// Run the landing behavior for `piece` against `grid`. Standard
/// pieces are simply committed in place.
pub fn apply_landing(grid: &mut Grid, piece: &mut Piece) {
    match piece.item {
        Some(ItemKind::LineClear) | Some(ItemKind::TwinLineClear) => {
            clear_marked_rows(grid, piece)
        }
        Some(ItemKind::Bomb) => detonate(grid, piece),
        Some(ItemKind::Gravity) => settle_columns(grid, piece),
        Some(ItemKind::Weight) => crush_to_floor(grid, piece),
        None => piece.commit_to(grid),
    }
}

/// Commit the piece, then remove every distinct row holding a marked
/// cell. Rows still inside the spawn buffer are skipped.
fn clear_marked_rows(grid: &mut Grid, piece: &Piece) {
    piece.commit_to(grid);
    let rows: ArrayVec<i8, 2> = piece.marker_cells().map(|(_, y)| y).collect();
    grid.clear_rows(&rows);
}

/// Blank the 3x3 neighborhood centered on the marked cell, clipped at
/// the grid edges. The piece's own cells are discarded, not committed.
fn detonate(grid: &mut Grid, piece: &Piece) {
    for (mx, my) in piece.marker_cells() {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if grid.is_occupied(mx + dx, my + dy) {
                    grid.set(mx + dx, my + dy, None);
                }
            }
        }
    }
}

/// Drop each sub-cell of the piece down its own column into the lowest
/// open row, bottom sub-cells first so stacking inside one column
/// works out. Cells over a full column are discarded.
fn settle_columns(grid: &mut Grid, piece: &Piece) {
    let shape = piece.shape();
    for c in 0..shape.width() {
        for r in (0..shape.height()).rev() {
            if !shape.get(r, c) {
                continue;
            }
            let x = piece.x + c as i8;
            if let Some(y) = grid.lowest_open_row(x) {
                grid.set(x, y, Some(CellTag::Piece(piece.kind)));
            }
        }
    }
}

/// Destroy every occupied cell on the piece's footprint between its
/// resting row and the floor, then commit the piece resting on the
/// floor.
fn crush_to_floor(grid: &mut Grid, piece: &mut Piece) {
    let shape = piece.shape();
    let floor_y = GRID_HEIGHT as i8 - shape.height() as i8;
    for step in (piece.y + 1)..=floor_y {
        for (r, c) in shape.cells() {
            let (cx, cy) = (piece.x + c as i8, step + r as i8);
            if grid.is_occupied(cx, cy) {
                grid.set(cx, cy, None);
            }
        }
    }
    piece.y = floor_y;
    piece.commit_to(grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::PieceKind;

    fn item_piece(kind: PieceKind, item: ItemKind, markers: &[(u8, u8)]) -> Piece {
        Piece::spawn_item(kind, Some(item), markers.iter().copied().collect())
    }

    fn occupied_count(grid: &Grid) -> usize {
        grid.cells().iter().filter(|c| c.is_some()).count()
    }

    #[test]
    fn test_row_clear_removes_the_marked_row() {
        let mut grid = Grid::new();
        let mut piece = item_piece(PieceKind::T, ItemKind::LineClear, &[(1, 1)]);
        piece.x = 3;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        // the bar row went out with the marker; the stem fell one row
        assert_eq!(occupied_count(&grid), 1);
        assert_eq!(grid.get(4, 19), Some(Some(CellTag::Piece(PieceKind::T))));
    }

    #[test]
    fn test_row_clear_takes_surrounding_stack_with_it() {
        let mut grid = Grid::from_rows(&["####.#####"]);
        // vertical bar dropped into the gap, marker on the bottom sub-cell
        let mut piece =
            item_piece(PieceKind::I, ItemKind::LineClear, &[(0, 3)]).rotated_cw();
        piece.x = 4;
        piece.y = 16;
        apply_landing(&mut grid, &mut piece);

        // bottom row completed by the marked cell and cleared away
        assert_eq!(occupied_count(&grid), 3);
        for y in 17..20 {
            assert_eq!(grid.get(4, y), Some(Some(CellTag::Piece(PieceKind::I))));
        }
        assert!(grid.is_open(0, 19));
    }

    #[test]
    fn test_twin_row_clear_removes_two_rows() {
        let mut grid = Grid::from_rows(&[
            "########..", //
            "########..",
        ]);
        let mut piece =
            item_piece(PieceKind::O, ItemKind::TwinLineClear, &[(0, 0), (1, 0)]);
        piece.x = 8;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        assert_eq!(occupied_count(&grid), 0);
    }

    #[test]
    fn test_twin_markers_in_one_row_clear_it_once() {
        let mut grid = Grid::from_rows(&[
            "########..", //
            "########..",
        ]);
        let mut piece =
            item_piece(PieceKind::O, ItemKind::TwinLineClear, &[(0, 0), (0, 1)]);
        piece.x = 8;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        // only the marked row 18 goes; the untouched bottom row stays put
        assert!(grid.is_row_full(19));
        assert!(!grid.is_row_full(18));
        assert_eq!(occupied_count(&grid), 10);
    }

    #[test]
    fn test_bomb_blanks_three_by_three_and_discards_piece() {
        let mut grid = Grid::from_rows(&[
            "##########", // row 9
            "##########",
            "##########",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        let mut piece = item_piece(PieceKind::T, ItemKind::Bomb, &[(0, 1)]);
        piece.x = 4;
        piece.y = 10;
        apply_landing(&mut grid, &mut piece);

        // marker at (5, 10): rows 9..=11 by columns 4..=6 are blanked
        for y in 9..12 {
            for x in 4..7 {
                assert!(grid.is_open(x, y), "({x},{y}) should be blank");
            }
        }
        assert!(grid.is_occupied(3, 10));
        assert!(grid.is_occupied(7, 10));
        // 30 garbage cells minus the 9 blanked, no piece cells added
        assert_eq!(occupied_count(&grid), 21);
    }

    #[test]
    fn test_bomb_clips_at_the_grid_corner() {
        let mut grid = Grid::from_rows(&[
            "##########", //
            "##########",
        ]);
        let mut piece = item_piece(PieceKind::O, ItemKind::Bomb, &[(1, 0)]);
        piece.x = 0;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        // marker at (0, 19): only the in-field quarter of the blast lands
        assert!(grid.is_open(0, 19));
        assert!(grid.is_open(1, 19));
        assert!(grid.is_open(0, 18));
        assert!(grid.is_open(1, 18));
        assert_eq!(occupied_count(&grid), 16);
    }

    #[test]
    fn test_gravity_settles_each_column_independently() {
        // column 4 holds one cell on the floor; column 5 has an
        // overhang at row 18 with an open floor cell beneath it
        let mut grid = Grid::from_rows(&[
            ".....#....", //
            "....#.....",
        ]);
        let mut piece = item_piece(PieceKind::T, ItemKind::Gravity, &[]);
        piece.x = 3;
        piece.y = 5;
        apply_landing(&mut grid, &mut piece);

        let t = Some(Some(CellTag::Piece(PieceKind::T)));
        // column 3 was empty, its single cell reaches the floor
        assert_eq!(grid.get(3, 19), t);
        // column 4 stacks its two cells on the existing one
        assert_eq!(grid.get(4, 18), t);
        assert_eq!(grid.get(4, 17), t);
        // column 5's cell tunnels under the overhang
        assert_eq!(grid.get(5, 19), t);
        assert!(grid.is_occupied(5, 18));
        assert_eq!(occupied_count(&grid), 6);
    }

    #[test]
    fn test_gravity_discards_cells_over_a_full_column() {
        let mut grid = Grid::new();
        for y in 0..GRID_HEIGHT as i8 {
            grid.set(0, y, Some(CellTag::Garbage));
        }
        let mut piece = item_piece(PieceKind::I, ItemKind::Gravity, &[]).rotated_cw();
        piece.x = 0;
        piece.y = 2;
        apply_landing(&mut grid, &mut piece);

        assert_eq!(occupied_count(&grid), GRID_HEIGHT as usize);
    }

    #[test]
    fn test_weight_crushes_the_stack_beneath_it() {
        let mut grid = Grid::from_rows(&[
            "....##....", //
            "....##....",
            "....##....",
            "....##....",
        ]);
        let mut piece = item_piece(PieceKind::O, ItemKind::Weight, &[]);
        piece.x = 4;
        piece.y = 14;
        apply_landing(&mut grid, &mut piece);

        // everything on the footprint is destroyed, the piece rests on
        // the floor
        let o = Some(Some(CellTag::Piece(PieceKind::O)));
        assert_eq!(grid.get(4, 18), o);
        assert_eq!(grid.get(5, 18), o);
        assert_eq!(grid.get(4, 19), o);
        assert_eq!(grid.get(5, 19), o);
        assert_eq!(occupied_count(&grid), 4);
        assert_eq!(piece.y, 18);
    }

    #[test]
    fn test_weight_on_the_floor_commits_in_place() {
        let mut grid = Grid::new();
        let mut piece = item_piece(PieceKind::O, ItemKind::Weight, &[]);
        piece.x = 0;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        assert_eq!(occupied_count(&grid), 4);
        assert!(grid.is_occupied(0, 18));
        assert!(grid.is_occupied(1, 19));
    }

    #[test]
    fn test_standard_piece_commits_in_place() {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(PieceKind::Z);
        piece.x = 0;
        piece.y = 18;
        apply_landing(&mut grid, &mut piece);

        assert_eq!(occupied_count(&grid), 4);
        assert_eq!(grid.get(0, 18), Some(Some(CellTag::Piece(PieceKind::Z))));
    }
}
