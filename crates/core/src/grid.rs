//! Grid module - manages the playing field
//!
//! The grid is a 10x20 field where each cell is empty or carries a tag for
//! the piece kind, item kind, or garbage that occupies it. Uses a flat array
//! for cache locality and zero-allocation row operations.
//! Coordinates: (x, y) with x in 0..9 left to right, y in 0..19 top to
//! bottom. Placement checks additionally admit a 2-row spawn buffer above
//! the field (y in -2..0) that is exempt from occupancy and never stored.

use arrayvec::ArrayVec;

use crate::shape::ShapeGrid;
use blockfall_types::{
    cell_code, Cell, CellTag, ItemKind, PieceKind, GRID_HEIGHT, GRID_WIDTH, SPAWN_BUFFER_ROWS,
};

/// Grid width as usize for indexing
pub const W: usize = GRID_WIDTH as usize;

/// Grid height as usize for indexing
pub const H: usize = GRID_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = W * H;

/// One stored row of cells, as returned by the clearing operations
pub type RowCells = [Cell; W];

/// Cleared-row contents in clear order (bottom-up)
pub type ClearedRows = ArrayVec<RowCells, H>;

/// The playing field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    ///
    /// Buffer rows (y < 0) are not stored and return `None`.
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * W + (x as usize))
    }

    /// Get width of the grid
    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    /// Get height of the grid
    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the stored field
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if outside the stored field
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a stored cell is empty (inside the field and untagged)
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a stored cell is occupied
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Placement legality for a shape with its top-left sub-cell at (x, y).
    ///
    /// Every filled sub-cell must map inside `[0, WIDTH)` horizontally and
    /// `[-2, HEIGHT)` vertically; sub-cells on stored rows (y >= 0) must
    /// land on empty cells. Buffer rows are exempt from occupancy.
    pub fn can_place(&self, shape: ShapeGrid, x: i8, y: i8) -> bool {
        for (r, c) in shape.cells() {
            let cx = x + c as i8;
            let cy = y + r as i8;
            if cx < 0 || cx >= GRID_WIDTH as i8 {
                return false;
            }
            if cy >= GRID_HEIGHT as i8 || cy < -(SPAWN_BUFFER_ROWS as i8) {
                return false;
            }
            if cy >= 0 && self.is_occupied(cx, cy) {
                return false;
            }
        }
        true
    }

    /// Write a shape's filled sub-cells with a uniform tag.
    /// Sub-cells still inside the spawn buffer are not stored.
    pub fn commit_shape(&mut self, shape: ShapeGrid, x: i8, y: i8, tag: CellTag) {
        for (r, c) in shape.cells() {
            self.set(x + c as i8, y + r as i8, Some(tag));
        }
    }

    /// Blank a shape's filled sub-cells.
    pub fn erase_shape(&mut self, shape: ShapeGrid, x: i8, y: i8) {
        for (r, c) in shape.cells() {
            self.set(x + c as i8, y + r as i8, None);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        match Self::index(0, y) {
            Some(start) => self.cells[start..start + W].iter().all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Row indices that are completely filled, top to bottom
    pub fn find_full_rows(&self) -> ArrayVec<i8, H> {
        let mut rows = ArrayVec::new();
        for y in 0..GRID_HEIGHT as i8 {
            if self.is_row_full(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Copy one stored row
    pub fn row_cells(&self, y: i8) -> RowCells {
        let mut row = [None; W];
        if let Some(start) = Self::index(0, y) {
            row.copy_from_slice(&self.cells[start..start + W]);
        }
        row
    }

    /// Remove a row: shift all rows above it down by one and blank the top
    /// row. Out-of-field indices are ignored.
    pub fn remove_row(&mut self, y: i8) {
        if Self::index(0, y).is_none() {
            return;
        }
        let y = y as usize;

        // copy_within handles the overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * W;
            let dst_start = row * W;
            self.cells
                .copy_within(src_start..src_start + W, dst_start);
        }

        for cell in &mut self.cells[0..W] {
            *cell = None;
        }
    }

    /// Remove the given rows, full or not.
    ///
    /// Rows are processed top to bottom so that removing one row never
    /// shifts a not-yet-processed index; duplicates are ignored.
    pub fn clear_rows(&mut self, rows: &[i8]) {
        let mut sorted: ArrayVec<i8, H> = ArrayVec::new();
        for &y in rows {
            if Self::index(0, y).is_some() && !sorted.contains(&y) {
                let _ = sorted.try_push(y);
            }
        }
        sorted.sort_unstable();
        for y in sorted {
            self.remove_row(y);
        }
    }

    /// Clear every full row and return the cleared rows' contents.
    ///
    /// Scans bottom to top and re-checks the same index after each removal,
    /// since the row that slides down into it may itself be full.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = GRID_HEIGHT as i8 - 1;
        while y >= 0 {
            if self.is_row_full(y) {
                cleared.push(self.row_cells(y));
                self.remove_row(y);
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Splice attack rows onto the bottom of the grid, pushing the stack up.
    ///
    /// Rows are applied in order, so the last slice element ends up as the
    /// bottom row. Returns true if any occupied cell was pushed out the top.
    pub fn inject_rows(&mut self, rows: &[RowCells]) -> bool {
        let mut overflow = false;
        for row in rows {
            overflow |= self.cells[0..W].iter().any(|cell| cell.is_some());
            self.cells.copy_within(W.., 0);
            self.cells[GRID_SIZE - W..].copy_from_slice(row);
        }
        overflow
    }

    /// Stack height per column: HEIGHT minus the first occupied row, or 0
    /// for an empty column.
    pub fn column_heights(&self) -> [u8; W] {
        let mut heights = [0u8; W];
        for x in 0..W {
            for y in 0..H {
                if self.cells[y * W + x].is_some() {
                    heights[x] = (H - y) as u8;
                    break;
                }
            }
        }
        heights
    }

    /// Lowest empty row in a column, scanning from the floor upward.
    /// Falls through gaps beneath the stack. None if the column is full
    /// or x is out of range.
    pub fn lowest_open_row(&self, x: i8) -> Option<i8> {
        if x < 0 || x >= GRID_WIDTH as i8 {
            return None;
        }
        for y in (0..GRID_HEIGHT as i8).rev() {
            if self.is_open(x, y) {
                return Some(y);
            }
        }
        None
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid into a byte matrix of cell codes without allocating
    pub fn write_codes(&self, out: &mut [[u8; W]; H]) {
        for y in 0..H {
            for x in 0..W {
                out[y][x] = cell_code(self.cells[y * W + x]);
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Render the grid as one character per cell, rows separated by
    /// newlines. Empty cells render as '.'.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(GRID_SIZE + H);
        for y in 0..H {
            for x in 0..W {
                match self.cells[y * W + x] {
                    Some(tag) => out.push(tag.as_char()),
                    None => out.push('.'),
                }
            }
            if y + 1 < H {
                out.push('\n');
            }
        }
        out
    }

    /// Build a grid from ASCII rows placed at the bottom of the field,
    /// the inverse of [`render_ascii`](Self::render_ascii) for partial
    /// fields. '.' is empty, '#' garbage, piece letters their kind tag.
    /// Panics on malformed rows, intended for fixtures and tooling.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= H);
        let mut grid = Self::new();
        let base = H - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), W, "row {i} must be {W} cells");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(CellTag::Garbage),
                    _ => {
                        if let Some(&item) =
                            ItemKind::all().iter().find(|i| i.as_char() == ch)
                        {
                            Some(CellTag::Item(item))
                        } else {
                            let kind = PieceKind::from_str(&ch.to_string())
                                .unwrap_or_else(|| panic!("bad cell char {ch:?}"));
                            Some(CellTag::Piece(kind))
                        }
                    }
                };
                grid.cells[(base + i) * W + x] = cell;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
