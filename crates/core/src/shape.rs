//! Shape module - tight piece matrices and functional rotation
//!
//! Shapes are tight 0/1 matrices whose dimensions change with rotation
//! (the I bar toggles between 4x1 and 1x4). Rotation is the pure 90
//! degree clockwise matrix rotation, so four applications restore the
//! original matrix exactly and rotated copies can be generated
//! functionally without touching shared piece state.
//!
//! Sub-cells are addressed as (row, col) inside the matrix; the board
//! position of a sub-cell is (origin_x + col, origin_y + row).

use blockfall_types::{PieceKind, GRID_WIDTH};

/// Maximum shape edge length (the vertical I bar)
const MAX_EDGE: u8 = 4;

/// A tight 0/1 shape matrix, at most 4x4, packed row-major into 16 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeGrid {
    w: u8,
    h: u8,
    bits: u16,
}

impl ShapeGrid {
    /// Parse a shape from ASCII rows: 'X' filled, '.' empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let h = rows.len() as u8;
        assert!(h >= 1 && h <= MAX_EDGE);
        let w = rows[0].len() as u8;
        assert!(w >= 1 && w <= MAX_EDGE);

        let mut bits = 0u16;
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len() as u8, w, "ragged shape row {r}");
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    'X' => bits |= 1 << (r as u8 * w + c as u8),
                    '.' => {}
                    other => panic!("bad shape char {other:?}"),
                }
            }
        }
        Self { w, h, bits }
    }

    /// Matrix width in sub-cells
    pub fn width(&self) -> u8 {
        self.w
    }

    /// Matrix height in sub-cells
    pub fn height(&self) -> u8 {
        self.h
    }

    /// Whether the sub-cell at (row, col) is filled
    #[inline]
    pub fn get(&self, r: u8, c: u8) -> bool {
        if r >= self.h || c >= self.w {
            return false;
        }
        self.bits >> (r * self.w + c) & 1 == 1
    }

    /// Number of filled sub-cells
    pub fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Iterate the filled sub-cells as (row, col), row-major
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let (w, h) = (self.w, self.h);
        (0..h).flat_map(move |r| (0..w).map(move |c| (r, c)))
            .filter(|&(r, c)| self.get(r, c))
    }

    /// The shape rotated 90 degrees clockwise as a fresh matrix
    pub fn rotated_cw(&self) -> Self {
        let mut bits = 0u16;
        let (new_w, new_h) = (self.h, self.w);
        for (r, c) in self.cells() {
            let (nr, nc) = self.rotate_cell_cw(r, c);
            bits |= 1 << (nr * new_w + nc);
        }
        Self {
            w: new_w,
            h: new_h,
            bits,
        }
    }

    /// Where a sub-cell of this matrix lands after `rotated_cw`.
    /// Used to carry item markers through a rotation.
    #[inline]
    pub fn rotate_cell_cw(&self, r: u8, c: u8) -> (u8, u8) {
        (c, self.h - 1 - r)
    }
}

/// Spawn-orientation matrix for a piece kind.
///
/// Layouts match the usual north orientations: the T/S/Z/J/L nub row
/// sits on top of a flat 3-wide base, the I bar spawns flat.
pub fn base_shape(kind: PieceKind) -> ShapeGrid {
    match kind {
        PieceKind::I => ShapeGrid::from_rows(&["XXXX"]),
        PieceKind::O => ShapeGrid::from_rows(&["XX", "XX"]),
        PieceKind::T => ShapeGrid::from_rows(&[".X.", "XXX"]),
        PieceKind::S => ShapeGrid::from_rows(&[".XX", "XX."]),
        PieceKind::Z => ShapeGrid::from_rows(&["XX.", ".XX"]),
        PieceKind::J => ShapeGrid::from_rows(&["X..", "XXX"]),
        PieceKind::L => ShapeGrid::from_rows(&["..X", "XXX"]),
    }
}

/// Spawn origin for a shape: centered horizontally, bottom row entering
/// on row 0 so the rest of the shape starts inside the buffer.
pub fn spawn_origin(shape: ShapeGrid) -> (i8, i8) {
    let x = ((GRID_WIDTH - shape.width()) / 2) as i8;
    let y = -(shape.height() as i8 - 1);
    (x, y)
}
