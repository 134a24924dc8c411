//! Piece module - the falling tetromino and its item payload
//!
//! A piece owns its shape matrix, its grid origin, and (for item
//! pieces) the marked sub-cells that anchor the landing effect. The
//! piece's visible cells are always committed into the grid; movement
//! helpers on the engine erase them, test the shifted spot, and commit
//! again.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shape::{base_shape, spawn_origin, ShapeGrid};
use blockfall_types::{CellTag, ItemKind, PieceKind};

/// Item pieces carry at most two marked sub-cells
pub const MAX_MARKERS: usize = 2;

/// Marked sub-cells of a piece, as (row, col) inside the shape matrix
pub type Markers = ArrayVec<(u8, u8), MAX_MARKERS>;

/// A falling piece, standard or item-carrying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Tetromino kind
    pub kind: PieceKind,
    /// Item payload, empty for standard pieces
    pub item: Option<ItemKind>,
    /// Grid column of the shape matrix's left edge
    pub x: i8,
    /// Grid row of the shape matrix's top edge, negative inside the buffer
    pub y: i8,
    shape: ShapeGrid,
    rot: u8,
    markers: Markers,
    effect_done: bool,
}

impl Piece {
    /// A standard piece at its spawn origin
    pub fn spawn(kind: PieceKind) -> Self {
        Self::spawn_item(kind, None, Markers::new())
    }

    /// An item piece at its spawn origin. `markers` index sub-cells of
    /// the spawn-orientation matrix and must sit on filled cells.
    pub fn spawn_item(kind: PieceKind, item: Option<ItemKind>, markers: Markers) -> Self {
        let shape = base_shape(kind);
        let (x, y) = spawn_origin(shape);
        for &(r, c) in &markers {
            assert!(shape.get(r, c), "marker ({r},{c}) off the {kind:?} shape");
        }
        Self {
            kind,
            item,
            x,
            y,
            shape,
            rot: 0,
            markers,
            effect_done: false,
        }
    }

    /// Current shape matrix
    pub fn shape(&self) -> ShapeGrid {
        self.shape
    }

    /// Quarter-turns applied since spawn, modulo four
    pub fn rotation(&self) -> u8 {
        self.rot
    }

    /// Whether this piece carries an item payload
    pub fn is_item(&self) -> bool {
        self.item.is_some()
    }

    /// Marked sub-cells as (row, col) in the current shape matrix
    pub fn markers(&self) -> &[(u8, u8)] {
        &self.markers
    }

    /// Whether the landing effect has already run
    pub fn effect_done(&self) -> bool {
        self.effect_done
    }

    pub(crate) fn mark_effect_done(&mut self) {
        self.effect_done = true;
    }

    /// The piece's occupied grid positions as absolute (x, y)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }

    /// Absolute (x, y) grid positions of the marked sub-cells
    pub fn marker_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.markers
            .iter()
            .map(move |&(r, c)| (self.x + c as i8, self.y + r as i8))
    }

    /// A copy rotated one quarter-turn clockwise, markers carried along.
    /// The original piece is untouched, so a rejected rotation needs no
    /// restore pass.
    pub fn rotated_cw(&self) -> Self {
        let mut markers = Markers::new();
        for &(r, c) in &self.markers {
            markers.push(self.shape.rotate_cell_cw(r, c));
        }
        Self {
            shape: self.shape.rotated_cw(),
            rot: (self.rot + 1) % 4,
            markers,
            ..self.clone()
        }
    }

    /// Whether the piece fits at its current origin
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.can_place(self.shape, self.x, self.y)
    }

    /// Write the piece's visible cells into the grid. Marked sub-cells
    /// of an item piece take the item tag, the rest the piece tag.
    pub fn commit_to(&self, grid: &mut Grid) {
        for (r, c) in self.shape.cells() {
            let tag = match self.item {
                Some(item) if self.markers.contains(&(r, c)) => CellTag::Item(item),
                _ => CellTag::Piece(self.kind),
            };
            grid.set(self.x + c as i8, self.y + r as i8, Some(tag));
        }
    }

    /// Blank the piece's visible cells out of the grid
    pub fn erase_from(&self, grid: &mut Grid) {
        grid.erase_shape(self.shape, self.x, self.y);
    }
}
