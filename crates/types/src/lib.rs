//! Shared types module - grid vocabulary and tuning constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (simulation core, bot, headless drivers).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn buffer**: 2 hidden rows above the grid (`y` in `[-2, 0)`)
//!
//! Pieces spawn with their bottom row on row 0 and the rest of the shape in
//! the buffer, so an overfull stack rejects the spawn and ends the game.
//!
//! # Bot Cadence Constants
//!
//! Default delays for the action sequencer, in caller-supplied monotonic
//! milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_THINK_DELAY_MS` | 250 | Pause before running the move search |
//! | `DEFAULT_ROTATE_DELAY_MS` | 120 | Interval between rotate commands |
//! | `DEFAULT_MOVE_DELAY_MS` | 70 | Interval between lateral commands |
//! | `DEFAULT_DROP_DELAY_MS` | 180 | Pause before the hard drop |
//!
//! The delays exist so automated play goes through the same command surface
//! at a human-plausible cadence; they carry no simulation meaning.
//!
//! # Item Pieces
//!
//! Every tenth cleared line (`ITEM_LINE_INTERVAL`) forces an item piece into
//! the next slot. Item pieces wrap a standard shape and run a grid effect on
//! landing instead of the plain commit:
//!
//! | Kind | Markers | Landing effect |
//! |------|---------|----------------|
//! | `LineClear` | 1 | Removes the marked cell's row |
//! | `TwinLineClear` | 2 | Removes both marked cells' rows |
//! | `Bomb` | 1 | Clears the 3x3 area around the marked cell |
//! | `Gravity` | 0 | Piece cells settle per column, falling through gaps |
//! | `Weight` | 0 | Crushes through the stack down to the floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{CellTag, ItemKind, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let tag = CellTag::Item(ItemKind::Bomb);
//! assert_ne!(tag.code(), CellTag::Piece(kind).code());
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Hidden spawn buffer rows above the grid; `y` may go down to `-2`
pub const SPAWN_BUFFER_ROWS: u8 = 2;

/// Cleared-line threshold that forces an item piece into the next slot
pub const ITEM_LINE_INTERVAL: u32 = 10;

/// Default sequencer pause before the move search runs
pub const DEFAULT_THINK_DELAY_MS: u64 = 250;

/// Default interval between sequencer rotate commands
pub const DEFAULT_ROTATE_DELAY_MS: u64 = 120;

/// Default interval between sequencer lateral move commands
pub const DEFAULT_MOVE_DELAY_MS: u64 = 70;

/// Default sequencer pause before the hard drop
pub const DEFAULT_DROP_DELAY_MS: u64 = 180;

/// Line clear scoring table (classic scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1) for higher levels.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// The seven standard tetromino piece kinds
///
/// - **I**: horizontal bar, the only 4x1 shape
/// - **O**: 2x2 square, rotation-invariant
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in draw order, used by uniform piece generation.
    pub const fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ]
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display character for ASCII rendering
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// The five item-piece variants
///
/// An item piece is a standard shape wrapped with an item tag and, for the
/// marker-based kinds, one or two marked sub-cells. The tag selects the
/// landing effect that replaces the plain commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Removes the marked cell's row on landing, full or not
    LineClear,
    /// Two markers, each removing its row on landing
    TwinLineClear,
    /// Clears the 3x3 neighborhood around the marked cell
    Bomb,
    /// Piece cells settle per column, falling through gaps
    Gravity,
    /// Crushes through occupied cells down to the grid floor
    Weight,
}

impl ItemKind {
    /// All kinds in draw order, used by the item-spawn cadence.
    pub const fn all() -> [ItemKind; 5] {
        [
            ItemKind::LineClear,
            ItemKind::TwinLineClear,
            ItemKind::Bomb,
            ItemKind::Gravity,
            ItemKind::Weight,
        ]
    }

    /// Number of marked sub-cells this kind carries.
    pub const fn marker_count(&self) -> usize {
        match self {
            ItemKind::LineClear => 1,
            ItemKind::TwinLineClear => 2,
            ItemKind::Bomb => 1,
            ItemKind::Gravity => 0,
            ItemKind::Weight => 0,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::LineClear => "line-clear",
            ItemKind::TwinLineClear => "twin-line-clear",
            ItemKind::Bomb => "bomb",
            ItemKind::Gravity => "gravity",
            ItemKind::Weight => "weight",
        }
    }

    /// Display character for ASCII rendering
    pub fn as_char(&self) -> char {
        match self {
            ItemKind::LineClear => 'c',
            ItemKind::TwinLineClear => 'C',
            ItemKind::Bomb => '@',
            ItemKind::Gravity => 'g',
            ItemKind::Weight => 'w',
        }
    }
}

/// Tag identifying what occupies a grid cell
///
/// Marker sub-cells of an item piece commit with the `Item` tag; every
/// other sub-cell commits with the `Piece` tag. `Garbage` marks cells from
/// injected attack rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellTag {
    Piece(PieceKind),
    Item(ItemKind),
    Garbage,
}

impl CellTag {
    /// Stable u8 code for snapshots: 1-7 pieces, 8-12 items, 13 garbage.
    /// Code 0 is reserved for the empty cell.
    pub fn code(&self) -> u8 {
        match self {
            CellTag::Piece(PieceKind::I) => 1,
            CellTag::Piece(PieceKind::O) => 2,
            CellTag::Piece(PieceKind::T) => 3,
            CellTag::Piece(PieceKind::S) => 4,
            CellTag::Piece(PieceKind::Z) => 5,
            CellTag::Piece(PieceKind::J) => 6,
            CellTag::Piece(PieceKind::L) => 7,
            CellTag::Item(ItemKind::LineClear) => 8,
            CellTag::Item(ItemKind::TwinLineClear) => 9,
            CellTag::Item(ItemKind::Bomb) => 10,
            CellTag::Item(ItemKind::Gravity) => 11,
            CellTag::Item(ItemKind::Weight) => 12,
            CellTag::Garbage => 13,
        }
    }

    /// Display character for ASCII rendering
    pub fn as_char(&self) -> char {
        match self {
            CellTag::Piece(kind) => kind.as_char(),
            CellTag::Item(item) => item.as_char(),
            CellTag::Garbage => '#',
        }
    }
}

/// A cell on the grid
///
/// - `None`: empty cell
/// - `Some(CellTag)`: occupied cell with its tag
///
/// Occupancy and tag are one value, so "occupied iff tagged" holds by
/// construction.
pub type Cell = Option<CellTag>;

/// Snapshot code for a cell: 0 empty, otherwise the tag code.
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, |tag| tag.code())
}
