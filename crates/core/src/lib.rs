//! Core simulation logic - pure, deterministic, and testable
//!
//! This crate contains the complete falling-block simulation: grid,
//! shapes, pieces, items, and the engine state machine. It has **zero
//! dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical runs
//! - **Testable**: Comprehensive unit tests for all simulation rules
//! - **Portable**: Can run in any environment (terminal, server, headless)
//! - **Fast**: Zero-allocation hot paths for search and snapshots
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playing field with placement checks, row clearing,
//!   and attack-row injection
//! - [`shape`]: tight piece matrices with functional clockwise rotation
//! - [`piece`]: the falling tetromino, its item payload and marker cells
//! - [`items`]: the four landing behaviors for item pieces
//! - [`engine`]: the command-driven simulation state machine
//! - [`rng`]: seedable LCG for piece and item draws
//! - [`scoring`]: classic line-clear scoring and level pacing
//! - [`snapshot`]: zero-allocation state export for presentation layers
//!
//! # Simulation Rules
//!
//! - Pieces spawn centered with their bottom row on the top grid row;
//!   the rest waits inside a 2-row buffer above the field
//! - Movement erases the piece from the grid, probes the target cells,
//!   and commits again, so the grid always carries the visible piece
//! - Rotation is probed on a copy and simply dropped when it does not
//!   fit, there are no wall kicks
//! - Landing fires an item piece's behavior exactly once; full rows
//!   are swept afterwards by an explicit `clear_lines` call
//! - Every tenth cleared line forces the next draw to carry an item
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::with_seed(12345));
//! engine.start();
//!
//! engine.move_right();
//! engine.rotate();
//! let rows = engine.hard_drop();
//! assert!(rows > 0);
//!
//! let cleared = engine.clear_lines();
//! assert!(cleared.is_empty());
//! assert!(engine.spawn_next());
//! ```

pub mod engine;
pub mod grid;
pub mod items;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use engine::{DropOutcome, Engine, EngineConfig, NextPiece};
pub use grid::{ClearedRows, Grid, RowCells};
pub use piece::{Markers, Piece};
pub use rng::SimpleRng;
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms};
pub use shape::{base_shape, spawn_origin, ShapeGrid};
pub use snapshot::{ActivePieceSnapshot, EngineSnapshot};
