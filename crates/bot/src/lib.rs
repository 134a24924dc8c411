//! Heuristic bot for the falling-block engine
//!
//! Three layers, used together or separately:
//!
//! - [`eval`] measures a settled field and scores it with linear weights
//! - [`search`] enumerates every rotation and column for the falling
//!   piece and keeps the best-scoring straight drop
//! - [`driver`] turns the chosen placement into timed engine commands
//!
//! ```
//! use blockfall_bot::BotDriver;
//! use blockfall_core::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::with_seed(12345));
//! engine.start();
//!
//! let mut driver = BotDriver::default();
//! let mut now_ms = 0;
//! while !engine.game_over() && now_ms < 10_000 {
//!     driver.update(&mut engine, now_ms);
//!     now_ms += 10;
//! }
//! assert!(engine.pieces_placed() > 0);
//! ```

pub mod driver;
pub mod eval;
pub mod search;

pub use driver::{BotConfig, BotDriver, BotState};
pub use eval::{evaluate, features, GridFeatures, Weights};
pub use search::{best_placement, find_best_move, Move};
