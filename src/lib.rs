//! Blockfall (workspace facade crate).
//!
//! This package keeps the public `blockfall::{core,bot,types}` API in one
//! place while the implementation lives in dedicated crates under `crates/`.

pub use blockfall_bot as bot;
pub use blockfall_core as core;
pub use blockfall_types as types;
