//! Field evaluation heuristic
//!
//! Scores a settled field as a weighted sum of four surface features:
//! aggregate column height, complete rows, covered holes and bumpiness.
//! The default weights favor flat, low stacks that keep rows ready to
//! clear.

use blockfall_core::Grid;
use blockfall_types::{GRID_HEIGHT, GRID_WIDTH};

/// Linear weights applied to [`GridFeatures`] when scoring a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Penalty per unit of summed column height
    pub aggregate_height: f64,
    /// Reward per completed row
    pub complete_lines: f64,
    /// Penalty per empty cell covered by the stack
    pub holes: f64,
    /// Penalty per unit of adjacent height difference
    pub bumpiness: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            complete_lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

/// Surface measurements extracted from a settled field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFeatures {
    /// Tallest column height
    pub max_height: u8,
    /// Sum of all column heights
    pub aggregate_height: u32,
    /// Empty cells with an occupied cell somewhere above them
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns
    pub bumpiness: u32,
    /// Rows that are completely filled
    pub complete_lines: u32,
}

/// Measure the surface features of a field
pub fn features(grid: &Grid) -> GridFeatures {
    let heights = grid.column_heights();
    let mut f = GridFeatures::default();
    for x in 0..GRID_WIDTH as usize {
        let h = heights[x];
        f.max_height = f.max_height.max(h);
        f.aggregate_height += u32::from(h);
        // Empties at or below the column top are covered
        for y in (GRID_HEIGHT as usize - h as usize)..GRID_HEIGHT as usize {
            if grid.is_open(x as i8, y as i8) {
                f.holes += 1;
            }
        }
        if x + 1 < GRID_WIDTH as usize {
            f.bumpiness += u32::from(h.abs_diff(heights[x + 1]));
        }
    }
    f.complete_lines = grid.find_full_rows().len() as u32;
    f
}

/// Score a field; higher is a better surface to leave behind
pub fn evaluate(grid: &Grid, weights: &Weights) -> f64 {
    let f = features(grid);
    weights.aggregate_height * f64::from(f.aggregate_height)
        + weights.complete_lines * f64::from(f.complete_lines)
        + weights.holes * f64::from(f.holes)
        + weights.bumpiness * f64::from(f.bumpiness)
}
