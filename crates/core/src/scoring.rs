//! Scoring module - classic line-clear scoring and level pacing
//!
//! Scores follow the classic table: 40/100/300/1200 base points for
//! 1-4 simultaneous clears, multiplied by (level + 1). The level rises
//! every ten cleared lines and only affects scoring and gravity pacing,
//! never the simulation itself.

use blockfall_types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines] * (level + 1)
}

/// Calculate drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * 2
    } else {
        cells
    }
}

/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get gravity interval for a level (in milliseconds), clamped at a floor
pub fn get_drop_interval_ms(level: u32) -> u64 {
    let intervals: [u64; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

    if (level as usize) < intervals.len() {
        intervals[level as usize]
    } else {
        120
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_no_score_outside_the_table() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 3), 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(8), 160);
        assert_eq!(get_drop_interval_ms(9), 120);
        assert_eq!(get_drop_interval_ms(20), 120);
    }
}
