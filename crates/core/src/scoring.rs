//! Scoring module - line-clear reward and hole penalty
//!
//! The heuristic rewards cleared lines and penalizes empty cells buried in
//! the stack: `lines * LINE_CLEAR_REWARD - gaps * GAP_PENALTY`.

use crate::types::{GAP_PENALTY, LINE_CLEAR_REWARD};

/// Bonus reported by a landing step that cleared `lines` rows
pub fn line_clear_bonus(lines: usize) -> i64 {
    lines as i64 * LINE_CLEAR_REWARD
}

/// Penalty for `gaps` buried empty cells
pub fn gap_penalty(gaps: usize) -> i64 {
    gaps as i64 * GAP_PENALTY
}

/// Combined heuristic score
pub fn heuristic_score(lines: usize, gaps: usize) -> i64 {
    line_clear_bonus(lines) - gap_penalty(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_bonus() {
        assert_eq!(line_clear_bonus(0), 0);
        assert_eq!(line_clear_bonus(1), 100);
        assert_eq!(line_clear_bonus(4), 400);
    }

    #[test]
    fn test_heuristic_score_can_go_negative() {
        assert_eq!(heuristic_score(0, 3), -30);
        assert_eq!(heuristic_score(2, 5), 150);
    }
}
