//! Canonical chess-rule constants and the per-game rule configuration.
//!
//! The draw thresholds live in [`RuleSet`] so that a collaborator can swap the
//! textual repetition heuristic for exact position counting without touching
//! the game logic.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Plies without a pawn move or capture that force a draw (75 full moves).
pub const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;

/// Trailing window, in plies, inspected by the move-text repetition check.
pub const REPETITION_WINDOW_PLIES: usize = 12;

/// Distinct move texts inside the window that count as a repetition.
pub const REPETITION_DISTINCT_MOVES: usize = 4;

/// Occurrences of one position that force a draw (fivefold repetition).
pub const FIVEFOLD_REPETITION: usize = 5;

/// How forced repetition draws are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepetitionRule {
    /// The last `repetition_window` plies collapse to exactly
    /// `repetition_distinct_moves` distinct resolved move texts. This is a
    /// heuristic: different texts can reach one position, and repeated texts
    /// do not guarantee a repeated position.
    #[default]
    MoveTextWindow,
    /// Count exact position keys (pieces, side to move, castling rights and
    /// en-passant state) and draw once one occurs `repetition_limit` times.
    PositionKey,
}

/// Draw-rule configuration carried by every `Game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub repetition: RepetitionRule,
    pub repetition_window: usize,
    pub repetition_distinct_moves: usize,
    pub repetition_limit: usize,
    pub no_progress_plies: u16,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            repetition: RepetitionRule::MoveTextWindow,
            repetition_window: REPETITION_WINDOW_PLIES,
            repetition_distinct_moves: REPETITION_DISTINCT_MOVES,
            repetition_limit: FIVEFOLD_REPETITION,
            no_progress_plies: SEVENTY_FIVE_MOVE_PLIES,
        }
    }
}

impl RuleSet {
    #[inline]
    pub fn with_repetition(mut self, repetition: RepetitionRule) -> Self {
        self.repetition = repetition;
        self
    }

    #[inline]
    pub fn with_repetition_window(mut self, window: usize, distinct_moves: usize) -> Self {
        self.repetition_window = window;
        self.repetition_distinct_moves = distinct_moves;
        self
    }

    #[inline]
    pub fn with_repetition_limit(mut self, limit: usize) -> Self {
        self.repetition_limit = limit;
        self
    }

    #[inline]
    pub fn with_no_progress_plies(mut self, plies: u16) -> Self {
        self.no_progress_plies = plies;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{RepetitionRule, RuleSet};

    #[test]
    fn defaults_match_the_forced_draw_rules() {
        let rules = RuleSet::default();
        assert_eq!(rules.repetition, RepetitionRule::MoveTextWindow);
        assert_eq!(rules.repetition_window, 12);
        assert_eq!(rules.repetition_distinct_moves, 4);
        assert_eq!(rules.repetition_limit, 5);
        assert_eq!(rules.no_progress_plies, 150);
    }

    #[test]
    fn builders_override_single_fields() {
        let rules = RuleSet::default()
            .with_repetition(RepetitionRule::PositionKey)
            .with_repetition_limit(3);
        assert_eq!(rules.repetition, RepetitionRule::PositionKey);
        assert_eq!(rules.repetition_limit, 3);
        assert_eq!(rules.no_progress_plies, 150);
    }
}
