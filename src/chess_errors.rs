//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type of the crate. Every failure is
//! recoverable: a rejected move or position text leaves the game untouched.
//!
//! Usage guidelines:
//! - Parsing failures (`MoveText`, `PositionFormat`, `InvalidPgn`,
//!   `InvalidCoordinate`) describe bad input and are suitable for showing to
//!   end users as-is.
//! - `NoLegalOrigin` and `AmbiguousOrigin` are both "the move was not played",
//!   but callers should treat them differently: an ambiguous move is legal in
//!   spirit and only needs a more specific origin.
//! - `GameOver` is returned for any move submitted after the game ended.

use std::fmt;

use thiserror::Error;

use crate::game_state::board_location::Square;
use crate::game_state::game::GameStatus;

/// Field of the six-field position text that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionField {
    /// The text does not split into exactly six fields.
    Layout,
    Placement,
    SideToMove,
    Castling,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl fmt::Display for PositionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PositionField::Layout => "layout",
            PositionField::Placement => "piece placement",
            PositionField::SideToMove => "side to move",
            PositionField::Castling => "castling rights",
            PositionField::EnPassant => "en-passant target",
            PositionField::HalfmoveClock => "halfmove clock",
            PositionField::FullmoveNumber => "fullmove number",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// Position text did not match the six-field grammar.
    #[error("invalid position text ({field}): {reason}")]
    PositionFormat { field: PositionField, reason: String },

    /// Move text could not be parsed into any move token.
    ///
    /// Payload: the offending token.
    #[error("could not parse move text {0:?}")]
    MoveText(String),

    /// The move parsed, but no piece may legally make it in this position.
    ///
    /// Payload: the move text as submitted.
    #[error("no piece can legally play {0}")]
    NoLegalOrigin(String),

    /// More than one piece matches the move text.
    #[error("{notation} is ambiguous between {}", format_squares(candidates))]
    AmbiguousOrigin {
        notation: String,
        candidates: Vec<Square>,
    },

    /// A square written as text lies outside the board.
    #[error("invalid square {0:?}")]
    InvalidCoordinate(String),

    /// A move was submitted after the game reached a terminal status.
    #[error("the game is over ({0})")]
    GameOver(GameStatus),

    /// A game record could not be read or replayed.
    #[error("invalid game record: {0}")]
    InvalidPgn(String),
}

impl ChessErrors {
    pub(crate) fn position(field: PositionField, reason: impl Into<String>) -> Self {
        ChessErrors::PositionFormat {
            field,
            reason: reason.into(),
        }
    }
}

fn format_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(Square::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{ChessErrors, PositionField};

    #[test]
    fn ambiguous_origin_lists_candidates() {
        let err = ChessErrors::AmbiguousOrigin {
            notation: "Nd2".to_owned(),
            candidates: vec![
                "b1".parse().expect("b1 should parse"),
                "f3".parse().expect("f3 should parse"),
            ],
        };
        assert_eq!(err.to_string(), "Nd2 is ambiguous between b1, f3");
    }

    #[test]
    fn position_errors_name_the_field() {
        let err = ChessErrors::position(PositionField::Castling, "duplicate 'K'");
        assert_eq!(
            err.to_string(),
            "invalid position text (castling rights): duplicate 'K'"
        );
    }
}
