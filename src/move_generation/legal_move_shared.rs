//! Helpers shared by the per-piece origin resolvers.

use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::move_descriptions::NormalMove;

/// The destination agrees with the move's capture marker.
///
/// A friendly piece never may be landed on, an enemy piece only by a capture,
/// and an empty square only by a non-capture. En-passant captures onto an
/// empty square are checked by the pawn resolver itself.
#[inline]
pub fn destination_accepts(board: &Board, color: Color, mv: &NormalMove) -> bool {
    match board.get(mv.to) {
        None => !mv.is_capture,
        Some(occupant) => occupant.color != color && mv.is_capture,
    }
}

/// `square` holds a `color` piece of `kind` that agrees with the move's
/// origin hint.
#[inline]
pub fn is_candidate(
    board: &Board,
    color: Color,
    kind: PieceKind,
    square: Square,
    mv: &NormalMove,
) -> bool {
    mv.from.matches(square) && board.get(square).is_some_and(|p| p.is(kind, color))
}
