//! Origin resolution: which squares could have made a given move.
//!
//! Dispatches on the moving piece kind to the per-piece resolvers. The result
//! is purely geometric; the self-check trial happens when the move is applied.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_moves_king::king_origins;
use crate::move_generation::legal_moves_knight::knight_origins;
use crate::move_generation::legal_moves_pawn::pawn_origins;
use crate::move_generation::legal_moves_sliding::sliding_origins;
use crate::moves::move_descriptions::NormalMove;

/// Every square holding a `color` piece that could play `mv`, sorted `a1`
/// first.
pub fn resolve_origins(board: &Board, color: Color, mv: &NormalMove) -> Vec<Square> {
    let mut origins = Vec::<Square>::with_capacity(2);

    match mv.piece {
        PieceKind::Pawn => pawn_origins(board, color, mv, &mut origins),
        PieceKind::Knight => knight_origins(board, color, mv, &mut origins),
        PieceKind::King => king_origins(board, color, mv, &mut origins),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            sliding_origins(board, color, mv.piece, mv, &mut origins)
        }
    }
    origins.sort_unstable();

    trace!(
        piece = ?mv.piece,
        to = %mv.to,
        hint = %mv.from,
        ?origins,
        "resolved origin candidates"
    );
    origins
}
