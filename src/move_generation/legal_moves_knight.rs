use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_shared::{destination_accepts, is_candidate};
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::move_descriptions::NormalMove;

/// Knights that could land on `mv.to`. The offset set is symmetric, so
/// stepping out from the destination enumerates every possible origin.
pub fn knight_origins(board: &Board, color: Color, mv: &NormalMove, out: &mut Vec<Square>) {
    if !destination_accepts(board, color, mv) {
        return;
    }

    out.extend(
        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(d_file, d_rank)| mv.to.offset(d_file, d_rank))
            .filter(|&from| is_candidate(board, color, PieceKind::Knight, from, mv)),
    );
}
