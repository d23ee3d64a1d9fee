use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_shared::is_candidate;
use crate::moves::move_descriptions::NormalMove;

/// Pawns that could reach `mv.to`.
///
/// Non-captures look straight back along the file: one square, or two from
/// the start rank when the square in between is empty. Captures look at the
/// two diagonals behind the destination and need an enemy piece there or a
/// live en-passant window.
pub fn pawn_origins(board: &Board, color: Color, mv: &NormalMove, out: &mut Vec<Square>) {
    let to = mv.to;
    let back = -color.forward();

    if !mv.is_capture {
        if board.get(to).is_some() {
            return;
        }
        let Some(one) = to.offset(0, back) else {
            return;
        };
        match board.get(one) {
            Some(_) => {
                if is_candidate(board, color, PieceKind::Pawn, one, mv) {
                    out.push(one);
                }
            }
            None => {
                let double_step = one
                    .offset(0, back)
                    .filter(|two| two.rank() == color.pawn_start_rank());
                if let Some(two) = double_step {
                    if is_candidate(board, color, PieceKind::Pawn, two, mv) {
                        out.push(two);
                    }
                }
            }
        }
        return;
    }

    let enemy_on_target = board.get(to).is_some_and(|p| p.color != color);
    if board.get(to).is_some() && !enemy_on_target {
        return;
    }

    for d_file in [-1, 1] {
        let Some(from) = to.offset(d_file, back) else {
            continue;
        };
        if !is_candidate(board, color, PieceKind::Pawn, from, mv) {
            continue;
        }
        if enemy_on_target || board.is_en_passant_capture(color, from, to) {
            out.push(from);
        }
    }
}
