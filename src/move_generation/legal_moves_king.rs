use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_shared::{destination_accepts, is_candidate};
use crate::moves::king_moves::{king_targets, KING_OFFSETS};
use crate::moves::move_descriptions::NormalMove;

/// Kings that could step onto `mv.to`.
///
/// Without a hint the king is located by board scan; with one, the eight
/// neighbours of the destination are filtered through it.
pub fn king_origins(board: &Board, color: Color, mv: &NormalMove, out: &mut Vec<Square>) {
    if !destination_accepts(board, color, mv) {
        return;
    }

    if mv.from.is_empty() {
        if let Some(king) = board.king_square(color) {
            if king_targets(king).contains(mv.to) {
                out.push(king);
            }
        }
        return;
    }

    out.extend(
        KING_OFFSETS
            .iter()
            .filter_map(|&(d_file, d_rank)| mv.to.offset(d_file, d_rank))
            .filter(|&from| is_candidate(board, color, PieceKind::King, from, mv)),
    );
}

#[cfg(test)]
mod tests {
    use super::king_origins;
    use crate::game_state::board_location::{Square, SquareHint};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::NormalMove;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn king_found_by_scan_or_by_hint() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
            .expect("test FEN should parse")
            .board;

        let mut out = Vec::new();
        king_origins(&board, Color::White, &NormalMove::new(PieceKind::King, sq("d2")), &mut out);
        assert_eq!(out, vec![sq("e1")]);

        out.clear();
        let hinted = NormalMove::new(PieceKind::King, sq("d2")).from_hint(SquareHint::exact(sq("e1")));
        king_origins(&board, Color::White, &hinted, &mut out);
        assert_eq!(out, vec![sq("e1")]);

        out.clear();
        king_origins(&board, Color::White, &NormalMove::new(PieceKind::King, sq("e3")), &mut out);
        assert!(out.is_empty());
    }
}
