use crate::game_state::board::Board;
use crate::game_state::board_location::{Square, SquareHint};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_shared::destination_accepts;
use crate::moves::move_descriptions::NormalMove;
use crate::moves::sliding::{sliding_directions, Ray};

/// Rooks, bishops or queens (`kind`) that could slide onto `mv.to`.
///
/// Walks each ray outward from the destination; the first occupied square
/// ends the ray and is a candidate only if it holds a `color` piece of `kind`.
/// Rays that cannot pass through the origin hint are skipped.
pub fn sliding_origins(
    board: &Board,
    color: Color,
    kind: PieceKind,
    mv: &NormalMove,
    out: &mut Vec<Square>,
) {
    if !destination_accepts(board, color, mv) {
        return;
    }

    for &direction in sliding_directions(kind) {
        if !ray_can_reach_hint(mv.to, direction, &mv.from) {
            continue;
        }
        let blocker = Ray::new(mv.to, direction).find_map(|square| {
            board.get(square).map(|piece| (square, piece))
        });
        if let Some((square, piece)) = blocker {
            if piece.is(kind, color) && mv.from.matches(square) {
                out.push(square);
            }
        }
    }
}

/// The ray from `to` in `direction` can contain a square matching `hint`.
fn ray_can_reach_hint(to: Square, (d_file, d_rank): (i8, i8), hint: &SquareHint) -> bool {
    let file_ok = hint
        .file
        .is_none_or(|file| file.index().cmp(&to.file().index()) == d_file.cmp(&0));
    let rank_ok = hint
        .rank
        .is_none_or(|rank| rank.cmp(&to.rank()) == d_rank.cmp(&0));
    file_ok && rank_ok
}

#[cfg(test)]
mod tests {
    use super::sliding_origins;
    use crate::game_state::board::Board;
    use crate::game_state::board_location::{File, Square, SquareHint};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::NormalMove;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    fn board(fen: &str) -> Board {
        parse_fen(fen).expect("test FEN should parse").board
    }

    fn origins(board: &Board, kind: PieceKind, mv: NormalMove) -> Vec<Square> {
        let mut out = Vec::new();
        sliding_origins(board, Color::White, kind, &mv, &mut out);
        out.sort_by_key(|square| square.index());
        out
    }

    #[test]
    fn two_rooks_on_a_rank_are_told_apart_by_file() {
        let board = board("4k3/8/8/8/8/8/8/R4RK1 w - - 0 1");
        let plain = NormalMove::new(PieceKind::Rook, sq("d1"));
        assert_eq!(origins(&board, PieceKind::Rook, plain), vec![sq("a1"), sq("f1")]);

        let hinted = plain.from_hint(SquareHint {
            file: Some(File::A),
            rank: None,
        });
        assert_eq!(origins(&board, PieceKind::Rook, hinted), vec![sq("a1")]);
    }

    #[test]
    fn rank_hint_keeps_only_the_ray_towards_that_rank() {
        let board = board("R3k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let plain = NormalMove::new(PieceKind::Rook, sq("a4"));
        assert_eq!(origins(&board, PieceKind::Rook, plain), vec![sq("a1"), sq("a8")]);

        for (rank, expected) in [(1, sq("a1")), (8, sq("a8"))] {
            let hinted = plain.from_hint(SquareHint {
                file: None,
                rank: Some(rank),
            });
            assert_eq!(origins(&board, PieceKind::Rook, hinted), vec![expected]);
        }

        let off_ray = plain.from_hint(SquareHint {
            file: None,
            rank: Some(4),
        });
        assert!(origins(&board, PieceKind::Rook, off_ray).is_empty());
    }

    #[test]
    fn blockers_hide_pieces_behind_them() {
        let board = Board::standard();
        let mv = NormalMove::new(PieceKind::Bishop, sq("e3"));
        assert!(origins(&board, PieceKind::Bishop, mv).is_empty());

        let open = self::board("4k3/8/8/8/8/8/3P4/2B1K3 w - - 0 1");
        assert!(origins(&open, PieceKind::Bishop, mv).is_empty());
        let through_gap = NormalMove::new(PieceKind::Bishop, sq("a3"));
        assert_eq!(origins(&open, PieceKind::Bishop, through_gap), vec![sq("c1")]);
    }

    #[test]
    fn queen_combines_both_patterns_and_needs_capture_marker() {
        let board = board("4k3/8/8/8/3p4/8/8/Q3K3 w - - 0 1");
        let diagonal = NormalMove::new(PieceKind::Queen, sq("d4"));
        assert!(origins(&board, PieceKind::Queen, diagonal).is_empty());
        assert_eq!(
            origins(&board, PieceKind::Queen, diagonal.capturing()),
            vec![sq("a1")]
        );
        let file = NormalMove::new(PieceKind::Queen, sq("a7"));
        assert_eq!(origins(&board, PieceKind::Queen, file), vec![sq("a1")]);
    }
}
