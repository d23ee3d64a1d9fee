//! Terminal-oriented Unicode board renderer.

use crate::game_state::board::Board;
use crate::game_state::board_location::{File, Square};
use crate::game_state::chess_types::{Color, Piece, PieceKind};

/// Render the board to a Unicode string, White at the bottom.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (1..=8u8).rev() {
        out.push(char::from(b'0' + rank));
        out.push(' ');

        for file in File::ALL {
            let piece = Square::new(file, rank).and_then(|square| board.get(square));
            out.push(piece.map_or('·', piece_to_unicode));
            if file != File::H {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
