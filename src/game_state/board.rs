//! Board storage: a 64-slot mailbox plus castling rights and en-passant masks.
//!
//! The rules that read and mutate this state live in `move_generation`
//! (`legal_move_checks`, `legal_moves_*`, `legal_move_apply`) as further
//! `impl Board` blocks.
//!
//! Square indexing is `0 == a1`, `7 == h1`, `63 == h8`.

use crate::game_state::board_location::{File, Square};
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::undo_state::UndoState;
use crate::moves::move_descriptions::CastlingSide;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    /// `[color][side]`; only ever goes from `true` to `false` during play.
    pub(crate) can_castle: [[bool; 2]; 2],
    /// `[color]` file bitmask of the pawn that just advanced two squares.
    /// Cleared for both colors on every move.
    pub(crate) en_passant: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// No pieces, no castling rights, no en-passant state.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            can_castle: [[false; 2]; 2],
            en_passant: [0; 2],
        }
    }

    /// Standard initial setup with every castling right held.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                board.set(Square::home(file, color), Some(Piece::new(kind, color)));
                if let Some(square) = Square::new(file, color.pawn_start_rank()) {
                    board.set(square, Some(Piece::new(PieceKind::Pawn, color)));
                }
            }
        }
        board.can_castle = [[true; 2]; 2];
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Copy of the 64-slot piece grid, `a1` first.
    #[inline]
    pub fn snapshot(&self) -> [Option<Piece>; 64] {
        self.squares
    }

    #[inline]
    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.can_castle[color.index()][side.index()]
    }

    #[inline]
    pub(crate) fn set_can_castle(&mut self, color: Color, side: CastlingSide, allowed: bool) {
        self.can_castle[color.index()][side.index()] = allowed;
    }

    /// File bitmask (bit 0 = a-file) of `color`'s pawn capturable en passant.
    #[inline]
    pub fn en_passant_mask(&self, color: Color) -> u8 {
        self.en_passant[color.index()]
    }

    #[inline]
    pub(crate) fn set_en_passant_file(&mut self, color: Color, file: File) {
        self.en_passant[color.index()] = 1 << file.index();
    }

    #[inline]
    pub(crate) fn clear_en_passant(&mut self) {
        self.en_passant = [0; 2];
    }

    /// Every occupied square with its piece, `a1` to `h8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// First king of `color` found by board scan.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Home corner of the rook that castles on `side`.
    #[inline]
    pub(crate) fn rook_home(color: Color, side: CastlingSide) -> Square {
        match side {
            CastlingSide::Short => Square::home(File::H, color),
            CastlingSide::Long => Square::home(File::A, color),
        }
    }

    #[inline]
    pub(crate) fn save(&self) -> UndoState {
        UndoState {
            squares: self.squares,
            can_castle: self.can_castle,
            en_passant: self.en_passant,
        }
    }

    #[inline]
    pub(crate) fn restore(&mut self, undo: UndoState) {
        self.squares = undo.squares;
        self.can_castle = undo.can_castle;
        self.en_passant = undo.en_passant;
    }

    /// Moves whatever stands on `from` to `to`, overwriting the destination.
    #[inline]
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.squares[from.index() as usize].take();
        self.squares[to.index() as usize] = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::board_location::Square;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::moves::move_descriptions::CastlingSide;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn standard_setup_places_all_pieces() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.get(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq("g7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(board.get(sq("e4")), None);
        assert!(board.can_castle(Color::Black, CastlingSide::Long));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn restore_undoes_every_field() {
        let mut board = Board::standard();
        let undo = board.save();

        board.relocate(sq("e2"), sq("e4"));
        board.set_can_castle(Color::White, CastlingSide::Short, false);
        board.set_en_passant_file(Color::White, sq("e2").file());
        assert_ne!(board, Board::standard());

        board.restore(undo);
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn empty_board_has_no_king() {
        let board = Board::empty();
        assert_eq!(board.king_square(Color::White), None);
        assert!(board.snapshot().iter().all(Option::is_none));
    }
}
