//! Ray geometry for rooks, bishops and queens.

use crate::game_state::board_location::Square;
use crate::game_state::chess_types::PieceKind;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Ray directions of a sliding piece; empty for the stepping pieces.
#[inline]
pub fn sliding_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}

/// Squares from `from` (exclusive) in one direction up to the board edge.
#[derive(Debug, Clone)]
pub struct Ray {
    next: Option<Square>,
    d_file: i8,
    d_rank: i8,
}

impl Ray {
    #[inline]
    pub fn new(from: Square, (d_file, d_rank): (i8, i8)) -> Self {
        Self {
            next: from.offset(d_file, d_rank),
            d_file,
            d_rank,
        }
    }
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let current = self.next?;
        self.next = current.offset(self.d_file, self.d_rank);
        Some(current)
    }
}
