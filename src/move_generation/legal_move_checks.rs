//! Attack coverage and the check/stalemate primitives built on it.

use crate::game_state::board::Board;
use crate::game_state::board_location::{Square, SquareSet};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::CastlingSide;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding::{sliding_directions, Ray};

impl Board {
    /// Squares the `color` piece on `square` covers.
    ///
    /// Stepping pieces cover their fixed offsets; sliders cover each ray up
    /// to and including the first enemy piece. With `pawn_captures_only`
    /// false a pawn also covers its forward pushes. Empty if `square` holds
    /// no piece of `color`.
    pub fn covered_squares(
        &self,
        color: Color,
        square: Square,
        pawn_captures_only: bool,
    ) -> SquareSet {
        let Some(piece) = self.get(square).filter(|piece| piece.color == color) else {
            return SquareSet::EMPTY;
        };

        match piece.kind {
            PieceKind::Pawn => {
                let mut covered = pawn_attacks(color, square);
                if !pawn_captures_only {
                    if let Some(one) = square.offset(0, color.forward()) {
                        covered.insert(one);
                        if square.rank() == color.pawn_start_rank() {
                            if let Some(two) = one.offset(0, color.forward()) {
                                covered.insert(two);
                            }
                        }
                    }
                }
                covered
            }
            PieceKind::Knight => knight_targets(square),
            PieceKind::King => king_targets(square),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let mut covered = SquareSet::EMPTY;
                for &direction in sliding_directions(piece.kind) {
                    for target in Ray::new(square, direction) {
                        match self.get(target) {
                            None => covered.insert(target),
                            Some(blocker) => {
                                if blocker.color != color {
                                    covered.insert(target);
                                }
                                break;
                            }
                        }
                    }
                }
                covered
            }
        }
    }

    /// Union of [`Board::covered_squares`] over every `color` piece.
    pub fn all_covered_squares(&self, color: Color, pawn_captures_only: bool) -> SquareSet {
        self.pieces_of(color)
            .fold(SquareSet::EMPTY, |covered, (square, _)| {
                covered | self.covered_squares(color, square, pawn_captures_only)
            })
    }

    /// `color`'s king stands on a square the opponent covers.
    pub fn is_check(&self, color: Color) -> bool {
        self.king_square(color).is_some_and(|king| {
            self.all_covered_squares(color.opposite(), true)
                .contains(king)
        })
    }

    /// Pseudo-legal destinations of the piece on `from`, ignoring self-check.
    /// Includes en-passant captures; castling is handled separately.
    pub(crate) fn raw_destinations(&self, from: Square) -> SquareSet {
        let Some(piece) = self.get(from) else {
            return SquareSet::EMPTY;
        };
        let color = piece.color;

        match piece.kind {
            PieceKind::Pawn => {
                let mut targets = SquareSet::EMPTY;
                if let Some(one) = from
                    .offset(0, color.forward())
                    .filter(|sq| self.get(*sq).is_none())
                {
                    targets.insert(one);
                    if from.rank() == color.pawn_start_rank() {
                        if let Some(two) = one
                            .offset(0, color.forward())
                            .filter(|sq| self.get(*sq).is_none())
                        {
                            targets.insert(two);
                        }
                    }
                }
                for target in pawn_attacks(color, from).iter() {
                    let enemy = self.get(target).is_some_and(|p| p.color != color);
                    if enemy || self.is_en_passant_capture(color, from, target) {
                        targets.insert(target);
                    }
                }
                targets
            }
            _ => self
                .covered_squares(color, from, true)
                .iter()
                .filter(|target| self.get(*target).is_none_or(|p| p.color != color))
                .collect(),
        }
    }

    /// A pawn of `color` on `from` may capture en passant on `to`.
    pub(crate) fn is_en_passant_capture(&self, color: Color, from: Square, to: Square) -> bool {
        let opponent = color.opposite();
        let diagonal = [-1, 1]
            .into_iter()
            .any(|d_file| from.offset(d_file, color.forward()) == Some(to));

        diagonal
            && to.rank() == color.en_passant_target_rank()
            && self.get(to).is_none()
            && self.en_passant_mask(opponent) & (1 << to.file().index()) != 0
            && self.get(from).is_some_and(|p| p.is(PieceKind::Pawn, color))
            && to
                .offset(0, -color.forward())
                .and_then(|behind| self.get(behind))
                .is_some_and(|p| p.is(PieceKind::Pawn, opponent))
    }

    /// At least one move of `color` leaves its king safe.
    ///
    /// Each trial runs on a copy of the board, so `self` is never mutated.
    pub fn has_valid_moves(&self, color: Color) -> bool {
        for (from, piece) in self.pieces_of(color) {
            for to in self.raw_destinations(from).iter() {
                let mut trial = *self;
                trial.execute(from, to, piece.kind, None, color);
                if !trial.is_check(color) {
                    return true;
                }
            }
        }

        !self.is_check(color)
            && CastlingSide::ALL
                .into_iter()
                .any(|side| self.castling_obstacle(side, color).is_none())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.has_valid_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_check(color) && !self.has_valid_moves(color)
    }
}
