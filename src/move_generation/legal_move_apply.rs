//! Resolving and playing one move on a [`Board`].
//!
//! Normal moves are resolved to a single origin, played, and rolled back if
//! they leave the mover's king attacked. Castling is validated up front and
//! never needs a rollback.

use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::board_location::{File, Square, SquareHint};
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::move_generation::legal_move_generator::resolve_origins;
use crate::moves::move_descriptions::{CastlingSide, Move, MoveKind, NormalMove};

/// What [`Board::execute`] observed while moving a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Executed {
    pub captured: bool,
    pub en_passant: bool,
}

impl Board {
    /// Resolve `mv` for `mv.color` and play it.
    ///
    /// On success returns the resolved move: the exact origin, and capture and
    /// en-passant flags as observed on the board. On any error the board is
    /// unchanged.
    pub fn apply(&mut self, mv: &Move) -> Result<Move, ChessErrors> {
        match &mv.kind {
            MoveKind::Castling(side) => {
                self.castle(*side, mv.color)?;
                Ok(*mv)
            }
            MoveKind::Normal(normal) => {
                let resolved = self.apply_normal(normal, mv.color, mv)?;
                Ok(Move::normal(resolved, mv.color))
            }
        }
    }

    /// Castle `color`'s king toward `side`.
    ///
    /// Requires the right to be held, king and rook on their home squares, the
    /// squares between them empty, the king not in check and neither square it
    /// crosses or lands on covered by the opponent.
    pub fn castle(
        &mut self,
        side: CastlingSide,
        color: Color,
    ) -> Result<CastlingSide, ChessErrors> {
        if let Some(reason) = self.castling_obstacle(side, color) {
            debug!(?side, %color, reason, "castling rejected");
            return Err(ChessErrors::NoLegalOrigin(
                Move::castling(side, color).to_string(),
            ));
        }

        let path = CastlingPath::new(side, color);
        self.relocate(path.king_from, path.king_to);
        self.relocate(path.rook_from, path.rook_to);
        for side in CastlingSide::ALL {
            self.set_can_castle(color, side, false);
        }
        self.clear_en_passant();
        Ok(side)
    }

    /// Why `color` may not castle toward `side` right now, if anything.
    pub(crate) fn castling_obstacle(
        &self,
        side: CastlingSide,
        color: Color,
    ) -> Option<&'static str> {
        if !self.can_castle(color, side) {
            return Some("castling right already lost");
        }

        let path = CastlingPath::new(side, color);
        let king_home = self
            .get(path.king_from)
            .is_some_and(|p| p.is(PieceKind::King, color));
        let rook_home = self
            .get(path.rook_from)
            .is_some_and(|p| p.is(PieceKind::Rook, color));
        if !king_home || !rook_home {
            return Some("king or rook is not on its home square");
        }

        if path.between.iter().any(|square| self.get(*square).is_some()) {
            return Some("a piece stands between king and rook");
        }

        if self.is_check(color) {
            return Some("king is in check");
        }

        let covered = self.all_covered_squares(color.opposite(), true);
        if path.king_transit.iter().any(|square| covered.contains(*square)) {
            return Some("king would cross an attacked square");
        }

        None
    }

    fn apply_normal(
        &mut self,
        normal: &NormalMove,
        color: Color,
        submitted: &Move,
    ) -> Result<NormalMove, ChessErrors> {
        let notation = || submitted.to_string();

        let origins = resolve_origins(self, color, normal);
        let from = match origins.as_slice() {
            [] => {
                debug!(mv = %submitted, %color, "no piece can make this move");
                return Err(ChessErrors::NoLegalOrigin(notation()));
            }
            [from] => *from,
            _ => {
                debug!(mv = %submitted, %color, ?origins, "ambiguous move");
                return Err(ChessErrors::AmbiguousOrigin {
                    notation: notation(),
                    candidates: origins,
                });
            }
        };

        let reaches_last_rank =
            normal.piece == PieceKind::Pawn && normal.to.rank() == color.promotion_rank();
        match (reaches_last_rank, normal.promotion) {
            (true, None) => {
                debug!(mv = %submitted, "pawn reaches the last rank without a promotion piece");
                return Err(ChessErrors::NoLegalOrigin(notation()));
            }
            (false, Some(_)) => {
                debug!(mv = %submitted, "promotion piece given for a move that does not promote");
                return Err(ChessErrors::NoLegalOrigin(notation()));
            }
            _ => {}
        }

        let undo = self.save();
        let executed = self.execute(from, normal.to, normal.piece, normal.promotion, color);
        if self.is_check(color) {
            self.restore(undo);
            debug!(mv = %submitted, %color, "move would leave the king in check");
            return Err(ChessErrors::NoLegalOrigin(notation()));
        }

        let mut resolved = *normal;
        resolved.from = SquareHint::exact(from);
        resolved.is_capture = executed.captured;
        resolved.is_en_passant = executed.en_passant;
        Ok(resolved)
    }

    /// Move the `kind` piece of `color` from `from` to `to` with every side
    /// effect: en-passant removal, castling-right updates, en-passant masks and
    /// promotion. Performs no legality checks.
    pub(crate) fn execute(
        &mut self,
        from: Square,
        to: Square,
        kind: PieceKind,
        promotion: Option<PieceKind>,
        color: Color,
    ) -> Executed {
        let opponent = color.opposite();
        let en_passant = kind == PieceKind::Pawn && self.is_en_passant_capture(color, from, to);
        let captured = en_passant || self.get(to).is_some();

        if en_passant {
            if let Some(behind) = to.offset(0, -color.forward()) {
                self.set(behind, None);
            }
        }

        if kind == PieceKind::King {
            for side in CastlingSide::ALL {
                self.set_can_castle(color, side, false);
            }
        }
        for side in CastlingSide::ALL {
            if kind == PieceKind::Rook && from == Board::rook_home(color, side) {
                self.set_can_castle(color, side, false);
            }
            let enemy_corner = Board::rook_home(opponent, side);
            let takes_rook = self.get(to).is_some_and(|p| p.is(PieceKind::Rook, opponent));
            if to == enemy_corner && takes_rook {
                self.set_can_castle(opponent, side, false);
            }
        }

        self.clear_en_passant();
        if kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.set_en_passant_file(color, from.file());
        }

        if let Some(promoted) = promotion {
            self.set(from, Some(Piece::new(promoted, color)));
        }
        self.relocate(from, to);

        Executed {
            captured,
            en_passant,
        }
    }
}

/// Squares involved in one castling move.
struct CastlingPath {
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
    /// Strictly between king and rook; must be empty.
    between: Vec<Square>,
    /// Squares the king crosses or lands on; must not be covered.
    king_transit: Vec<Square>,
}

impl CastlingPath {
    fn new(side: CastlingSide, color: Color) -> Self {
        let at = |file: File| Square::home(file, color);
        let squares = |files: &[File]| files.iter().map(|file| at(*file)).collect::<Vec<_>>();

        match side {
            CastlingSide::Short => Self {
                king_from: at(File::E),
                king_to: at(File::G),
                rook_from: at(File::H),
                rook_to: at(File::F),
                between: squares(&[File::F, File::G]),
                king_transit: squares(&[File::F, File::G]),
            },
            CastlingSide::Long => Self {
                king_from: at(File::E),
                king_to: at(File::C),
                rook_from: at(File::A),
                rook_to: at(File::D),
                between: squares(&[File::B, File::C, File::D]),
                king_transit: squares(&[File::D, File::C]),
            },
        }
    }
}
