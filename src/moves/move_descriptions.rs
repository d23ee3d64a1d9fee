//! Move representation shared by the notation parser, the board and the game
//! history.
//!
//! A *minimal* move is what the parser produced: the origin may be partial or
//! absent. A *resolved* move is what the board returns after playing it, with
//! the exact origin filled in and the capture/en-passant flags set from the
//! position. Both render to text the parser accepts again.

use std::fmt;

use crate::game_state::board_location::{Square, SquareHint};
use crate::game_state::chess_types::{Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// King side, `O-O`.
    Short,
    /// Queen side, `O-O-O`.
    Long,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Short, CastlingSide::Long];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastlingSide::Short => 0,
            CastlingSide::Long => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalMove {
    pub piece: PieceKind,
    pub to: Square,
    pub from: SquareHint,
    pub is_capture: bool,
    /// Informational when parsed; set by the board on a resolved en-passant
    /// capture.
    pub is_en_passant: bool,
    pub promotion: Option<PieceKind>,
}

impl NormalMove {
    #[inline]
    pub fn new(piece: PieceKind, to: Square) -> Self {
        Self {
            piece,
            to,
            from: SquareHint::empty(),
            is_capture: false,
            is_en_passant: false,
            promotion: None,
        }
    }

    #[inline]
    pub fn from_hint(mut self, from: SquareHint) -> Self {
        self.from = from;
        self
    }

    #[inline]
    pub fn capturing(mut self) -> Self {
        self.is_capture = true;
        self
    }

    #[inline]
    pub fn promoting_to(mut self, piece: PieceKind) -> Self {
        self.promotion = Some(piece);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Castling(CastlingSide),
    Normal(NormalMove),
}

/// A move together with the color making it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub fn castling(side: CastlingSide, color: Color) -> Self {
        Self {
            color,
            kind: MoveKind::Castling(side),
        }
    }

    #[inline]
    pub fn normal(normal: NormalMove, color: Color) -> Self {
        Self {
            color,
            kind: MoveKind::Normal(normal),
        }
    }

    /// Same move stamped with another color; the parser always produces White.
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn as_normal(&self) -> Option<&NormalMove> {
        match &self.kind {
            MoveKind::Normal(normal) => Some(normal),
            MoveKind::Castling(_) => None,
        }
    }

    /// Pawn moves and captures reset the no-progress clock.
    #[inline]
    pub fn resets_no_progress_clock(&self) -> bool {
        self.as_normal()
            .is_some_and(|normal| normal.piece == PieceKind::Pawn || normal.is_capture)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MoveKind::Castling(CastlingSide::Short) => f.write_str("O-O"),
            MoveKind::Castling(CastlingSide::Long) => f.write_str("O-O-O"),
            MoveKind::Normal(normal) => {
                if normal.piece != PieceKind::Pawn {
                    write!(f, "{}", normal.piece.letter())?;
                }
                write!(f, "{}", normal.from)?;
                if normal.is_capture {
                    f.write_str("x")?;
                }
                write!(f, "{}", normal.to)?;
                if let Some(promotion) = normal.promotion {
                    write!(f, "={}", promotion.letter())?;
                }
                Ok(())
            }
        }
    }
}
