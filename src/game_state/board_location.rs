//! Board coordinates.
//!
//! `Square` is always a real square (`0 == a1`, `7 == h1`, `63 == h8`);
//! constructing one from out-of-range file/rank values yields `None`, which the
//! ray and offset scans treat as the end of the walk. `SquareHint` is the
//! partially known origin written in move text ("R**a**d1", "N**5**c4").

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(index: i8) -> Option<File> {
        usize::try_from(index)
            .ok()
            .and_then(|i| File::ALL.get(i).copied())
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<File> {
        if ('a'..='h').contains(&ch) {
            File::from_index((ch as u8 - b'a') as i8)
        } else {
            None
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        char::from(b'a' + self.index())
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[inline]
fn rank_from_char(ch: char) -> Option<u8> {
    if ('1'..='8').contains(&ch) {
        Some(ch as u8 - b'0')
    } else {
        None
    }
}

/// One of the 64 board squares. Linear index is `(rank - 1) * 8 + file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// `rank` is 1-based, as written in move text.
    #[inline]
    pub fn new(file: File, rank: u8) -> Option<Square> {
        if (1..=8).contains(&rank) {
            Some(Square((rank - 1) * 8 + file.index()))
        } else {
            None
        }
    }

    /// `file` on `color`'s back rank; always on the board.
    #[inline]
    pub const fn home(file: File, color: Color) -> Square {
        Square((color.home_rank() - 1) * 8 + file.index())
    }

    /// Bounds-checked constructor from signed coordinates (0-based file,
    /// 1-based rank), used by the scans that step off the board.
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        let file = File::from_index(file)?;
        let rank = u8::try_from(rank).ok()?;
        Square::new(file, rank)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8 + 1
    }

    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        Square::from_coords(
            self.file().index() as i8 + d_file,
            self.rank() as i8 + d_rank,
        )
    }

    /// Square color parity: a1 is dark, h1 is light.
    #[inline]
    pub fn is_light(self) -> bool {
        (self.file().index() + self.rank()).is_multiple_of(2)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let square = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => File::from_char(f)
                .zip(rank_from_char(r))
                .and_then(|(file, rank)| Square::new(file, rank)),
            _ => None,
        };
        square.ok_or_else(|| ChessErrors::InvalidCoordinate(s.to_owned()))
    }
}

/// Origin as written in move text: exact, file-only, rank-only or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareHint {
    pub file: Option<File>,
    pub rank: Option<u8>,
}

impl SquareHint {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            file: None,
            rank: None,
        }
    }

    #[inline]
    pub fn exact(square: Square) -> Self {
        Self {
            file: Some(square.file()),
            rank: Some(square.rank()),
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.file.is_none() && self.rank.is_none()
    }

    /// Exactly one of file/rank is known.
    #[inline]
    pub const fn is_partial(&self) -> bool {
        self.file.is_some() != self.rank.is_some()
    }

    #[inline]
    pub fn as_square(&self) -> Option<Square> {
        Square::new(self.file?, self.rank?)
    }

    /// Whether `square` agrees with every known component of the hint.
    #[inline]
    pub fn matches(&self, square: Square) -> bool {
        self.file.is_none_or(|f| f == square.file())
            && self.rank.is_none_or(|r| r == square.rank())
    }
}

impl fmt::Display for SquareHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{file}")?;
        }
        if let Some(rank) = self.rank {
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}

/// Set of squares packed into a bitboard (`1 << index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Square::from_index(index)
        })
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}
