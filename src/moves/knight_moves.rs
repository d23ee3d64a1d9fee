//! Knight step geometry.

use crate::game_state::board_location::{Square, SquareSet};

/// `(d_file, d_rank)` jumps of a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_TARGETS: [u64; 64] = generate_knight_targets();

/// Squares a knight on `square` covers, clipped at the board edges.
#[inline]
pub const fn knight_targets(square: Square) -> SquareSet {
    SquareSet::from_bits(KNIGHT_TARGETS[square.index() as usize])
}

const fn generate_knight_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut targets = 0u64;
        let mut i = 0usize;

        while i < KNIGHT_OFFSETS.len() {
            let (d_file, d_rank) = KNIGHT_OFFSETS[i];
            targets |= set_if_valid(file + d_file as i32, rank + d_rank as i32);
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}

pub(crate) const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}
