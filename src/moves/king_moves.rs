//! King step geometry.

use crate::game_state::board_location::{Square, SquareSet};
use crate::moves::knight_moves::set_if_valid;

/// `(d_file, d_rank)` steps of a king.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_TARGETS: [u64; 64] = generate_king_targets();

#[inline]
pub const fn king_targets(square: Square) -> SquareSet {
    SquareSet::from_bits(KING_TARGETS[square.index() as usize])
}

const fn generate_king_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut targets = 0u64;
        let mut i = 0usize;

        while i < KING_OFFSETS.len() {
            let (d_file, d_rank) = KING_OFFSETS[i];
            targets |= set_if_valid(file + d_file as i32, rank + d_rank as i32);
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}
