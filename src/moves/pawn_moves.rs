//! Pawn capture geometry.
//!
//! Pushes depend on occupancy and are resolved by the board; only the
//! diagonal capture squares are tabulated here.

use crate::game_state::board_location::{Square, SquareSet};
use crate::game_state::chess_types::Color;

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_white_pawn_attacks();
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_black_pawn_attacks();

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    let bits = match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index() as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square.index() as usize],
    };
    SquareSet::from_bits(bits)
}

const fn generate_white_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank < 7 {
            if file > 0 {
                attacks |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks |= 1u64 << (sq + 9);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_black_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank > 0 {
            if file > 0 {
                attacks |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks |= 1u64 << (sq - 7);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::pawn_attacks;
    use crate::game_state::board_location::Square;
    use crate::game_state::chess_types::Color;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        let white = pawn_attacks(Color::White, sq("e4"));
        assert!(white.contains(sq("d5")) && white.contains(sq("f5")));
        let black = pawn_attacks(Color::Black, sq("e4"));
        assert!(black.contains(sq("d3")) && black.contains(sq("f3")));
    }

    #[test]
    fn edge_pawns_attack_one_square() {
        assert_eq!(pawn_attacks(Color::White, sq("a2")).len(), 1);
        assert_eq!(pawn_attacks(Color::Black, sq("h7")).len(), 1);
        assert!(pawn_attacks(Color::White, sq("c8")).is_empty());
    }
}
