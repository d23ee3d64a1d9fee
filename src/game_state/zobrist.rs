//! Zobrist position keys for exact repetition counting.
//!
//! A key covers piece placement, side to move, castling rights and the
//! en-passant masks. Tables come from a fixed seed, so keys are stable across
//! runs.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::CastlingSide;

#[derive(Debug)]
struct KeyTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castling: [[u64; 2]; 2],
    en_passant_file: [[u64; 8]; 2],
}

static TABLES: OnceLock<KeyTables> = OnceLock::new();

#[inline]
fn tables() -> &'static KeyTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> KeyTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = || splitmix64(&mut seed);

    let piece_square =
        std::array::from_fn(|_| std::array::from_fn(|_| std::array::from_fn(|_| next())));
    let black_to_move = next();
    let castling = std::array::from_fn(|_| std::array::from_fn(|_| next()));
    let en_passant_file = std::array::from_fn(|_| std::array::from_fn(|_| next()));

    KeyTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key of `board` with `turn` to move.
pub fn position_key(board: &Board, turn: Color) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for (square, piece) in board.pieces() {
        key ^= tables.piece_square[piece.color.index()][piece.kind.index()]
            [square.index() as usize];
    }

    if turn == Color::Black {
        key ^= tables.black_to_move;
    }

    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if board.can_castle(color, side) {
                key ^= tables.castling[color.index()][side.index()];
            }
        }

        let mask = board.en_passant_mask(color);
        for file in 0..8 {
            if mask & (1 << file) != 0 {
                key ^= tables.en_passant_file[color.index()][file];
            }
        }
    }

    key
}
