//! Crate root module declarations for the `san_chess` rules engine.
//!
//! Exposes the position model (board, game, rules configuration), the
//! per-piece move geometry, the origin resolution and move application
//! pipeline, and the text formats (short algebraic notation, FEN, PGN) so the
//! binary, tests and external collaborators can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod board_location;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod sliding;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
}

pub mod utils {
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}
