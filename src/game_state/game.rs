//! Turn sequencing, move history and termination state on top of [`Board`].
//!
//! A `Game` changes only through a successfully played move. After every move
//! the status is re-evaluated: the side to move being checkmated ends the game
//! for the other side, any forced draw ends it drawn. Once terminal, further
//! moves are refused with [`ChessErrors::GameOver`].

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info};

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{RepetitionRule, RuleSet, STARTING_POSITION_FEN};
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::zobrist::position_key;
use crate::moves::move_descriptions::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, FenPosition};
use crate::utils::san::{parse_move, parse_moves};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Draw,
    WinWhite,
    WinBlack,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::WinWhite => Some(Color::White),
            GameStatus::WinBlack => Some(Color::Black),
            GameStatus::Playing | GameStatus::Draw => None,
        }
    }

    fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WinWhite,
            Color::Black => GameStatus::WinBlack,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Playing => "playing",
            GameStatus::Draw => "draw",
            GameStatus::WinWhite => "white wins",
            GameStatus::WinBlack => "black wins",
        };
        f.write_str(text)
    }
}

/// One ply of history: the move as the board resolved it and as submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub resolved: Move,
    pub minimal: Move,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    played_moves: Vec<PlayedMove>,
    starting_turn: Color,
    turn: Color,
    status: GameStatus,
    rules: RuleSet,
    starting_position: FenPosition,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Position key after every ply, starting position first.
    position_keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_standard_setup()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_standard_setup()
    }

    pub fn from_standard_setup() -> Self {
        Self::from_position(FenPosition {
            board: Board::standard(),
            turn: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
        })
    }

    /// Import a six-field FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        Ok(Self::from_position(parse_fen(fen)?))
    }

    fn from_position(position: FenPosition) -> Self {
        let mut game = Self {
            board: position.board,
            played_moves: Vec::new(),
            starting_turn: position.turn,
            turn: position.turn,
            status: GameStatus::Playing,
            rules: RuleSet::default(),
            starting_position: position,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
            position_keys: vec![position_key(&position.board, position.turn)],
        };
        game.status = game.evaluate_status();
        game
    }

    /// Replace the draw-rule configuration and re-evaluate the status.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self.status = self.evaluate_status();
        self
    }

    /// Play one move in short algebraic notation for the side to move.
    /// Returns `false`, leaving the game unchanged, if it cannot be played.
    pub fn play_move(&mut self, text: &str) -> bool {
        self.try_play_move(text).is_ok()
    }

    pub fn try_play_move(&mut self, text: &str) -> Result<PlayedMove, ChessErrors> {
        let mv = parse_move(text)?;
        self.play(mv)
    }

    /// Play an already parsed move, re-stamped with the side to move.
    pub fn play(&mut self, mv: Move) -> Result<PlayedMove, ChessErrors> {
        if self.status.is_terminal() {
            debug!(mv = %mv, status = %self.status, "move submitted after the game ended");
            return Err(ChessErrors::GameOver(self.status));
        }

        let minimal = mv.with_color(self.turn);
        let resolved = self.board.apply(&minimal)?;
        let played = PlayedMove { resolved, minimal };
        self.record(played);
        Ok(played)
    }

    /// Play every move of `text` in order. Stops at the first move that cannot
    /// be parsed or played, keeping the moves before it, and returns `false`.
    pub fn play_move_sequence(&mut self, text: &str) -> bool {
        self.try_play_move_sequence(text).is_ok()
    }

    /// As [`Game::play_move_sequence`], returning the number of moves played
    /// or the error that stopped the sequence.
    pub fn try_play_move_sequence(&mut self, text: &str) -> Result<usize, ChessErrors> {
        let mut played = 0usize;
        for mv in parse_moves(text) {
            self.play(mv?)?;
            played += 1;
        }
        Ok(played)
    }

    fn record(&mut self, played: PlayedMove) {
        if played.resolved.resets_no_progress_clock() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.turn == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.played_moves.push(played);
        self.turn = self.turn.opposite();
        self.position_keys.push(position_key(&self.board, self.turn));

        self.status = self.evaluate_status();
        if self.status.is_terminal() {
            info!(
                status = %self.status,
                plies = self.played_moves.len(),
                last_move = %played.resolved,
                "game over"
            );
        }
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.board.is_checkmate(self.turn) {
            GameStatus::win_for(self.turn.opposite())
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Playing
        }
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn terminal_state(&self) -> GameStatus {
        self.status
    }

    /// `(resolved, minimal)` move text for every ply, in order.
    pub fn history(&self) -> Vec<(String, String)> {
        self.played_moves
            .iter()
            .map(|played| (played.resolved.to_string(), played.minimal.to_string()))
            .collect()
    }

    #[inline]
    pub fn played_moves(&self) -> &[PlayedMove] {
        &self.played_moves
    }

    #[inline]
    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.played_moves.last()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn starting_turn(&self) -> Color {
        self.starting_turn
    }

    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Key of the current position, as counted by [`RepetitionRule::PositionKey`].
    #[inline]
    pub fn position_key(&self) -> u64 {
        position_key(&self.board, self.turn)
    }

    /// FEN of the position the game started from.
    pub fn starting_fen(&self) -> String {
        generate_fen(&self.starting_position)
    }

    /// The game did not start from the standard initial position.
    pub fn has_custom_start(&self) -> bool {
        self.starting_fen() != STARTING_POSITION_FEN
    }

    pub fn to_fen(&self) -> String {
        generate_fen(&FenPosition {
            board: self.board,
            turn: self.turn,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        })
    }

    /// Any unconditional draw: stalemate of either side, repetition,
    /// the no-progress limit or insufficient material.
    pub fn is_draw(&self) -> bool {
        self.board.is_stalemate(self.turn)
            || self.board.is_stalemate(self.turn.opposite())
            || self.is_repetition_draw()
            || self.is_no_progress_draw()
            || self.is_insufficient_material()
    }

    pub fn is_repetition_draw(&self) -> bool {
        match self.rules.repetition {
            RepetitionRule::MoveTextWindow => {
                let window = self.rules.repetition_window;
                if window == 0 || self.played_moves.len() < window {
                    return false;
                }
                let recent = &self.played_moves[self.played_moves.len() - window..];
                let distinct: HashSet<String> = recent
                    .iter()
                    .map(|played| played.resolved.to_string())
                    .collect();
                distinct.len() == self.rules.repetition_distinct_moves
            }
            RepetitionRule::PositionKey => {
                let current = self.position_key();
                let occurrences = self
                    .position_keys
                    .iter()
                    .filter(|key| **key == current)
                    .count();
                occurrences >= self.rules.repetition_limit
            }
        }
    }

    /// Seventy-five-move rule: no pawn move or capture for the configured
    /// number of plies.
    pub fn is_no_progress_draw(&self) -> bool {
        self.halfmove_clock >= self.rules.no_progress_plies
    }

    /// K v K, K+minor v K, or K+B v K+B with bishops on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut kings = [0usize; 2];
        let mut minors: Vec<(Color, PieceKind, bool)> = Vec::new();

        for (square, Piece { kind, color }) in self.board.pieces() {
            match kind {
                PieceKind::King => kings[color.index()] += 1,
                PieceKind::Bishop | PieceKind::Knight => {
                    minors.push((color, kind, square.is_light()))
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        if kings != [1, 1] {
            return false;
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(first, PieceKind::Bishop, first_light), (second, PieceKind::Bishop, second_light)] => {
                first != second && first_light == second_light
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{Game, GameStatus};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::board::Board;
    use crate::game_state::board_location::{Square, SquareHint};
    use crate::game_state::chess_rules::{RepetitionRule, RuleSet, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::{CastlingSide, Move, NormalMove};

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    /// Every move the side to move could legally play, as resolved text.
    fn legal_move_texts(game: &Game) -> Vec<String> {
        let board = game.board();
        let color = game.turn();
        let mut texts = Vec::new();

        for (from, piece) in board.pieces_of(color) {
            for to in board.raw_destinations(from).iter() {
                let mut normal = NormalMove::new(piece.kind, to).from_hint(SquareHint::exact(from));
                normal.is_capture =
                    board.get(to).is_some() || board.is_en_passant_capture(color, from, to);
                let promotes = piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank();
                if promotes {
                    normal.promotion = Some(PieceKind::Queen);
                }
                let mv = Move::normal(normal, color);
                let mut trial = *board;
                if trial.apply(&mv).is_ok() {
                    texts.push(mv.to_string());
                }
            }
        }
        for side in CastlingSide::ALL {
            let mut trial = *board;
            if trial.castle(side, color).is_ok() {
                texts.push(Move::castling(side, color).to_string());
            }
        }
        texts
    }

    /// Plays up to `plies` random legal moves.
    fn random_game(seed: u64, plies: usize) -> Game {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        for _ in 0..plies {
            if game.status().is_terminal() {
                break;
            }
            let moves = legal_move_texts(&game);
            if moves.is_empty() {
                break;
            }
            let pick = &moves[rng.random_range(0..moves.len())];
            assert!(game.play_move(pick), "{pick} should be playable");
        }
        game
    }

    #[test]
    fn e4_from_the_standard_setup() {
        let mut game = Game::from_standard_setup();
        assert!(game.play_move("e4"));
        let last = game.last_move().expect("one move should be recorded");
        let resolved = last.resolved.as_normal().expect("e4 is a normal move");
        assert_eq!(resolved.from.as_square(), Some(sq("e2")));
        assert_eq!(resolved.to, sq("e4"));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(
            game.history(),
            vec![("e2e4".to_owned(), "e4".to_owned())]
        );
    }

    #[test]
    fn fools_mate_is_a_black_win() {
        let mut game = Game::new();
        assert!(game.play_move_sequence("f3 e5 g4 Qh4#"));
        assert_eq!(game.terminal_state(), GameStatus::WinBlack);
        assert!(matches!(
            game.try_play_move("a3"),
            Err(ChessErrors::GameOver(GameStatus::WinBlack))
        ));
        assert_eq!(game.played_moves().len(), 4);
    }

    #[test]
    fn bare_kings_are_a_draw_for_either_side_to_move() {
        for fen in ["4k3/8/8/8/8/8/8/4K3 w - - 0 1", "4k3/8/8/8/8/8/8/4K3 b - - 0 1"] {
            let game = Game::from_fen(fen).expect("FEN should parse");
            assert!(game.is_draw());
            assert!(game.is_insufficient_material());
            assert_eq!(game.status(), GameStatus::Draw);
        }
    }

    #[test]
    fn insufficient_material_families() {
        let cases = [
            ("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", true),
            ("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1", false),
            ("2b1k3/8/8/8/8/8/8/3BK3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1", false),
            ("1n2k3/8/8/8/8/8/8/1N2K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let game = Game::from_fen(fen).expect("FEN should parse");
            assert_eq!(game.is_insufficient_material(), expected, "{fen}");
        }
    }

    #[test]
    fn en_passant_window_lasts_one_ply() {
        let mut game = Game::new();
        assert!(game.play_move_sequence("e4 a6 e5 d5"));
        let mut late = game.clone();

        assert!(game.play_move("exd6"));
        let resolved = game.last_move().expect("capture should be recorded").resolved;
        assert_eq!(resolved.to_string(), "e5xd6");
        assert_eq!(game.board().get(sq("d5")), None);

        assert!(late.play_move_sequence("Nf3 a5"));
        let before = *late.board();
        assert!(matches!(
            late.try_play_move("exd6"),
            Err(ChessErrors::NoLegalOrigin(_))
        ));
        assert_eq!(*late.board(), before);
    }

    #[test]
    fn ambiguous_knight_move_leaves_the_game_unchanged() {
        let mut game = Game::from_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1")
            .expect("FEN should parse");
        let before = game.board().snapshot();
        assert!(matches!(
            game.try_play_move("Nd2"),
            Err(ChessErrors::AmbiguousOrigin { .. })
        ));
        assert!(!game.play_move("Nd2"));
        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.turn(), Color::White);
        assert!(game.played_moves().is_empty());
    }

    #[test]
    fn sequence_stops_at_the_first_bad_move() {
        let mut game = Game::new();
        assert!(!game.play_move_sequence("e4 e5 Ke3 Nc6"));
        assert_eq!(game.played_moves().len(), 2);
        assert_eq!(game.turn(), Color::White);

        let mut game = Game::new();
        assert!(matches!(
            game.try_play_move_sequence("d4 d5 ?!x"),
            Err(ChessErrors::MoveText(_))
        ));
        assert_eq!(game.played_moves().len(), 2);
    }

    #[test]
    fn knight_shuffle_triggers_the_move_text_repetition_draw() {
        let mut game = Game::new();
        let cycle = "Nf3 Nf6 Ng1 Ng8 ";
        assert!(game.play_move_sequence(&cycle.repeat(2)));
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.play_move_sequence(cycle));
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.is_repetition_draw());
    }

    #[test]
    fn position_key_repetition_counts_exact_positions() {
        let rules = RuleSet::default()
            .with_repetition(RepetitionRule::PositionKey)
            .with_repetition_limit(3);
        let mut game = Game::new().with_rules(rules);
        let cycle = "Nf3 Nf6 Ng1 Ng8 ";
        assert!(game.play_move_sequence(cycle));
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.play_move_sequence(cycle));
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn no_progress_limit_is_configurable() {
        let rules = RuleSet::default().with_no_progress_plies(4);
        let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1")
            .expect("FEN should parse")
            .with_rules(rules);
        assert!(game.play_move_sequence("Ra2 Kd8 Ra1 Ke8"));
        assert!(game.is_no_progress_draw());
        assert_eq!(game.status(), GameStatus::Draw);

        let mut reset = Game::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1")
            .expect("FEN should parse")
            .with_rules(rules);
        assert!(reset.play_move_sequence("Ra2 Kd8 e4 Ke8"));
        assert_eq!(reset.halfmove_clock(), 1);
        assert_eq!(reset.status(), GameStatus::Playing);
    }

    #[test]
    fn fen_round_trip_tracks_clocks() {
        let mut game = Game::new();
        assert!(game.play_move_sequence("e4 c5 Nf3"));
        let fen = game.to_fen();
        assert_eq!(
            fen,
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        let reloaded = Game::from_fen(&fen).expect("exported FEN should parse");
        assert_eq!(reloaded.board(), game.board());
        assert_eq!(reloaded.turn(), Color::Black);
        assert_eq!(reloaded.to_fen(), fen);

        let mut opened = Game::new();
        assert!(opened.play_move("d4"));
        assert_eq!(
            opened.to_fen(),
            "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1"
        );
        assert!(!Game::new().has_custom_start());
        assert_eq!(Game::new().starting_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn castling_rights_never_come_back() {
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new();
            let mut rights = [[true; 2]; 2];

            for _ in 0..120 {
                if game.status().is_terminal() {
                    break;
                }
                let moves = legal_move_texts(&game);
                if moves.is_empty() {
                    break;
                }
                let pick = &moves[rng.random_range(0..moves.len())];
                assert!(game.play_move(pick), "{pick} should be playable");

                for color in Color::ALL {
                    for side in CastlingSide::ALL {
                        let now = game.board().can_castle(color, side);
                        let before = &mut rights[color.index()][side.index()];
                        assert!(*before || !now, "castling right came back after {pick}");
                        *before = now;
                    }
                }
            }
        }
    }

    #[test]
    fn checkmate_and_stalemate_are_consistent_along_random_games() {
        for seed in 0..8u64 {
            let game = random_game(seed, 200);
            let board: &Board = game.board();
            for color in Color::ALL {
                let mate = board.is_checkmate(color);
                let stalemate = board.is_stalemate(color);
                assert!(!(mate && stalemate));
                if mate {
                    assert!(board.is_check(color));
                    assert!(!board.has_valid_moves(color));
                }
            }
            if board.is_checkmate(game.turn()) {
                assert_eq!(game.status().winner(), Some(game.turn().opposite()));
            }
        }
    }

    #[test]
    fn replaying_history_reproduces_the_game() {
        for seed in 100..106u64 {
            let game = random_game(seed, 160);
            let history = game.history();

            let resolved_text: Vec<&str> = history.iter().map(|(r, _)| r.as_str()).collect();
            let mut replay = Game::new();
            assert!(replay.play_move_sequence(&resolved_text.join(" ")));

            let minimal_text: Vec<&str> = history.iter().map(|(_, m)| m.as_str()).collect();
            let mut minimal_replay = Game::new();
            assert!(minimal_replay.play_move_sequence(&minimal_text.join(" ")));

            for other in [&replay, &minimal_replay] {
                assert_eq!(other.board(), game.board());
                assert_eq!(other.turn(), game.turn());
                assert_eq!(other.status(), game.status());
                assert_eq!(other.history(), game.history());
            }
        }
    }
}
