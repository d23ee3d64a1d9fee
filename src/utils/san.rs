//! Short algebraic notation parser.
//!
//! Purely syntactic: turns move text such as `Nf3`, `Rad1`, `exd6 e.p.`,
//! `e8=Q+` or `O-O-O` into a [`Move`] without looking at any board. Which piece
//! actually moves is decided later by the board's origin resolution.
//!
//! Grammar of a single token, after trailing `+`/`#`/`!`/`?` marks are
//! dropped:
//!
//! ```text
//! [NBRQK]? [a-h]? [1-8]? x? [a-h][1-8] (e.p.)? (=?[NBRQ])?
//! ```
//!
//! Castling tokens are matched before the general grammar, the long form
//! first so that `O-O-O` is never read as `O-O`.

use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::chess_errors::ChessErrors;
use crate::game_state::board_location::{File, Square, SquareHint};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::move_descriptions::{CastlingSide, Move, MoveKind, NormalMove};

const EN_PASSANT_SUFFIX: &str = "e.p.";

/// Parse one move token. The returned move is stamped White; the game
/// re-stamps it with the side to move.
pub fn parse_move(text: &str) -> Result<Move, ChessErrors> {
    let invalid = || ChessErrors::MoveText(text.to_owned());

    let mut body = strip_annotations(text.trim());
    if body.is_empty() {
        return Err(invalid());
    }

    if let Some(side) = parse_castling(body) {
        return Ok(Move::castling(side, Color::White));
    }

    let mut is_en_passant = false;
    if let Some(rest) = body.strip_suffix(EN_PASSANT_SUFFIX) {
        is_en_passant = true;
        body = strip_annotations(rest.trim_end());
    }

    let (body, promotion) = split_promotion(body);
    let body = strip_annotations(body);
    if !body.is_ascii() || body.len() < 2 {
        return Err(invalid());
    }

    let (head, destination) = body.split_at(body.len() - 2);
    let to: Square = destination.parse().map_err(|_| invalid())?;

    let (head, is_capture) = match head.strip_suffix('x') {
        Some(rest) => (rest, true),
        None => (head, false),
    };

    let mut chars = head.chars().peekable();
    let piece = match chars.peek().copied() {
        Some(ch) if ch.is_ascii_uppercase() => {
            chars.next();
            PieceKind::from_letter(ch).ok_or_else(invalid)?
        }
        _ => PieceKind::Pawn,
    };

    let mut from = SquareHint::empty();
    if let Some(file) = chars.peek().copied().and_then(File::from_char) {
        from.file = Some(file);
        chars.next();
    }
    if let Some(rank) = chars.peek().and_then(|ch| ch.to_digit(10)) {
        if !(1..=8).contains(&rank) {
            return Err(invalid());
        }
        from.rank = Some(rank as u8);
        chars.next();
    }
    if chars.next().is_some() {
        return Err(invalid());
    }

    let mut normal = NormalMove::new(piece, to).from_hint(from);
    normal.is_capture = is_capture;
    normal.is_en_passant = is_en_passant;
    normal.promotion = promotion;

    Ok(Move::normal(normal, Color::White))
}

/// Lazily parse every move token of free text such as `1. e4 e5 2. Nf3`.
///
/// Move numbers are skipped, a detached `e.p.` marks the preceding move and a
/// result token (`1-0`, `0-1`, `1/2-1/2`, `*`) ends the sequence. The first
/// unparseable token is yielded as an error and ends the iteration.
pub fn parse_moves(text: &str) -> MoveTokens<'_> {
    MoveTokens {
        tokens: text.split_whitespace().peekable(),
        done: false,
    }
}

/// Every move parsed before the first unparseable token.
pub fn parse_move_list(text: &str) -> Vec<Move> {
    parse_moves(text).map_while(Result::ok).collect()
}

pub struct MoveTokens<'a> {
    tokens: Peekable<SplitWhitespace<'a>>,
    done: bool,
}

impl Iterator for MoveTokens<'_> {
    type Item = Result<Move, ChessErrors>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(token) = self.tokens.next() else {
                self.done = true;
                return None;
            };
            if is_result_token(token) {
                self.done = true;
                return None;
            }

            let token = strip_move_number(token);
            if token.is_empty() {
                continue;
            }

            let mut parsed = parse_move(token);
            match &mut parsed {
                Ok(mv) => {
                    if self.tokens.peek() == Some(&EN_PASSANT_SUFFIX) {
                        self.tokens.next();
                        if let MoveKind::Normal(normal) = &mut mv.kind {
                            normal.is_en_passant = true;
                        }
                    }
                }
                Err(_) => self.done = true,
            }
            return Some(parsed);
        }
    }
}

fn parse_castling(body: &str) -> Option<CastlingSide> {
    match body {
        "O-O-O" | "0-0-0" => Some(CastlingSide::Long),
        "O-O" | "0-0" => Some(CastlingSide::Short),
        _ => None,
    }
}

fn strip_annotations(text: &str) -> &str {
    text.trim_end_matches(['+', '#', '!', '?'])
}

/// Splits `e8=Q` / `e8Q` into the body and the promotion piece.
fn split_promotion(body: &str) -> (&str, Option<PieceKind>) {
    let Some(last) = body.chars().last() else {
        return (body, None);
    };
    let Some(piece) = PieceKind::from_letter(last).filter(|p| p.is_promotion_target()) else {
        return (body, None);
    };
    let rest = &body[..body.len() - 1];
    let rest = rest.strip_suffix('=').unwrap_or(rest);
    (rest, Some(piece))
}

/// `12.` -> ``, `12...e5` -> `e5`, anything else unchanged.
fn strip_move_number(token: &str) -> &str {
    let digits_end = token
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(token.len());
    if digits_end == token.len() && digits_end > 0 {
        return "";
    }
    if digits_end > 0 && token[digits_end..].starts_with('.') {
        token[digits_end..].trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}
