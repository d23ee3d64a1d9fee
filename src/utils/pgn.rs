//! Minimal PGN import/export helpers.
//!
//! Export writes the seven-tag roster, `SetUp`/`FEN` for games that did not
//! start from the standard position, and numbered movetext built from the
//! moves as they were submitted. Import reads the tags, strips comments and
//! variations, and replays the movetext through [`Game`].

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Color;
use crate::game_state::game::{Game, GameStatus};

/// Tags written before the movetext. `Result` comes from the game itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_owned(),
            site: "?".to_owned(),
            date: Local::now().date_naive(),
            round: "-".to_owned(),
            white: "White".to_owned(),
            black: "Black".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: Game,
    pub result: String,
}

/// PGN result token for a game status.
pub fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "*",
        GameStatus::Draw => "1/2-1/2",
        GameStatus::WinWhite => "1-0",
        GameStatus::WinBlack => "0-1",
    }
}

pub fn write_pgn(game: &Game, headers: &PgnHeaders) -> String {
    let result = result_token(game.status());
    let mut out = String::new();

    let mut tag = |key: &str, value: &str| {
        out.push_str(&format!("[{key} \"{}\"]\n", escape_pgn_value(value)));
    };
    tag("Event", &headers.event);
    tag("Site", &headers.site);
    tag("Date", &headers.date.format("%Y.%m.%d").to_string());
    tag("Round", &headers.round);
    tag("White", &headers.white);
    tag("Black", &headers.black);
    tag("Result", result);
    if game.has_custom_start() {
        tag("SetUp", "1");
        tag("FEN", &game.starting_fen());
    }

    out.push('\n');
    out.push_str(&movetext(game));
    if !game.played_moves().is_empty() {
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');
    out
}

fn movetext(game: &Game) -> String {
    let mut tokens = Vec::<String>::new();
    let mut number = game
        .starting_fen()
        .rsplit(' ')
        .next()
        .and_then(|field| field.parse::<u16>().ok())
        .unwrap_or(1);
    let mut color = game.starting_turn();

    for (ply, played) in game.played_moves().iter().enumerate() {
        match color {
            Color::White => tokens.push(format!("{number}.")),
            Color::Black if ply == 0 => tokens.push(format!("{number}...")),
            Color::Black => {}
        }
        tokens.push(played.minimal.to_string());
        if color == Color::Black {
            number = number.saturating_add(1);
        }
        color = color.opposite();
    }

    tokens.join(" ")
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, ChessErrors> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = match (headers.get("SetUp"), headers.get("FEN")) {
        (_, Some(fen)) => Game::from_fen(fen)?,
        (Some(setup), None) if setup == "1" => {
            return Err(ChessErrors::InvalidPgn(
                "SetUp is 1 but no FEN tag is present".to_owned(),
            ))
        }
        _ => Game::new(),
    };

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    game.try_play_move_sequence(&movetext).map_err(|err| {
        ChessErrors::InvalidPgn(format!(
            "movetext stops after {} plies: {err}",
            game.played_moves().len()
        ))
    })?;

    let result = headers
        .get("Result")
        .map(String::as_str)
        .or_else(|| movetext.split_whitespace().last())
        .filter(|token| is_result_token(token))
        .unwrap_or("*")
        .to_owned();

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), ChessErrors> {
    let invalid = || ChessErrors::InvalidPgn(format!("invalid header line: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{read_pgn, write_pgn, PgnHeaders};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::game::{Game, GameStatus};

    fn headers() -> PgnHeaders {
        PgnHeaders {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).expect("test date should be valid"),
            white: "Alice \"the Rook\"".to_owned(),
            ..PgnHeaders::default()
        }
    }

    #[test]
    fn write_standard_game() {
        let mut game = Game::new();
        assert!(game.play_move_sequence("f3 e5 g4 Qh4#"));

        let pgn = write_pgn(&game, &headers());
        assert!(pgn.contains("[Date \"2024.03.09\"]\n"));
        assert!(pgn.contains("[White \"Alice \\\"the Rook\\\"\"]\n"));
        assert!(pgn.contains("[Result \"0-1\"]\n"));
        assert!(!pgn.contains("SetUp"));
        assert!(pgn.ends_with("\n1. f3 e5 2. g4 Qh4 0-1\n"));
    }

    #[test]
    fn custom_start_with_black_to_move() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").expect("FEN should parse");
        assert!(game.play_move_sequence("Kd7 e4 Kc6"));

        let pgn = write_pgn(&game, &headers());
        assert!(pgn.contains("[SetUp \"1\"]\n"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 7\"]\n"));
        assert!(pgn.contains("\n7... Kd7 8. e4 Kc6 *\n"));

        let parsed = read_pgn(&pgn).expect("written PGN should read back");
        assert_eq!(parsed.game.board(), game.board());
        assert_eq!(parsed.game.history(), game.history());
        assert_eq!(parsed.result, "*");
        assert_eq!(
            parsed.headers.get("White").map(String::as_str),
            Some("Alice \"the Rook\"")
        );
    }

    #[test]
    fn read_skips_comments_and_variations() {
        let pgn = "[Event \"Test\"]\n[Result \"0-1\"]\n\n1. f3 {weak} e5 (1... d5 2. g4) 2. g4?? Qh4# 0-1\n";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.game.status(), GameStatus::WinBlack);
        assert_eq!(parsed.result, "0-1");
        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("Test"));
    }

    #[test]
    fn illegal_movetext_is_reported() {
        let err = read_pgn("1. e4 e5 2. Ke3 *").expect_err("Ke3 is illegal");
        assert!(matches!(err, ChessErrors::InvalidPgn(_)));
        assert!(matches!(
            read_pgn("[Event Test]\n1. e4 *"),
            Err(ChessErrors::InvalidPgn(_))
        ));
    }
}
