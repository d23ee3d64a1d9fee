use crate::game_state::board::Board;
use crate::game_state::board_location::{File, Square};
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::CastlingSide;
use crate::utils::fen_parser::FenPosition;

pub fn generate_fen(position: &FenPosition) -> String {
    let side_to_move = match position.turn {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_placement_field(&position.board),
        side_to_move,
        generate_castling_field(&position.board),
        generate_en_passant_field(&position.board, position.turn),
        position.halfmove_clock,
        position.fullmove_number
    )
}

fn generate_placement_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (1..=8u8).rev() {
        let mut empty_count = 0u8;

        for file in File::ALL {
            match Square::new(file, rank).and_then(|square| board.get(square)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 1 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for (color, side, ch) in [
        (Color::White, CastlingSide::Short, 'K'),
        (Color::White, CastlingSide::Long, 'Q'),
        (Color::Black, CastlingSide::Short, 'k'),
        (Color::Black, CastlingSide::Long, 'q'),
    ] {
        if board.can_castle(color, side) {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

/// Target square behind the opponent's pawn that just advanced two squares.
fn generate_en_passant_field(board: &Board, turn: Color) -> String {
    let mask = board.en_passant_mask(turn.opposite());
    File::ALL
        .into_iter()
        .find(|file| mask & (1 << file.index()) != 0)
        .and_then(|file| Square::new(file, turn.en_passant_target_rank()))
        .map_or_else(|| "-".to_owned(), |square| square.to_string())
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(generate_fen(&parsed), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        for fen in [
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 12",
            "8/8/8/8/Pp6/1K6/3N4/k7 b - a3 0 40",
        ] {
            let parsed = parse_fen(fen).expect("custom FEN should parse");
            let generated = generate_fen(&parsed);
            assert_eq!(generated, fen);
            assert_eq!(parse_fen(&generated).expect("generated FEN should parse"), parsed);
        }
    }
}
