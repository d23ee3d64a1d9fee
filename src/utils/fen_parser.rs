//! FEN-to-position parser.
//!
//! Accepts the six-field Forsyth-Edwards Notation and validates it strictly:
//! eight ranks of eight files, exactly one king per color, a duplicate-free
//! castling field and an en-passant target consistent with the side to move.
//! Each failure names the field it came from.

use crate::chess_errors::{ChessErrors, PositionField};
use crate::game_state::board::Board;
use crate::game_state::board_location::Square;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::moves::move_descriptions::CastlingSide;

/// Everything a FEN string describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenPosition {
    pub board: Board,
    pub turn: Color,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

pub fn parse_fen(fen: &str) -> Result<FenPosition, ChessErrors> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
        return Err(ChessErrors::position(
            PositionField::Layout,
            format!("expected 6 fields, found {}", fields.len()),
        ));
    };

    let mut board = parse_placement(placement)?;
    let turn = parse_side_to_move(side)?;
    parse_castling_rights(castling, &mut board)?;
    parse_en_passant(en_passant, turn, &mut board)?;

    let halfmove_clock = halfmove.parse::<u16>().map_err(|_| {
        ChessErrors::position(
            PositionField::HalfmoveClock,
            format!("{halfmove:?} is not a number"),
        )
    })?;
    let fullmove_number = fullmove
        .parse::<u16>()
        .ok()
        .filter(|number| *number >= 1)
        .ok_or_else(|| {
            ChessErrors::position(
                PositionField::FullmoveNumber,
                format!("{fullmove:?} is not a positive number"),
            )
        })?;

    Ok(FenPosition {
        board,
        turn,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_placement(placement: &str) -> Result<Board, ChessErrors> {
    let invalid = |reason: String| ChessErrors::position(PositionField::Placement, reason);

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::empty();
    for (rank, text) in (1..=8u8).rev().zip(ranks) {
        let mut file = 0i8;
        for ch in text.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += run as i8;
                if file > 8 {
                    return Err(invalid(format!("rank {rank} has more than 8 files")));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            let square = Square::from_coords(file, rank as i8)
                .ok_or_else(|| invalid(format!("rank {rank} has more than 8 files")))?;
            board.set(square, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank {rank} does not sum to 8 files")));
        }
    }

    for color in Color::ALL {
        let kings = board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(invalid(format!("{color} has {kings} kings, expected exactly 1")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side: &str) -> Result<Color, ChessErrors> {
    match side {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::position(
            PositionField::SideToMove,
            format!("expected 'w' or 'b', found {side:?}"),
        )),
    }
}

fn parse_castling_rights(castling: &str, board: &mut Board) -> Result<(), ChessErrors> {
    if castling == "-" {
        return Ok(());
    }
    if castling.is_empty() {
        return Err(ChessErrors::position(PositionField::Castling, "empty field"));
    }

    for ch in castling.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastlingSide::Short),
            'Q' => (Color::White, CastlingSide::Long),
            'k' => (Color::Black, CastlingSide::Short),
            'q' => (Color::Black, CastlingSide::Long),
            _ => {
                return Err(ChessErrors::position(
                    PositionField::Castling,
                    format!("invalid castling character '{ch}'"),
                ))
            }
        };
        if board.can_castle(color, side) {
            return Err(ChessErrors::position(
                PositionField::Castling,
                format!("duplicate '{ch}'"),
            ));
        }
        board.set_can_castle(color, side, true);
    }

    Ok(())
}

/// The target square lies behind the pawn that just advanced two squares, so
/// it is on rank 3 when Black is to move and rank 6 when White is.
fn parse_en_passant(text: &str, turn: Color, board: &mut Board) -> Result<(), ChessErrors> {
    if text == "-" {
        return Ok(());
    }

    let square: Square = text.parse().map_err(|_| {
        ChessErrors::position(PositionField::EnPassant, format!("{text:?} is not a square"))
    })?;
    let mover = turn.opposite();
    if square.rank() != turn.en_passant_target_rank() {
        return Err(ChessErrors::position(
            PositionField::EnPassant,
            format!("{square} is not a target square after a {mover} double step"),
        ));
    }

    board.set_en_passant_file(mover, square.file());
    Ok(())
}
