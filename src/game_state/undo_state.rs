use crate::game_state::chess_types::Piece;

/// Independent copy of everything a tentative move can change.
///
/// Taken before a trial mutation and written back wholesale if the trial
/// leaves the mover in check. All fields are plain arrays, so the copy never
/// aliases the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub squares: [Option<Piece>; 64],
    pub can_castle: [[bool; 2]; 2],
    pub en_passant: [u8; 2],
}
