use crate::board::{Board, Color, EMPTY_SQ, Piece};
use crate::moves::attack::in_check;
use crate::moves::execute::generate_legal;
use crate::moves::types::Move;
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// Game state as reported to the host. Priority when several predicates
/// hold at once: checkmate, then check, then draw, then stalemate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Ok,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

// Free helpers rather than Board methods: the board stays ignorant of
// move generation.

pub fn has_legal_moves(board: &mut Board) -> bool {
    let mut moves: Vec<Move> = Vec::with_capacity(64);
    let mut scratch: Vec<Move> = Vec::with_capacity(128);
    generate_legal(board, &mut moves, &mut scratch);
    !moves.is_empty()
}

pub fn is_checkmate(board: &mut Board) -> bool {
    in_check(board, board.side_to_move) && !has_legal_moves(board)
}

pub fn is_stalemate(board: &mut Board) -> bool {
    !in_check(board, board.side_to_move) && !has_legal_moves(board)
}

pub fn is_fifty_move(board: &Board) -> bool {
    board.halfmove_clock >= 100
}

/// Dead-position test: draw iff only kings remain, kings plus a single
/// minor piece, or kings plus exactly two bishops on the same square
/// color. Any pawn, rook or queen means mating material exists.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut total = 0u32;
    let mut minors = 0u32;
    let mut bishop_colors = [0u32; 2];

    for idx in 0..64u8 {
        let code = board.cells[idx as usize];
        if code == EMPTY_SQ {
            continue;
        }
        total += 1;
        match Piece::from_u8(code & 0x0F) {
            Piece::Pawn | Piece::Rook | Piece::Queen => return false,
            Piece::Bishop => {
                minors += 1;
                let sq = Square::from_index(idx);
                bishop_colors[((sq.rank() + sq.file()) % 2) as usize] += 1;
            }
            Piece::Knight => minors += 1,
            Piece::King => {}
        }
    }

    // bare kings, or kings plus one minor
    if total == 2 || (total == 3 && minors == 1) {
        return true;
    }

    // kings plus two bishops on the same square color (either side)
    if total == 4 && (bishop_colors[0] == 2 || bishop_colors[1] == 2) {
        return true;
    }

    false
}

/// Threefold repetition, insufficient material, or the fifty-move rule.
pub fn is_draw(board: &mut Board) -> bool {
    board.is_threefold() || is_insufficient_material(board) || is_fifty_move(board)
}

pub fn game_state(board: &mut Board) -> GameState {
    let checked = in_check(board, board.side_to_move);
    let movable = has_legal_moves(board);

    if checked && !movable {
        return GameState::Checkmate;
    }
    if checked {
        return GameState::Check;
    }
    if is_draw(board) {
        return GameState::Draw;
    }
    if !movable {
        return GameState::Stalemate;
    }
    GameState::Ok
}
