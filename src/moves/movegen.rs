// Pseudo-legal move generation: iterate the 64 squares and dispatch on
// the piece found. Legality filtering (own king safety) lives in
// `execute::generate_legal`; castling transit safety is enforced here so
// the filter stays a single make/check/undo.

use crate::board::castle_bits::*;
use crate::board::{Board, Color, EMPTY_SQ, Piece, piece_code};
use crate::moves::attack::{BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS, is_square_attacked};
use crate::moves::types::*;
use crate::square::Square;

const PROMO_FLAGS: [u8; 4] = [FLAG_PROMO_Q, FLAG_PROMO_R, FLAG_PROMO_B, FLAG_PROMO_N];

/// Push every pseudo-legal move for the side to move into `moves`.
pub fn generate_pseudo_legal(board: &Board, moves: &mut impl MoveBuffer) {
    let color = board.side_to_move;
    let enemy_king = board.king_square(color.opposite());

    for idx in 0..64u8 {
        let from = Square::from_index(idx);
        let code = board.code_at(from);
        if code == EMPTY_SQ || Color::from_u8(code >> 4) != color {
            continue;
        }

        match Piece::from_u8(code & 0x0F) {
            Piece::Knight => offset_moves(board, moves, color, from, &KNIGHT_OFFSETS),
            Piece::King => {
                king_moves(board, moves, color, from, enemy_king);
                castling_moves(board, moves, color, from);
            }
            Piece::Pawn => pawn_moves(board, moves, color, from),
            Piece::Rook => slider_moves(board, moves, color, from, &ROOK_DIRS),
            Piece::Bishop => slider_moves(board, moves, color, from, &BISHOP_DIRS),
            Piece::Queen => {
                slider_moves(board, moves, color, from, &ROOK_DIRS);
                slider_moves(board, moves, color, from, &BISHOP_DIRS);
            }
        }
    }
}

fn offset_moves(
    board: &Board,
    moves: &mut impl MoveBuffer,
    color: Color,
    from: Square,
    offsets: &[(i8, i8)],
) {
    for &(dr, df) in offsets {
        let Some(to) = from.offset(dr, df) else {
            continue;
        };
        let target = board.code_at(to);
        if target == EMPTY_SQ {
            moves.push(Move::new(from, to, FLAG_NONE));
        } else if Color::from_u8(target >> 4) != color {
            moves.push(Move::new(from, to, FLAG_CAPTURE));
        }
    }
}

fn king_moves(
    board: &Board,
    moves: &mut impl MoveBuffer,
    color: Color,
    from: Square,
    enemy_king: Square,
) {
    for &(dr, df) in &KING_OFFSETS {
        let Some(to) = from.offset(dr, df) else {
            continue;
        };
        // kings may never stand adjacent
        let rank_gap = (to.rank() as i8 - enemy_king.rank() as i8).abs();
        let file_gap = (to.file() as i8 - enemy_king.file() as i8).abs();
        if rank_gap <= 1 && file_gap <= 1 {
            continue;
        }
        let target = board.code_at(to);
        if target == EMPTY_SQ {
            moves.push(Move::new(from, to, FLAG_NONE));
        } else if Color::from_u8(target >> 4) != color {
            moves.push(Move::new(from, to, FLAG_CAPTURE));
        }
    }
}

/// Castling: home square, the right still held, the rook at home, the
/// intermediate squares empty, and king origin / transit / destination all
/// unattacked. The origin condition is "not castling out of check".
fn castling_moves(board: &Board, moves: &mut impl MoveBuffer, color: Color, from: Square) {
    let (home, kingside_right, queenside_right) = match color {
        Color::White => (Square::from_index(4), CASTLE_WK, CASTLE_WQ),
        Color::Black => (Square::from_index(60), CASTLE_BK, CASTLE_BQ),
    };
    if from != home {
        return;
    }

    let base = home.index() - 4; // a-file square of the back rank
    let enemy = color.opposite();
    let rook = piece_code(color, Piece::Rook);
    let empty = |offset: u8| board.cells[(base + offset) as usize] == EMPTY_SQ;
    let safe = |offset: u8| !is_square_attacked(board, Square::from_index(base + offset), enemy);

    if board.has_castling(kingside_right)
        && board.cells[(base + 7) as usize] == rook
        && empty(5)
        && empty(6)
        && safe(4)
        && safe(5)
        && safe(6)
    {
        moves.push(Move::new(from, Square::from_index(base + 6), FLAG_CASTLE_K));
    }

    if board.has_castling(queenside_right)
        && board.cells[base as usize] == rook
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(4)
        && safe(3)
        && safe(2)
    {
        moves.push(Move::new(from, Square::from_index(base + 2), FLAG_CASTLE_Q));
    }
}

fn pawn_moves(board: &Board, moves: &mut impl MoveBuffer, color: Color, from: Square) {
    let (dir, start_rank, promo_rank) = match color {
        Color::White => (1i8, 1u8, 7u8),
        Color::Black => (-1i8, 6u8, 0u8),
    };

    // pushes
    if let Some(to) = from.offset(dir, 0)
        && board.code_at(to) == EMPTY_SQ
    {
        if to.rank() == promo_rank {
            for flag in PROMO_FLAGS {
                moves.push(Move::new(from, to, flag));
            }
        } else {
            moves.push(Move::new(from, to, FLAG_NONE));
        }
        // double push needs both squares clear
        if from.rank() == start_rank
            && let Some(two) = from.offset(2 * dir, 0)
            && board.code_at(two) == EMPTY_SQ
        {
            moves.push(Move::new(from, two, FLAG_NONE));
        }
    }

    // diagonal captures and en passant
    for df in [-1i8, 1] {
        let Some(to) = from.offset(dir, df) else {
            continue;
        };
        let target = board.code_at(to);
        if target != EMPTY_SQ {
            if Color::from_u8(target >> 4) != color {
                if to.rank() == promo_rank {
                    for flag in PROMO_FLAGS {
                        moves.push(Move::new(from, to, FLAG_CAPTURE | flag));
                    }
                } else {
                    moves.push(Move::new(from, to, FLAG_CAPTURE));
                }
            }
        } else if board.en_passant == Some(to) {
            moves.push(Move::new(from, to, FLAG_CAPTURE | FLAG_EN_PASSANT));
        }
    }
}

fn slider_moves(
    board: &Board,
    moves: &mut impl MoveBuffer,
    color: Color,
    from: Square,
    dirs: &[(i8, i8)],
) {
    for &(dr, df) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, df) {
            let target = board.code_at(to);
            if target == EMPTY_SQ {
                moves.push(Move::new(from, to, FLAG_NONE));
            } else {
                if Color::from_u8(target >> 4) != color {
                    moves.push(Move::new(from, to, FLAG_CAPTURE));
                }
                break;
            }
            cur = to;
        }
    }
}
