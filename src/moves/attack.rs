// Square-attack raycasts over the mailbox. Offsets are (rank, file)
// deltas so steps can never wrap a board edge.

use crate::board::{Board, Color, EMPTY_SQ, Piece, piece_code};
use crate::square::Square;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// True iff any piece of `attacker` attacks `sq`: pawn diagonals (direction
/// depends on the attacker's color), knight jumps, king adjacency, then
/// orthogonal and diagonal rays. Returns on the first attacker found.
pub fn is_square_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    // pawns: an attacking pawn sits one rank behind sq along its own
    // advance direction
    let pawn = piece_code(attacker, Piece::Pawn);
    let behind = match attacker {
        Color::White => -1i8,
        Color::Black => 1i8,
    };
    for df in [-1i8, 1] {
        if let Some(from) = sq.offset(behind, df)
            && board.code_at(from) == pawn
        {
            return true;
        }
    }

    // knights
    let knight = piece_code(attacker, Piece::Knight);
    for (dr, df) in KNIGHT_OFFSETS {
        if let Some(from) = sq.offset(dr, df)
            && board.code_at(from) == knight
        {
            return true;
        }
    }

    // enemy king adjacency
    let king = piece_code(attacker, Piece::King);
    for (dr, df) in KING_OFFSETS {
        if let Some(from) = sq.offset(dr, df)
            && board.code_at(from) == king
        {
            return true;
        }
    }

    let rook = piece_code(attacker, Piece::Rook);
    let bishop = piece_code(attacker, Piece::Bishop);
    let queen = piece_code(attacker, Piece::Queen);

    // rook / queen rays
    for (dr, df) in ROOK_DIRS {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            let code = board.code_at(next);
            if code != EMPTY_SQ {
                if code == rook || code == queen {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }

    // bishop / queen rays
    for (dr, df) in BISHOP_DIRS {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            let code = board.code_at(next);
            if code != EMPTY_SQ {
                if code == bishop || code == queen {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }

    false
}

/// Is the king of `color` attacked by the other side?
#[inline]
pub fn in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.opposite())
}
