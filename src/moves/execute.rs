// Move execution: `make_move` mutates every Board field in lock-step
// (mailbox, king squares, clocks, castling rights, hash, score,
// repetition counts) and pushes an UndoRecord; `undo_move` pops it and
// restores the board bit-for-bit. The search never copies a Board.

use crate::board::castle_bits::CASTLING_KEEP_MASK;
use crate::board::{Board, Color, EMPTY_SQ, Piece, piece_code, table_index, tables};
use crate::error::ChessError;
use crate::hash::zobrist::{ep_file_to_hash, zobrist_keys};
use crate::moves::attack::in_check;
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::types::{Move, MoveBuffer, UndoRecord, parse_uci};
use crate::square::Square;

/// Rook relocation for a castle, keyed by the king's destination.
#[inline(always)]
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to.index() {
        6 => (Square::from_index(7), Square::from_index(5)), // white O-O
        2 => (Square::from_index(0), Square::from_index(3)), // white O-O-O
        62 => (Square::from_index(63), Square::from_index(61)), // black O-O
        58 => (Square::from_index(56), Square::from_index(59)), // black O-O-O
        other => panic!("not a castle destination: {other}"),
    }
}

/// Apply `mv` to the board. The move must come from the generator (or be
/// resolved through `resolve_uci`); feeding arbitrary moves is a
/// programmer error.
pub fn make_move(board: &mut Board, mv: Move) {
    let keys = zobrist_keys();
    let combined = tables::combined();

    let color = board.side_to_move;
    let from = mv.from.index() as usize;
    let to = mv.to.index() as usize;
    let moved = board.cells[from];
    debug_assert_ne!(moved, EMPTY_SQ, "no piece to move on {}", mv.from);
    let piece = Piece::from_u8(moved & 0x0F);

    let mut undo = UndoRecord {
        mv,
        moved,
        capture: None,
        rook_move: None,
        prev_castling: board.castling_rights,
        prev_en_passant: board.en_passant,
        prev_halfmove_clock: board.halfmove_clock,
        prev_fullmove_number: board.fullmove_number,
        prev_side: color,
        prev_hash: board.hash,
        prev_score: board.score,
    };

    // 1) the old EP contribution leaves the hash before anything moves;
    //    the capturable test reads the pre-move pawn placement
    if let Some(f) = ep_file_to_hash(board) {
        board.hash ^= keys.ep_file[f as usize];
    }
    board.en_passant = None;

    // halfmove clock: pawn moves reset, captures reset below
    if piece == Piece::Pawn {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock += 1;
    }

    // 2) capture; an en-passant victim sits off the destination square
    let capture_sq = if mv.is_en_passant() {
        Some(Square::make(mv.from.rank(), mv.to.file()))
    } else if mv.is_capture() {
        Some(mv.to)
    } else {
        None
    };

    if let Some(cap_sq) = capture_sq {
        let ci = cap_sq.index() as usize;
        let captured = board.cells[ci];
        debug_assert_ne!(captured, EMPTY_SQ, "capture on empty {cap_sq}");
        board.cells[ci] = EMPTY_SQ;
        board.hash ^= keys.piece[table_index(captured)][ci];
        board.score -= combined[table_index(captured)][ci];
        board.halfmove_clock = 0;
        undo.capture = Some((captured, cap_sq));
    }

    // move the piece
    board.cells[from] = EMPTY_SQ;
    board.hash ^= keys.piece[table_index(moved)][from];
    board.score -= combined[table_index(moved)][from];
    board.cells[to] = moved;
    board.hash ^= keys.piece[table_index(moved)][to];
    board.score += combined[table_index(moved)][to];

    if piece == Piece::King {
        board.king_sq[color as usize] = mv.to;
    }

    // 3) promotion swaps the pawn on `to` for the promoted piece
    if let Some(promo) = mv.promotion() {
        debug_assert_eq!(piece, Piece::Pawn, "only pawns promote");
        let promo_code = piece_code(color, promo);
        board.hash ^= keys.piece[table_index(moved)][to];
        board.score -= combined[table_index(moved)][to];
        board.cells[to] = promo_code;
        board.hash ^= keys.piece[table_index(promo_code)][to];
        board.score += combined[table_index(promo_code)][to];
    }

    // 4) castling moves the rook too
    if mv.is_castling() {
        let (rf, rt) = castle_rook_squares(mv.to);
        let rfi = rf.index() as usize;
        let rti = rt.index() as usize;
        let rook = board.cells[rfi];
        debug_assert_eq!(rook, piece_code(color, Piece::Rook), "castle without rook");
        board.cells[rfi] = EMPTY_SQ;
        board.hash ^= keys.piece[table_index(rook)][rfi];
        board.score -= combined[table_index(rook)][rfi];
        board.cells[rti] = rook;
        board.hash ^= keys.piece[table_index(rook)][rti];
        board.score += combined[table_index(rook)][rti];
        undo.rook_move = Some((rf, rt));
    }

    // 5) castling rights via the per-square keep-mask; one lookup covers
    //    king moves, rook moves, and rook captures on the home corners
    let old_rights = undo.prev_castling;
    let new_rights = old_rights & CASTLING_KEEP_MASK[from] & CASTLING_KEEP_MASK[to];
    if new_rights != old_rights {
        board.castling_rights = new_rights;
        board.hash ^= keys.castling[old_rights as usize];
        board.hash ^= keys.castling[new_rights as usize];
    }

    // a double push opens an EP target on the skipped square
    if piece == Piece::Pawn && (from as i8 - to as i8).abs() == 16 {
        board.en_passant = Some(Square::from_index(((from + to) / 2) as u8));
    }

    // 6) clocks and side to move
    if color == Color::Black {
        board.fullmove_number += 1;
    }
    board.side_to_move = color.opposite();
    board.hash ^= keys.side_to_move;

    // the new EP contribution enters only if the new mover can take
    if let Some(f) = ep_file_to_hash(board) {
        board.hash ^= keys.ep_file[f as usize];
    }

    *board.repetition_counts.entry(board.hash).or_insert(0) += 1;
    board.undo_stack.push(undo);

    #[cfg(debug_assertions)]
    {
        board.assert_hash();
        board.assert_score();
    }
}

/// Reverse the most recent `make_move`. Calling with an empty undo stack
/// is a programmer error.
pub fn undo_move(board: &mut Board) {
    let undo = board
        .undo_stack
        .pop()
        .expect("undo_move with no applied move");

    // the post-move hash leaves the repetition history; entries drop out
    // entirely at zero so apply+undo is a true no-op
    if let Some(count) = board.repetition_counts.get_mut(&board.hash) {
        *count -= 1;
        if *count == 0 {
            board.repetition_counts.remove(&board.hash);
        }
    }

    let from = undo.mv.from.index() as usize;
    let to = undo.mv.to.index() as usize;

    // put the mover back (a promotion reverts to the pawn saved in `moved`)
    board.cells[to] = EMPTY_SQ;
    board.cells[from] = undo.moved;

    if Piece::from_u8(undo.moved & 0x0F) == Piece::King {
        board.king_sq[undo.prev_side as usize] = undo.mv.from;
    }

    if let Some((captured, cap_sq)) = undo.capture {
        board.cells[cap_sq.index() as usize] = captured;
    }

    if let Some((rf, rt)) = undo.rook_move {
        let rook = board.cells[rt.index() as usize];
        board.cells[rt.index() as usize] = EMPTY_SQ;
        board.cells[rf.index() as usize] = rook;
    }

    board.castling_rights = undo.prev_castling;
    board.en_passant = undo.prev_en_passant;
    board.halfmove_clock = undo.prev_halfmove_clock;
    board.fullmove_number = undo.prev_fullmove_number;
    board.side_to_move = undo.prev_side;
    board.hash = undo.prev_hash;
    board.score = undo.prev_score;

    #[cfg(debug_assertions)]
    {
        board.assert_hash();
        board.assert_score();
    }
}

/// All legal moves for the side to move: pseudo-legal generation, then a
/// make / own-king-attacked / undo filter. Castling transit conditions
/// were already enforced during generation.
pub fn generate_legal(
    board: &mut Board,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_pseudo_legal(board, scratch);
    moves.clear();

    let mover = board.side_to_move;
    for mv in scratch.iter().copied() {
        make_move(board, mv);
        let illegal = in_check(board, mover);
        undo_move(board);
        if !illegal {
            moves.push(mv);
        }
    }
}

/// Legal captures only (including capture-promotions and en passant); the
/// quiescence feed.
pub fn generate_captures(
    board: &mut Board,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_pseudo_legal(board, scratch);
    moves.clear();

    let mover = board.side_to_move;
    for mv in scratch.iter().copied() {
        if !mv.is_capture() {
            continue;
        }
        make_move(board, mv);
        let illegal = in_check(board, mover);
        undo_move(board);
        if !illegal {
            moves.push(mv);
        }
    }
}

/// Resolve a UCI string against the current legal-move set. Syntax errors
/// are `InvalidMoveNotation`; well-formed but unavailable moves are
/// `IllegalMove`.
pub fn resolve_uci(board: &mut Board, uci: &str) -> Result<Move, ChessError> {
    let (from, to, promo) = parse_uci(uci)?;
    let mut moves: Vec<Move> = Vec::with_capacity(64);
    let mut scratch: Vec<Move> = Vec::with_capacity(128);
    generate_legal(board, &mut moves, &mut scratch);
    moves
        .iter()
        .copied()
        .find(|m| m.from == from && m.to == to && m.promotion() == promo)
        .ok_or_else(|| ChessError::IllegalMove(uci.to_string()))
}

/// Resolve and apply in one step; the host-facing move entry point.
pub fn apply_uci(board: &mut Board, uci: &str) -> Result<Move, ChessError> {
    let mv = resolve_uci(board, uci)?;
    make_move(board, mv);
    Ok(mv)
}
