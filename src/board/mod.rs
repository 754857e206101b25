mod fen;

pub mod castle_bits;
pub mod tables;

pub use castle_bits::*;

use crate::moves::types::UndoRecord;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Empty cell marker; no packed piece code collides with it.
pub(crate) const EMPTY_SQ: u8 = 0xFF;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Color {
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Decode a 0/1 value into a Color.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Color::White,
            1 => Color::Black,
            _ => panic!("invalid Color encoding: {v}"),
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Piece {
    /// Decode a 0-5 value into a Piece.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            5 => Piece::King,
            _ => panic!("invalid Piece encoding: {v}"),
        }
    }

    #[inline(always)]
    pub fn value(self) -> i32 {
        tables::piece_value(self)
    }
}

// ---- packed cell codes ----
// A cell is one byte: color in the high nibble, piece type in the low
// nibble. The dense index `color * 6 + piece` in 0..12 keys the Zobrist
// piece table and the combined material+PST table.

#[inline(always)]
pub(crate) const fn piece_code(color: Color, piece: Piece) -> u8 {
    ((color as u8) << 4) | piece as u8
}

#[inline(always)]
pub(crate) fn decode(code: u8) -> (Color, Piece) {
    (Color::from_u8(code >> 4), Piece::from_u8(code & 0x0F))
}

#[inline(always)]
pub(crate) const fn table_index(code: u8) -> usize {
    (code >> 4) as usize * 6 + (code & 0x0F) as usize
}

/// The authoritative mutable position: an 8x8 mailbox plus incrementally
/// maintained hash, material+PST score, king squares, repetition counts and
/// the undo stack. Mutation happens exclusively through
/// `moves::execute::{make_move, undo_move}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 0xFF = empty, otherwise a packed piece code.
    pub cells: [u8; 64],
    pub side_to_move: Color,
    /// 4-bit mask, see `castle_bits`.
    pub castling_rights: CastleBits,
    /// The square a capturing pawn would land on (rank 3 or 6), if any.
    pub en_passant: Option<Square>,
    /// Resets on pawn moves and captures (fifty-move rule).
    pub halfmove_clock: u32,
    /// Starts at 1, increments after Black's move.
    pub fullmove_number: u32,
    /// Indexed by Color; kept in lock-step with the mailbox.
    pub king_sq: [Square; 2],
    /// Incremental Zobrist hash.
    pub hash: u64,
    /// Incremental material+PST score, White positive.
    pub score: i32,
    /// Occurrences of each hash in the game history, current position
    /// included. Threefold repetition triggers at 3.
    pub repetition_counts: HashMap<u64, u32>,
    /// One record per applied move since the position was loaded.
    pub undo_stack: Vec<UndoRecord>,
}

impl Board {
    /// All squares empty, White to move, no rights. Mostly a staging area
    /// for the FEN loader.
    pub fn new_empty() -> Self {
        let mut b = Board {
            cells: [EMPTY_SQ; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_sq: [Square::from_index(4), Square::from_index(60)],
            hash: 0,
            score: 0,
            repetition_counts: HashMap::new(),
            undo_stack: Vec::new(),
        };
        b.refresh();
        b
    }

    /// The standard starting position.
    pub fn new() -> Self {
        Board::from_fen(START_FEN).expect("startpos FEN is valid")
    }

    #[inline(always)]
    pub(crate) fn code_at(&self, sq: Square) -> u8 {
        self.cells[sq.index() as usize]
    }

    /// Piece and color on a square, or None if empty.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let code = self.cells[sq.index() as usize];
        if code == EMPTY_SQ { None } else { Some(decode(code)) }
    }

    #[inline(always)]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    #[inline(always)]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_sq[color as usize]
    }

    #[inline(always)]
    pub fn has_castling(&self, flag: CastleBits) -> bool {
        self.castling_rights & flag != 0
    }

    /// Number of applied moves since the position was loaded.
    #[inline(always)]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Full hash recompute from scratch. Must match the incremental hash
    /// after every make and undo.
    pub fn compute_hash_full(&self) -> u64 {
        use crate::hash::zobrist::{ep_file_to_hash, zobrist_keys};

        let keys = zobrist_keys();
        let mut h: u64 = 0;

        for sq in 0..64 {
            let code = self.cells[sq];
            if code != EMPTY_SQ {
                h ^= keys.piece[table_index(code)][sq];
            }
        }

        if self.side_to_move == Color::Black {
            h ^= keys.side_to_move;
        }

        h ^= keys.castling[self.castling_rights as usize];

        if let Some(file) = ep_file_to_hash(self) {
            h ^= keys.ep_file[file as usize];
        }

        h
    }

    /// Full score recompute from scratch. Must match the incremental score
    /// after every make and undo.
    pub fn compute_score_full(&self) -> i32 {
        let table = tables::combined();
        let mut score = 0;
        for sq in 0..64 {
            let code = self.cells[sq];
            if code != EMPTY_SQ {
                score += table[table_index(code)][sq];
            }
        }
        score
    }

    /// Recompute hash and score from the current placement.
    pub fn refresh(&mut self) {
        self.hash = self.compute_hash_full();
        self.score = self.compute_score_full();
    }

    /// How many times the current position has occurred in the game
    /// history (itself included).
    #[inline]
    pub fn repetition_count(&self) -> u32 {
        self.repetition_counts.get(&self.hash).copied().unwrap_or(0)
    }

    /// True iff `repetition_count() >= 3`.
    #[inline]
    pub fn is_threefold(&self) -> bool {
        self.repetition_count() >= 3
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub fn assert_hash(&self) {
        let full = self.compute_hash_full();
        debug_assert_eq!(
            self.hash, full,
            "zobrist parity mismatch: stored={:#018x}, full={:#018x}",
            self.hash, full
        );
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub fn assert_score(&self) {
        let full = self.compute_score_full();
        debug_assert_eq!(
            self.score, full,
            "score parity mismatch: stored={}, full={}",
            self.score, full
        );
    }

    /// Plain-text diagram, rank 8 at the top. Feeds the CLI `state` view.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(72 * 10);
        for rank in (0..8).rev() {
            out.push((b'1' + rank) as char);
            out.push(' ');
            for file in 0..8 {
                let glyph = match self.piece_at(Square::make(rank, file)) {
                    Some((color, piece)) => fen::piece_to_char(color, piece),
                    None => '.',
                };
                out.push(' ');
                out.push(glyph);
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new_empty()
    }
}

impl FromStr for Board {
    type Err = crate::error::ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
