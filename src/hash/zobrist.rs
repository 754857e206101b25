// src/hash/zobrist.rs

use crate::board::{Board, Color, Piece, piece_code};
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Fixed seed: hashes must be reproducible across runs so stored hashes,
/// repetition bookkeeping and test expectations stay stable.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

pub struct ZobristKeys {
    /// `[color * 6 + piece][square]`, same dense index as the board cells.
    pub piece: [[u64; 64]; 12],
    /// XORed in when Black is to move.
    pub side_to_move: u64,
    /// One key per 4-bit castling-rights mask value.
    pub castling: [u64; 16],
    /// a..h => 0..7; XORed in only when the EP file is hashed this ply.
    pub ep_file: [u64; 8],
}

/// Global keys, initialized on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(StdRng::seed_from_u64(ZOBRIST_SEED)))
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys to reduce degenerate collisions
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[0u64; 64]; 12],
        side_to_move: 0,
        castling: [0u64; 16],
        ep_file: [0u64; 8],
    };

    for piece in 0..12 {
        for sq in 0..64 {
            keys.piece[piece][sq] = non_zero(&mut rng);
        }
    }
    keys.side_to_move = non_zero(&mut rng);
    for mask in 0..16 {
        keys.castling[mask] = non_zero(&mut rng);
    }
    for file in 0..8 {
        keys.ep_file[file] = non_zero(&mut rng);
    }

    keys
}

/// Returns `Some(file 0..7)` when the en-passant file belongs in the hash
/// this ply; `None` otherwise.
///
/// Rule: the EP file is hashed only when the side to move actually has a
/// pawn that could capture onto the EP square. A double push nobody can
/// answer leaves the hash (and therefore repetition detection) unchanged.
/// Pseudo-legal only; pins are ignored.
pub fn ep_file_to_hash(board: &Board) -> Option<u8> {
    let ep = board.en_passant?;
    let rank = ep.rank();

    // only rank 3 or 6 ever holds an EP target
    let behind = match (board.side_to_move, rank) {
        (Color::White, 5) => -1i8,
        (Color::Black, 2) => 1i8,
        _ => return None,
    };

    let pawn = piece_code(board.side_to_move, Piece::Pawn);
    for df in [-1i8, 1] {
        if let Some(origin) = ep.offset(behind, df)
            && board.code_at(origin) == pawn
        {
            return Some(ep.file());
        }
    }
    None
}
