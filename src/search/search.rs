// Fixed-depth alpha-beta over the incrementally evaluated board, with
// transposition-table probing, TT-move / MVV-LVA / killer ordering and a
// capture-only quiescence search at the horizon. White maximizes, Black
// minimizes; leaf evaluation is the board's incremental material+PST
// score.

use crate::board::tables::PAWN_VALUE;
use crate::board::{Board, Color};
use crate::error::ChessError;
use crate::moves::attack::in_check;
use crate::moves::execute::{generate_captures, generate_legal, make_move, undo_move};
use crate::moves::types::Move;
use crate::search::context::{MAX_PLY, SearchContext};
use crate::search::ordering::{order_captures, order_moves};
use crate::search::tt::{Bound, TranspositionTable};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

pub const MATE: i32 = 100_000;
/// Anything beyond this magnitude is a mate score and gets ply-adjusted.
pub const MATE_THRESHOLD: i32 = 90_000;
const INF: i32 = 1_000_000;

/// Four plies: deep enough to resolve the two-mover tactics the fixed
/// depth is asked about, shallow enough to stay interactive.
pub const DEFAULT_DEPTH: u32 = 4;

// Mate scores are stored distance-to-mate-adjusted so a mate found at
// different plies stays comparable across the tree: add the ply on the way
// into the table, strip it back out on the way back.
#[inline]
fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Material value of the piece a capture removes; the en-passant victim
/// is a pawn even though the destination square is empty.
#[inline]
fn victim_value(board: &Board, mv: Move) -> i32 {
    if mv.is_en_passant() {
        PAWN_VALUE
    } else {
        board
            .piece_type_at(mv.to)
            .expect("capture without a victim")
            .value()
    }
}

/// The search session: fixed depth, a persistent transposition table,
/// per-search killer tables, and an injected seedable RNG that breaks
/// ties among equal-best root moves.
pub struct Engine {
    pub depth: u32,
    pub tt: TranspositionTable,
    ctx: SearchContext,
    rng: StdRng,
}

impl Engine {
    pub fn new(depth: u32, seed: u64) -> Self {
        Self {
            depth: depth.clamp(1, MAX_PLY as u32 - 1),
            tt: TranspositionTable::new(),
            ctx: SearchContext::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.ctx.nodes
    }

    /// Best move in UCI notation; `NoLegalMoves` on a terminal position.
    pub fn choose_move(&mut self, board: &mut Board) -> Result<String, ChessError> {
        self.select_move(board)
            .map(|(mv, _)| mv.to_uci())
            .ok_or(ChessError::NoLegalMoves)
    }

    /// Search the position to the configured depth and return the chosen
    /// move with its score (White-positive). `None` iff the side to move
    /// has no legal moves. Board state is restored bit-identically.
    #[instrument(skip(self, board), fields(depth = self.depth))]
    pub fn select_move(&mut self, board: &mut Board) -> Option<(Move, i32)> {
        self.ctx.reset();

        let mut moves: Vec<Move> = Vec::with_capacity(64);
        let mut scratch: Vec<Move> = Vec::with_capacity(128);
        generate_legal(board, &mut moves, &mut scratch);
        if moves.is_empty() {
            return None;
        }

        let maximizing = board.side_to_move == Color::White;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best: Vec<Move> = Vec::new();

        for mv in moves.iter().copied() {
            make_move(board, mv);
            let score = self.alphabeta(board, self.depth - 1, -INF, INF, !maximizing, 1);
            undo_move(board);

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best.clear();
                best.push(mv);
            } else if score == best_score {
                best.push(mv);
            }
        }

        // uniform tie-break over the equal-best moves
        let pick = best[self.rng.random_range(0..best.len())];
        debug!(
            chosen = %pick,
            score = best_score,
            candidates = best.len(),
            nodes = self.ctx.nodes,
            "search finished"
        );
        Some((pick, best_score))
    }

    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u32,
    ) -> i32 {
        self.ctx.nodes += 1;

        let alpha_orig = alpha;
        let beta_orig = beta;
        let key = board.hash;

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.best_move;
            if entry.depth as u32 >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower => alpha = alpha.max(score),
                    Bound::Upper => beta = beta.min(score),
                }
                if alpha >= beta {
                    return score;
                }
            }
        }

        if depth == 0 {
            return self.quiescence(board, alpha, beta, maximizing);
        }

        let mut moves: Vec<Move> = Vec::with_capacity(64);
        let mut scratch: Vec<Move> = Vec::with_capacity(128);
        generate_legal(board, &mut moves, &mut scratch);

        if moves.is_empty() {
            // checkmate is worse the further from the root it is; a quiet
            // dead end is a stalemate
            return if in_check(board, board.side_to_move) {
                if maximizing { -MATE + ply as i32 } else { MATE - ply as i32 }
            } else {
                0
            };
        }

        order_moves(
            &mut moves,
            board,
            tt_move,
            &self.ctx.killer_moves[ply as usize],
        );

        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mv in moves.iter().copied() {
            make_move(board, mv);
            let score = self.alphabeta(board, depth - 1, alpha, beta, !maximizing, ply + 1);
            undo_move(board);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                // quiet cutoff moves earn a killer slot for this ply
                if !mv.is_capture() {
                    self.ctx.update_killer(ply as usize, mv);
                }
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt
            .store(key, depth as u8, score_to_tt(best_score, ply), bound, best_move);

        best_score
    }

    fn quiescence(&mut self, board: &mut Board, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.ctx.nodes += 1;

        // stand pat: the incrementally maintained evaluation bounds the
        // node when declining every capture
        let stand_pat = board.score;
        if maximizing {
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return alpha;
            }
            beta = beta.min(stand_pat);
        }

        let mut captures: Vec<Move> = Vec::with_capacity(16);
        let mut scratch: Vec<Move> = Vec::with_capacity(128);
        generate_captures(board, &mut captures, &mut scratch);
        order_captures(&mut captures, board);

        for mv in captures.iter().copied() {
            // delta pruning: if even winning the victim outright cannot
            // reach the window, skip the capture
            let victim = victim_value(board, mv);
            if maximizing {
                if stand_pat + victim < alpha {
                    continue;
                }
            } else if stand_pat - victim > beta {
                continue;
            }

            make_move(board, mv);
            let score = self.quiescence(board, alpha, beta, !maximizing);
            undo_move(board);

            if maximizing {
                if score >= beta {
                    return beta;
                }
                alpha = alpha.max(score);
            } else {
                if score <= alpha {
                    return alpha;
                }
                beta = beta.min(score);
            }
        }

        if maximizing { alpha } else { beta }
    }
}
