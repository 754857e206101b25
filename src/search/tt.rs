use crate::moves::types::Move;
use std::collections::HashMap;

/// What the stored score means relative to the search window it was
/// produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// True minimax value of the node.
    Exact,
    /// Score caused a beta cutoff; the true value is >= score.
    Lower,
    /// Score never raised alpha; the true value is <= score.
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub depth: u8,
    /// Mate scores are stored ply-normalized; see the search's
    /// score_to_tt / score_from_tt.
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Cache of searched positions keyed by the full 64-bit Zobrist hash.
/// Replacement policy: a new entry wins iff it was searched at least as
/// deep as the incumbent. The table outlives individual searches.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    table: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    #[inline]
    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        self.table.get(&key).copied()
    }

    pub fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Option<Move>) {
        match self.table.get_mut(&key) {
            // keep the deeper search result
            Some(existing) if depth < existing.depth => {}
            _ => {
                self.table.insert(
                    key,
                    TtEntry {
                        depth,
                        score,
                        bound,
                        best_move,
                    },
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}
