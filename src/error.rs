use thiserror::Error;

/// Errors surfaced to the embedding host. Everything here is a controlled
/// input failure; internal invariant violations (missing king, undo-stack
/// underflow) panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move notation: {0}")]
    InvalidMoveNotation(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no legal moves in this position")]
    NoLegalMoves,
}
