use crate::board::Board;
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::types::Move;
use tracing::{debug, instrument};

const MAX_PERFT_DEPTH: usize = 16;

// Per-ply move buffers so the recursion allocates once, not per node. The
// pseudo-legal scratch is consumed inside generate_legal before any child
// runs, so a single shared scratch is enough.
fn move_buffers() -> Vec<Vec<Move>> {
    (0..=MAX_PERFT_DEPTH).map(|_| Vec::with_capacity(64)).collect()
}

fn perft_recursive(
    board: &mut Board,
    depth: u32,
    ply: usize,
    buffers: &mut [Vec<Move>],
    scratch: &mut Vec<Move>,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    {
        let moves = &mut buffers[ply];
        generate_legal(board, moves, scratch);
    }

    let move_count = buffers[ply].len();
    let mut nodes = 0;

    for i in 0..move_count {
        let mv = buffers[ply][i];

        #[cfg(debug_assertions)]
        let hash_before = board.hash;

        make_move(board, mv);
        nodes += perft_recursive(board, depth - 1, ply + 1, buffers, scratch);
        undo_move(board);

        #[cfg(debug_assertions)]
        debug_assert_eq!(board.hash, hash_before, "hash drifted across make/undo");
    }

    nodes
}

/// Count leaf nodes reachable in exactly `depth` plies. Bit-exact against
/// the published reference counts; the move generator's acceptance test.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );
    let mut buffers = move_buffers();
    let mut scratch = Vec::with_capacity(128);
    perft_recursive(board, depth, 0, &mut buffers, &mut scratch)
}

/// Per-root-move node breakdown, in generation order. The sum of the
/// counts equals `perft(depth)`.
#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    assert!(
        depth >= 1,
        "divide needs at least one ply to attribute nodes to"
    );
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut buffers = move_buffers();
    let mut scratch = Vec::with_capacity(128);

    {
        let moves = &mut buffers[0];
        generate_legal(board, moves, &mut scratch);
        debug!(root_moves = moves.len(), "divide: root legal moves");
    }

    let move_count = buffers[0].len();
    let mut out = Vec::with_capacity(move_count);

    for i in 0..move_count {
        let mv = buffers[0][i];
        make_move(board, mv);
        let nodes = perft_recursive(board, depth - 1, 1, &mut buffers, &mut scratch);
        undo_move(board);
        debug!(%mv, nodes, "divide: root child");
        out.push((mv, nodes));
    }

    out
}
