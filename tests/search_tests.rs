use outpost::board::Board;
use outpost::error::ChessError;
use outpost::moves::execute::generate_legal;
use outpost::search::search::{Engine, MATE, MATE_THRESHOLD};

const MATE_IN_ONE: &str = "rnbqkb1r/ppppp2p/8/5p2/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1";
const MATE_IN_TWO: &str = "r1bq2r1/b4pk1/p1pp1p2/1p2pP2/1P2P1PB/3P4/1PPQ2P1/R3K2R w - - 0 1";

#[test]
fn finds_the_mate_in_one() {
    let mut board = Board::from_fen(MATE_IN_ONE).unwrap();
    let mut engine = Engine::new(2, 0);
    let (mv, score) = engine.select_move(&mut board).expect("moves exist");
    assert_eq!(mv.to_uci(), "d1h5");
    assert_eq!(score, MATE - 1, "mate delivered one ply from the root");
    assert!(score > MATE_THRESHOLD);
}

#[test]
fn mate_in_one_is_found_at_any_depth() {
    for depth in [2, 3, 4] {
        let mut board = Board::from_fen(MATE_IN_ONE).unwrap();
        let mut engine = Engine::new(depth, 99);
        let uci = engine.choose_move(&mut board).unwrap();
        assert_eq!(uci, "d1h5", "depth {depth}");
    }
}

#[test]
fn finds_the_two_move_mate_at_default_depth() {
    let mut board = Board::from_fen(MATE_IN_TWO).unwrap();
    let mut engine = Engine::new(4, 7);
    let (mv, score) = engine.select_move(&mut board).expect("moves exist");
    assert_eq!(mv.to_uci(), "d2h6");
    assert_eq!(score, MATE - 3, "mate lands on the third ply");
}

#[test]
fn mate_scores_stay_correct_through_a_warm_table() {
    // second search reuses the TT entries stored by the first; the
    // ply-normalization must keep the reported distance identical
    let mut engine = Engine::new(4, 11);

    let mut board = Board::from_fen(MATE_IN_TWO).unwrap();
    let (first_mv, first_score) = engine.select_move(&mut board).unwrap();
    assert!(engine.tt.len() > 0);

    let mut board = Board::from_fen(MATE_IN_TWO).unwrap();
    let (second_mv, second_score) = engine.select_move(&mut board).unwrap();

    assert_eq!(first_mv, second_mv);
    assert_eq!(first_score, second_score);
    assert_eq!(second_score, MATE - 3);
}

#[test]
fn search_leaves_the_board_bit_identical() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let snapshot = board.clone();
    let mut engine = Engine::new(3, 5);
    engine.select_move(&mut board).unwrap();
    assert_eq!(board, snapshot);
}

#[test]
fn terminal_positions_yield_no_move() {
    // checkmate
    let mut mated =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    let mut engine = Engine::new(2, 0);
    assert!(engine.select_move(&mut mated).is_none());
    assert_eq!(engine.choose_move(&mut mated), Err(ChessError::NoLegalMoves));

    // stalemate
    let mut stuck = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(engine.choose_move(&mut stuck), Err(ChessError::NoLegalMoves));
}

#[test]
fn chosen_move_is_always_legal() {
    let fens = [
        outpost::board::START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen).unwrap();
        let mut engine = Engine::new(2, 123);
        let uci = engine.choose_move(&mut board).unwrap();

        let mut moves = Vec::new();
        let mut scratch = Vec::new();
        generate_legal(&mut board, &mut moves, &mut scratch);
        assert!(
            moves.iter().any(|m| m.to_uci() == uci),
            "{fen}: {uci} not in the legal set"
        );
    }
}

#[test]
fn same_seed_same_choice() {
    let pick = |seed: u64| {
        let mut board = Board::new();
        Engine::new(2, seed).choose_move(&mut board).unwrap()
    };
    assert_eq!(pick(1234), pick(1234));
    assert_eq!(pick(99), pick(99));
}

#[test]
fn black_minimizes() {
    // Black to move with a hanging white queen: take it
    let mut board = Board::from_fen("4k3/8/8/3q4/3Q4/8/8/4K3 b - - 0 1").unwrap();
    let mut engine = Engine::new(2, 0);
    let (mv, score) = engine.select_move(&mut board).unwrap();
    assert_eq!(mv.to_uci(), "d5d4");
    assert!(score < 0, "Black-favorable scores are negative, got {score}");
}

#[test]
fn node_counter_resets_per_search() {
    let mut board = Board::new();
    let mut engine = Engine::new(2, 0);
    engine.select_move(&mut board).unwrap();
    let first = engine.nodes();
    assert!(first > 0);
    engine.select_move(&mut board).unwrap();
    assert!(engine.nodes() <= first, "warm TT should not grow the tree");
}
