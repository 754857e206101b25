use outpost::board::Board;
use outpost::moves::perft::{perft, perft_divide};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWI_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const EP_FEN: &str = "rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2";

fn run(fen: &str, depth: u32, expected: u64) {
    let mut board = Board::from_fen(fen).expect("valid FEN");
    let fen_before = board.to_fen();
    let nodes = perft(&mut board, depth);
    assert_eq!(
        nodes, expected,
        "perft mismatch for {fen} at depth {depth}: got {nodes}, expected {expected}"
    );
    assert_eq!(board.to_fen(), fen_before, "perft must not disturb the board");
    assert_eq!(board.undo_depth(), 0);
}

#[test]
fn perft_depth_zero_is_one() {
    run(START_FEN, 0, 1);
}

#[test]
fn perft_startpos_d1() {
    run(START_FEN, 1, 20);
}

#[test]
fn perft_startpos_d2() {
    run(START_FEN, 2, 400);
}

#[test]
fn perft_startpos_d3() {
    run(START_FEN, 3, 8_902);
}

#[test]
fn perft_startpos_d4() {
    run(START_FEN, 4, 197_281);
}

#[test]
fn perft_startpos_d5() {
    run(START_FEN, 5, 4_865_609);
}

// heavy; opt-in
#[test]
#[ignore]
fn perft_startpos_d6() {
    run(START_FEN, 6, 119_060_324);
}

#[test]
fn perft_kiwipete_d1() {
    run(KIWI_FEN, 1, 48);
}

#[test]
fn perft_kiwipete_d2() {
    run(KIWI_FEN, 2, 2_039);
}

#[test]
fn perft_kiwipete_d3() {
    run(KIWI_FEN, 3, 97_862);
}

#[test]
#[ignore]
fn perft_kiwipete_d4() {
    run(KIWI_FEN, 4, 4_085_603);
}

#[test]
fn perft_en_passant_position() {
    run(EP_FEN, 1, 31);
    run(EP_FEN, 2, 866);
}

#[test]
fn divide_sums_to_perft_total() {
    for (fen, depth, expected) in [(START_FEN, 3, 8_902u64), (KIWI_FEN, 2, 2_039)] {
        let mut board = Board::from_fen(fen).unwrap();
        let rows = perft_divide(&mut board, depth);
        let total: u64 = rows.iter().map(|(_, n)| n).sum();
        assert_eq!(total, expected, "divide total mismatch for {fen}");
    }
}

#[test]
fn divide_startpos_d1_is_one_node_per_move() {
    let mut board = Board::from_fen(START_FEN).unwrap();
    let rows = perft_divide(&mut board, 1);
    assert_eq!(rows.len(), 20);
    assert!(rows.iter().all(|&(_, n)| n == 1));
}
