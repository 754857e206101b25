use outpost::board::{Board, START_FEN};
use outpost::hash::zobrist::{ep_file_to_hash, zobrist_keys};
use outpost::moves::execute::{apply_uci, undo_move};

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

#[test]
fn startpos_hash_matches_full_recompute() {
    let b = Board::new();
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn fen_hash_parity_across_positions() {
    let fens = [
        START_FEN,
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ];
    for fen in fens {
        let b = board(fen);
        assert_eq!(b.hash, b.compute_hash_full(), "parity failed for {fen}");
    }
}

#[test]
fn side_to_move_flips_the_hash() {
    let w = board("8/8/8/8/8/8/4k3/4K3 w - - 0 1");
    let b = board("8/8/8/8/8/8/4k3/4K3 b - - 0 1");
    assert_ne!(w.hash, b.hash);
    assert_eq!(w.hash ^ zobrist_keys().side_to_move, b.hash);
}

#[test]
fn each_castling_mask_hashes_distinctly() {
    let mut seen = std::collections::HashSet::new();
    for field in ["-", "K", "Q", "k", "q", "KQ", "kq", "KQkq"] {
        let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {field} - 0 1");
        assert!(
            seen.insert(board(&fen).hash),
            "castling field {field:?} collided"
        );
    }
}

#[test]
fn ep_file_hashes_only_when_capturable() {
    // black pawn d4 can answer the double push: EP contributes
    let with_taker = board("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    let no_ep = board("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1");
    assert_eq!(ep_file_to_hash(&with_taker), Some(4));
    assert_ne!(with_taker.hash, no_ep.hash);

    // nobody can capture onto d3: the EP field is inert in the hash
    let dead_ep = board("rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2");
    let dead_none = board("rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 2");
    assert_eq!(ep_file_to_hash(&dead_ep), None);
    assert_eq!(dead_ep.hash, dead_none.hash);
    // the FEN text still round-trips the square either way
    assert!(dead_ep.to_fen().contains(" d3 "));
}

#[test]
fn double_push_hash_parity_both_colors() {
    // white a2a4 with a black pawn on b4 ready to take
    let mut b = board("4k3/8/8/8/1p6/8/P6P/4K3 w - - 0 1");
    apply_uci(&mut b, "a2a4").unwrap();
    assert_eq!(b.en_passant.unwrap().to_string(), "a3");
    assert_eq!(b.hash, b.compute_hash_full());
    undo_move(&mut b);
    assert_eq!(b.hash, b.compute_hash_full());

    // black h7h5 with a white pawn on g5 ready to take
    let mut b = board("4k3/7p/8/6P1/8/8/8/4K3 b - - 0 1");
    apply_uci(&mut b, "h7h5").unwrap();
    assert_eq!(b.en_passant.unwrap().to_string(), "h6");
    assert_eq!(b.hash, b.compute_hash_full());
    undo_move(&mut b);
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn castling_rights_clear_and_hash_stays_coherent() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    // a1 rook move drops white queenside only
    apply_uci(&mut b, "a1a2").unwrap();
    assert_eq!(b.castling_rights, 0b1101);
    assert_eq!(b.hash, b.compute_hash_full());

    // black king move drops both black rights
    apply_uci(&mut b, "e8e7").unwrap();
    assert_eq!(b.castling_rights, 0b0001);
    assert_eq!(b.hash, b.compute_hash_full());

    undo_move(&mut b);
    undo_move(&mut b);
    assert_eq!(b.castling_rights, 0b1111);
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn corner_rook_capture_strips_the_right() {
    // white bishop takes the h8 rook: black kingside right goes with it
    let mut b = board("r3k2r/8/8/8/8/8/6B1/4K3 w kq - 0 1");
    apply_uci(&mut b, "g2h8").unwrap();
    assert_eq!(b.castling_rights, 0b1000);
    assert_eq!(b.hash, b.compute_hash_full());
    undo_move(&mut b);
    assert_eq!(b.castling_rights, 0b1100);
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn rights_do_not_return_when_the_rook_comes_back() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    apply_uci(&mut b, "h1h2").unwrap();
    apply_uci(&mut b, "a8a7").unwrap();
    apply_uci(&mut b, "h2h1").unwrap();
    apply_uci(&mut b, "a7a8").unwrap();
    assert_eq!(b.castling_rights, 0b0110, "WK and BQ must stay gone");
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn promotion_hash_parity_all_pieces() {
    for promo in ["q", "r", "b", "n"] {
        let mut b = board("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        apply_uci(&mut b, &format!("a7a8{promo}")).unwrap();
        assert_eq!(b.hash, b.compute_hash_full(), "promotion to {promo}");
        assert_eq!(b.halfmove_clock, 0);
        undo_move(&mut b);
        assert_eq!(b.hash, b.compute_hash_full());
    }
}

#[test]
fn capture_promotion_hash_parity() {
    let mut b = board("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    apply_uci(&mut b, "a7b8q").unwrap();
    assert_eq!(b.hash, b.compute_hash_full());
    undo_move(&mut b);
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn en_passant_capture_hash_parity() {
    let mut b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    apply_uci(&mut b, "e5d6").unwrap();
    assert_eq!(b.hash, b.compute_hash_full());
    undo_move(&mut b);
    assert_eq!(b.hash, b.compute_hash_full());
}

#[test]
fn castling_hash_parity_both_wings() {
    for mv in ["e1g1", "e1c1"] {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        apply_uci(&mut b, mv).unwrap();
        assert_eq!(b.hash, b.compute_hash_full(), "after {mv}");
        undo_move(&mut b);
        assert_eq!(b.hash, b.compute_hash_full(), "after undoing {mv}");
    }
}
