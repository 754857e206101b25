// Driver binary for poking at the engine core from a shell. Not a UCI
// implementation; the subcommands map one-to-one onto the library entry
// points a serving host would call.

use indicatif::{ProgressBar, ProgressStyle};
use outpost::board::{Board, START_FEN};
use outpost::logger::init_logging;
use outpost::moves::perft::{perft, perft_divide};
use outpost::search::search::{DEFAULT_DEPTH, Engine};
use outpost::status::game_state;
use std::process::ExitCode;
use std::time::Instant;

fn usage() -> ExitCode {
    eprintln!("usage:");
    eprintln!("  outpost perft <depth> [fen]      node counts for depths 1..=depth");
    eprintln!("  outpost divide <depth> [fen]     per-root-move breakdown");
    eprintln!("  outpost bestmove [fen] [depth]   search and print the chosen move");
    eprintln!("  outpost state [fen]              board diagram and game state");
    ExitCode::from(2)
}

fn load_board(fen: Option<&str>) -> Result<Board, ExitCode> {
    let fen = fen.unwrap_or(START_FEN);
    Board::from_fen(fen).map_err(|e| {
        eprintln!("{e}");
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    init_logging("logs/outpost.log", "outpost=debug,info");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        return usage();
    };

    match command.as_str() {
        "perft" => {
            let Some(depth) = args.get(1).and_then(|d| d.parse::<u32>().ok()) else {
                return usage();
            };
            let mut board = match load_board(args.get(2).map(String::as_str)) {
                Ok(b) => b,
                Err(code) => return code,
            };

            let bar = ProgressBar::new(depth as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                    .expect("static template"),
            );
            for d in 1..=depth {
                let start = Instant::now();
                let nodes = perft(&mut board, d);
                let secs = start.elapsed().as_secs_f64().max(1e-9);
                bar.inc(1);
                bar.println(format!(
                    "depth {d}: {nodes} nodes in {secs:.3}s ({:.0} nps)",
                    nodes as f64 / secs
                ));
            }
            bar.finish_and_clear();
        }
        "divide" => {
            let Some(depth) = args.get(1).and_then(|d| d.parse::<u32>().ok()) else {
                return usage();
            };
            let mut board = match load_board(args.get(2).map(String::as_str)) {
                Ok(b) => b,
                Err(code) => return code,
            };
            let rows = perft_divide(&mut board, depth);
            let total: u64 = rows.iter().map(|(_, n)| n).sum();
            for (mv, nodes) in rows {
                println!("{mv}: {nodes}");
            }
            println!("total: {total}");
        }
        "bestmove" => {
            let mut board = match load_board(args.get(1).map(String::as_str)) {
                Ok(b) => b,
                Err(code) => return code,
            };
            let depth = args
                .get(2)
                .and_then(|d| d.parse::<u32>().ok())
                .unwrap_or(DEFAULT_DEPTH);
            let mut engine = Engine::new(depth, rand::random());
            match engine.select_move(&mut board) {
                Some((mv, score)) => {
                    println!("bestmove {mv} score {score} nodes {}", engine.nodes());
                }
                None => {
                    println!("no legal moves ({:?})", game_state(&mut board));
                }
            }
        }
        "state" => {
            let mut board = match load_board(args.get(1).map(String::as_str)) {
                Ok(b) => b,
                Err(code) => return code,
            };
            print!("{}", board.to_ascii());
            println!("fen:   {board}");
            println!("state: {:?}", game_state(&mut board));
        }
        _ => return usage(),
    }

    ExitCode::SUCCESS
}
