// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fs::File;
use std::path::Path;

use chessrules::{perft, perft_divide, Position};
use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
struct PerftCase {
    fen: String,
    depth: u32,
    nodes: u64,
}

fn load_cases() -> Vec<PerftCase> {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/perft_positions.json");
    let file = File::open(path).unwrap();
    serde_json::from_reader(file).unwrap()
}

#[test]
fn perft_positions() {
    for case in load_cases() {
        let pos = Position::from_fen(&case.fen).unwrap();
        assert_eq!(
            Ok(case.nodes),
            perft(&pos, case.depth),
            "perft({}) of {}",
            case.depth,
            case.fen
        );
    }
}

#[test]
fn perft_positions_divide() {
    for case in load_cases() {
        let pos = Position::from_fen(&case.fen).unwrap();
        let divided = perft_divide(&pos, case.depth).unwrap();
        assert_eq!(pos.legal_moves().len(), divided.len(), "{}", case.fen);
        assert_eq!(
            case.nodes,
            divided.iter().map(|&(_, nodes)| nodes).sum::<u64>(),
            "divide({}) of {}",
            case.depth,
            case.fen
        );
    }
}

#[test]
fn perft_positions_fen_round_trip() {
    for case in load_cases() {
        let pos = Position::from_fen(&case.fen).unwrap();
        assert_eq!(case.fen, pos.as_fen());
    }
}
