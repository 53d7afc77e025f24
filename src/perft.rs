// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::moves::Move;
use crate::position::{MoveError, Position};

/// Counts the leaf nodes of the legal move tree rooted at `pos`, `depth` plies deep.
///
/// Every branch is played out on its own clone of the position, so branches are counted in
/// parallel. A legal move that fails to apply means the rules disagree with themselves; that
/// error is returned rather than miscounted.
pub fn perft(pos: &Position, depth: u32) -> Result<u64, MoveError> {
    if depth == 0 {
        return Ok(1);
    }

    pos.legal_moves()
        .as_slice()
        .par_iter()
        .map(|&mov| {
            let mut new_pos = pos.clone();
            new_pos.apply_move_unchecked(mov)?;
            perft(&new_pos, depth - 1)
        })
        .sum()
}

/// Splits a perft count by root move, in move generation order. The counts sum to
/// `perft(pos, depth)`. Depth zero has no root moves and yields an empty list.
pub fn perft_divide(pos: &Position, depth: u32) -> Result<Vec<(Move, u64)>, MoveError> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let divided: Vec<(Move, u64)> = pos
        .legal_moves()
        .as_slice()
        .par_iter()
        .map(|&mov| {
            let mut new_pos = pos.clone();
            new_pos.apply_move_unchecked(mov)?;
            Ok((mov, perft(&new_pos, depth - 1)?))
        })
        .collect::<Result<_, MoveError>>()?;

    debug!(
        "perft divide({}) of {}: {} moves, {} nodes",
        depth,
        pos.as_fen(),
        divided.len(),
        divided.iter().map(|&(_, nodes)| nodes).sum::<u64>()
    );
    Ok(divided)
}
