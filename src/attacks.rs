// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::moves::Move;
use crate::position::Position;
use crate::types::Color;

//
// Board analysis (check detection)
//

impl Position {
    /// Returns whether the king of the given color is attacked by the opposing side, i.e. whether
    /// any opposing piece has a pseudo-legal move onto the king's square.
    ///
    /// This is the single attack test used for check detection, for the legality filter and for
    /// both castling safety conditions. A position without a king of the given color is treated
    /// as attacked.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        let king = match self.board.king(color) {
            Some(king) => king,
            None => {
                trace!("no {:?} king on the board, treating it as attacked", color);
                return true;
            }
        };

        let attacker = color.toggle();
        self.board
            .pieces(attacker)
            .any(|(square, _)| self.is_pseudo_legal_for(attacker, Move::new(square, king)))
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.is_king_attacked(color)
    }
}
