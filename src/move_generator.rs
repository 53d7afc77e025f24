// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use smallvec::SmallVec;

use crate::moves::Move;
use crate::position::Position;
use crate::types::{PieceKind, Square, SquareParseError};

/// A list of moves. Positions reached by play have at most 218 legal moves and stay inline;
/// positions built from arbitrary FEN may have more and spill to the heap.
pub type MoveVec = SmallVec<[Move; 256]>;

/// Order in which a promoting pawn move is expanded.
const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Knight,
];

//
// Legality testing and legal move enumeration
//

impl Position {
    /// Move legality test. A move is legal if it is pseudo-legal and playing it does not leave
    /// the mover's own king attacked.
    ///
    /// The promotion piece is not part of the test: the move is probed as if it promoted to a
    /// queen. Errors raised while applying the move to the scratch position make the move
    /// illegal; they never escape.
    pub fn is_legal(&self, mov: Move) -> bool {
        let probe_move = mov.with_promotion(PieceKind::Queen);
        if !self.is_pseudo_legal(probe_move) {
            return false;
        }

        let side = self.side_to_move();
        let mut probe = self.clone();
        match probe.apply_move_unchecked(probe_move) {
            Ok(()) => !probe.is_king_attacked(side),
            Err(err) => {
                trace!("speculative {} failed, treating as illegal: {}", probe_move, err);
                false
            }
        }
    }

    /// All legal moves for the side to move, in board scan order (see `Square::all`), with each
    /// promoting pawn move expanded into queen, bishop, rook and knight promotions.
    pub fn legal_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        for (source, _) in self.board.pieces(self.side_to_move) {
            self.generate_legal_moves_from(source, &mut moves);
        }

        moves
    }

    /// All legal moves of the piece on the given square, e.g. `"e2"`. A square that is empty or
    /// holds a piece of the side not to move has no legal moves.
    pub fn legal_moves_from(&self, square: &str) -> Result<MoveVec, SquareParseError> {
        let source = square.parse::<Square>()?;
        let mut moves = MoveVec::new();
        self.generate_legal_moves_from(source, &mut moves);
        Ok(moves)
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.pieces(self.side_to_move).any(|(source, _)| {
            Square::all().any(|destination| self.is_legal(Move::new(source, destination)))
        })
    }

    /// Returns whether the side to move has no legal moves. This does not distinguish checkmate
    /// from stalemate; see `is_checkmate` and `is_stalemate`.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.side_to_move) && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.side_to_move) && !self.has_legal_moves()
    }

    fn generate_legal_moves_from(&self, source: Square, moves: &mut MoveVec) {
        let piece = match self.board.piece_at(source) {
            Some(piece) if piece.color == self.side_to_move => piece,
            _ => return,
        };

        for destination in Square::all() {
            let mov = Move::new(source, destination);
            if !self.is_legal(mov) {
                continue;
            }

            if piece.kind == PieceKind::Pawn && destination.rank().is_back_rank() {
                for &kind in &PROMOTION_ORDER {
                    moves.push(Move::promotion(source, destination, kind));
                }
            } else {
                moves.push(mov);
            }
        }
    }
}
