// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//
// Pseudo-legal move validation.
//
// A move is pseudo-legal if it follows the movement rules of the piece being moved, without
// regard to whether it leaves the mover's own king attacked. Castling is the exception: its
// safety conditions (not out of check, not through check) are part of the movement rule.
//

use crate::moves::Move;
use crate::position::{
    king_start, kingside_castle_mask, kingside_rook, queenside_castle_mask, queenside_rook,
    Position,
};
use crate::types::{Color, Piece, PieceKind};

impl Position {
    /// Returns whether the move is pseudo-legal for the side to move.
    pub fn is_pseudo_legal(&self, mov: Move) -> bool {
        self.is_pseudo_legal_for(self.side_to_move, mov)
    }

    /// Pseudo-legality with `side` treated as the side to move. Attack detection uses this to ask
    /// whether the side *not* to move could capture on a given square.
    pub(crate) fn is_pseudo_legal_for(&self, side: Color, mov: Move) -> bool {
        let piece = match self.board.piece_at(mov.source()) {
            Some(piece) if piece.color == side => piece,
            _ => return false,
        };

        if let Some(target) = self.board.piece_at(mov.destination()) {
            if target.color == side {
                return false;
            }
        }

        match piece.kind {
            PieceKind::Pawn => self.is_valid_pawn_move(piece.color, mov),
            PieceKind::Knight => {
                let (dfile, drank) = mov.deltas();
                dfile * dfile + drank * drank == 5
            }
            PieceKind::Bishop => is_diagonal(mov) && self.is_path_clear(mov),
            PieceKind::Rook => is_straight(mov) && self.is_path_clear(mov),
            PieceKind::Queen => (is_diagonal(mov) || is_straight(mov)) && self.is_path_clear(mov),
            PieceKind::King => self.is_valid_king_move(piece.color, mov),
        }
    }

    fn is_valid_pawn_move(&self, color: Color, mov: Move) -> bool {
        let dir = color.pawn_direction();
        let (dfile, drank) = mov.deltas();
        let destination_empty = !self.board.is_occupied(mov.destination());
        if dfile == 0 {
            if drank == dir {
                return destination_empty;
            }

            if drank == 2 * dir && mov.source().rank() == color.pawn_rank() {
                return destination_empty && self.is_path_clear(mov);
            }

            return false;
        }

        if dfile.abs() == 1 && drank == dir {
            return !destination_empty || self.en_passant_square == Some(mov.destination());
        }

        false
    }

    fn is_valid_king_move(&self, color: Color, mov: Move) -> bool {
        let (dfile, drank) = mov.deltas();
        if dfile.abs() == 2 && drank == 0 {
            return self.is_valid_castle(color, mov);
        }

        dfile * dfile + drank * drank <= 2
    }

    fn is_valid_castle(&self, color: Color, mov: Move) -> bool {
        let (dfile, _) = mov.deltas();
        let (mask, rook_square) = if dfile > 0 {
            (kingside_castle_mask(color), kingside_rook(color))
        } else {
            (queenside_castle_mask(color), queenside_rook(color))
        };

        if !self.castle_status.contains(mask) || mov.source() != king_start(color) {
            return false;
        }

        if self.board.piece_at(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
            return false;
        }

        if !self.is_path_clear(Move::new(mov.source(), rook_square)) {
            return false;
        }

        // can't castle out of check.
        if self.is_king_attacked(color) {
            return false;
        }

        // can't castle through check.
        let gap = match mov.source().offset(dfile / 2, 0) {
            Some(gap) => gap,
            None => return false,
        };
        let mut probe = self.clone();
        if probe.apply_move_unchecked(Move::new(mov.source(), gap)).is_err() {
            return false;
        }

        !probe.is_king_attacked(color)
    }

    /// Returns whether every square strictly between the source and destination of the move is
    /// empty, walking one step at a time along the move's direction.
    pub(crate) fn is_path_clear(&self, mov: Move) -> bool {
        let (dfile, drank) = mov.deltas();
        let (step_file, step_rank) = (dfile.signum(), drank.signum());
        let mut current = mov.source().offset(step_file, step_rank);
        while let Some(square) = current {
            if square == mov.destination() {
                break;
            }

            if self.board.is_occupied(square) {
                return false;
            }

            current = square.offset(step_file, step_rank);
        }

        true
    }
}

fn is_straight(mov: Move) -> bool {
    let (dfile, drank) = mov.deltas();
    (dfile == 0) != (drank == 0)
}

fn is_diagonal(mov: Move) -> bool {
    let (dfile, drank) = mov.deltas();
    dfile.abs() == drank.abs() && dfile != 0
}
