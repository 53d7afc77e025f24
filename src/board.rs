// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::types::{Color, Piece, PieceKind, Square};

/// An 8x8 grid of optional pieces, indexed by rank and then by file. Pieces are stored by value,
/// so copying a board never shares state with its source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Places a piece on the given square, returning whatever occupied it before.
    pub fn set(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize].replace(piece)
    }

    /// Removes and returns the piece on the given square, if any.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize].take()
    }

    /// All pieces belonging to `color`, in board scan order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|&(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::types::{Color, File, Piece, PieceKind, Rank, Square};

    #[test]
    fn set_and_take() {
        let mut board = Board::empty();
        let e4 = Square::of(Rank::Four, File::E);
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(None, board.set(e4, knight));
        assert_eq!(Some(knight), board.piece_at(e4));

        let bishop = Piece::new(PieceKind::Bishop, Color::Black);
        assert_eq!(Some(knight), board.set(e4, bishop));
        assert_eq!(Some(bishop), board.take(e4));
        assert!(!board.is_occupied(e4));
    }

    #[test]
    fn copies_are_independent() {
        let mut board = Board::empty();
        let a1 = Square::of(Rank::One, File::A);
        board.set(a1, Piece::new(PieceKind::Rook, Color::White));

        let mut copy = board;
        copy.take(a1);
        assert!(board.is_occupied(a1));
        assert!(!copy.is_occupied(a1));
    }

    #[test]
    fn finds_king() {
        let mut board = Board::empty();
        let g8 = Square::of(Rank::Eight, File::G);
        board.set(g8, Piece::new(PieceKind::King, Color::Black));
        assert_eq!(Some(g8), board.king(Color::Black));
        assert_eq!(None, board.king(Color::White));
    }
}
