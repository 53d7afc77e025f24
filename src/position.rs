// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::board::Board;
use crate::moves::Move;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square, FILES};

/// Possible errors that can arise when applying a move to a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move {0}")]
    Illegal(Move),
    #[error("pawn move {0} reaches the last rank without a promotion piece")]
    MissingPromotion(Move),
    #[error("pawn move {0} promotes to an invalid piece")]
    InvalidPromotion(Move),
    #[error("no piece on source square {0}")]
    NoPieceAtSource(Square),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_clock: u32,
    pub(crate) side_to_move: Color,
    pub(crate) castle_status: CastleStatus,
}

//
// Board state getters
//

impl Position {
    /// An empty board with White to move and no castling rights.
    pub fn new() -> Position {
        Position {
            board: Board::empty(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            side_to_move: Color::White,
            castle_status: CastleStatus::empty(),
        }
    }

    pub fn from_start_position() -> Position {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pos = Position::new();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            for &color in &[Color::White, Color::Black] {
                let pawn_square = Square::of(color.pawn_rank(), file);
                pos.board.set(pawn_square, Piece::new(PieceKind::Pawn, color));
                pos.board
                    .set(Square::of(color.back_rank(), file), Piece::new(kind, color));
            }
        }

        pos.castle_status = CastleStatus::all();
        pos
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(kingside_castle_mask(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(queenside_castle_mask(color))
    }
}

//
// Move application
//

impl Position {
    /// Applies a move to this position if it is legal. On error the position is left exactly
    /// as it was.
    pub fn apply_move(&mut self, mov: Move) -> Result<(), MoveError> {
        if !self.is_legal(mov) || !self.promotion_is_expected(mov) {
            debug!("rejecting illegal move {} in {}", mov, self.as_fen());
            return Err(MoveError::Illegal(mov));
        }

        let mut next = self.clone();
        next.apply_move_unchecked(mov)?;
        *self = next;
        Ok(())
    }

    /// A promotion piece may only accompany a pawn move onto the last rank.
    fn promotion_is_expected(&self, mov: Move) -> bool {
        if !mov.is_promotion() {
            return true;
        }

        let is_pawn = self
            .board
            .piece_at(mov.source())
            .map_or(false, |piece| piece.kind == PieceKind::Pawn);
        is_pawn && mov.destination().rank().is_back_rank()
    }

    /// Applies a move without checking that it is legal. The move is assumed to be at least
    /// pseudo-legal; this is the primitive that legality probing and perft build upon, always
    /// against a clone of the authoritative position.
    ///
    /// Errors are raised before any state is modified.
    pub fn apply_move_unchecked(&mut self, mov: Move) -> Result<(), MoveError> {
        let source = mov.source();
        let destination = mov.destination();
        let mut moving_piece = self
            .board
            .piece_at(source)
            .ok_or(MoveError::NoPieceAtSource(source))?;

        let (dfile, drank) = mov.deltas();
        let is_pawn_move = moving_piece.kind == PieceKind::Pawn;
        let mut is_capture = self.board.is_occupied(destination);
        let mut new_en_passant = None;
        match moving_piece.kind {
            PieceKind::Pawn => {
                if destination.rank().is_back_rank() {
                    let kind = mov
                        .promotion_piece()
                        .ok_or(MoveError::MissingPromotion(mov))?;
                    if !kind.is_promotion_target() {
                        return Err(MoveError::InvalidPromotion(mov));
                    }

                    moving_piece.kind = kind;
                }

                if drank.abs() == 2 {
                    // The skipped square is capturable on the very next move only.
                    new_en_passant = source.offset(0, drank / 2);
                } else if dfile != 0 && Some(destination) == self.en_passant_square {
                    // The captured pawn sits beside the source, not on the destination.
                    let captured = Square::of(source.rank(), destination.file());
                    self.board.take(captured);
                    is_capture = true;
                }
            }
            PieceKind::King => {
                if dfile.abs() == 2 {
                    let (rook_file, rook_dir) = if dfile > 0 {
                        (File::H, 1)
                    } else {
                        (File::A, -1)
                    };
                    let rook_square = Square::of(source.rank(), rook_file);
                    if let (Some(rook), Some(rook_target)) =
                        (self.board.take(rook_square), source.offset(rook_dir, 0))
                    {
                        self.board.set(rook_target, rook);
                    }
                }

                self.castle_status &= !castle_mask(moving_piece.color);
            }
            PieceKind::Rook => {
                if source == kingside_rook(moving_piece.color) {
                    self.castle_status &= !kingside_castle_mask(moving_piece.color);
                } else if source == queenside_rook(moving_piece.color) {
                    self.castle_status &= !queenside_castle_mask(moving_piece.color);
                }
            }
            _ => {}
        }

        // Landing on a corner also covers capturing a rook that never moved.
        self.castle_status &= !corner_castle_mask(destination);
        self.en_passant_square = new_en_passant;

        self.board.take(source);
        self.board.set(destination, moving_piece);

        if is_capture || is_pawn_move {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.side_to_move == Color::Black {
            self.fullmove_clock += 1;
        }

        self.side_to_move = self.side_to_move.toggle();
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

//
// Helper functions
//

pub(crate) fn king_start(color: Color) -> Square {
    Square::of(color.back_rank(), File::E)
}

pub(crate) fn kingside_rook(color: Color) -> Square {
    Square::of(color.back_rank(), File::H)
}

pub(crate) fn queenside_rook(color: Color) -> Square {
    Square::of(color.back_rank(), File::A)
}

pub(crate) fn kingside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_KINGSIDE,
        Color::Black => CastleStatus::BLACK_KINGSIDE,
    }
}

pub(crate) fn queenside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_QUEENSIDE,
        Color::Black => CastleStatus::BLACK_QUEENSIDE,
    }
}

fn castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE,
        Color::Black => CastleStatus::BLACK,
    }
}

fn corner_castle_mask(square: Square) -> CastleStatus {
    match (square.file(), square.rank()) {
        (File::H, Rank::One) => CastleStatus::WHITE_KINGSIDE,
        (File::A, Rank::One) => CastleStatus::WHITE_QUEENSIDE,
        (File::H, Rank::Eight) => CastleStatus::BLACK_KINGSIDE,
        (File::A, Rank::Eight) => CastleStatus::BLACK_QUEENSIDE,
        _ => CastleStatus::empty(),
    }
}
