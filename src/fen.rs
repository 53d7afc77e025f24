// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//
// FEN parsing and generation.
//
// FEN is a six-field notation for chess positions: piece placement, side to move, castling
// rights, en-passant square, halfmove clock and fullmove number, separated by whitespace.
// Positions can be created by parsing FEN and FEN can be produced from any position.
//

use std::convert::TryFrom;
use std::str::FromStr;

use thiserror::Error;

use crate::position::Position;
use crate::types::{CastleStatus, Color, Piece, Rank, Square, FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("invalid empty square count `{0}`")]
    InvalidDigit(char),
    #[error("rank {0} does not sum to eight files")]
    FileDoesNotSumToEight(Rank),
    #[error("unknown piece `{0}`")]
    UnknownPiece(char),
    #[error("side to move must be `w` or `b`")]
    InvalidSideToMove,
    #[error("invalid en-passant square")]
    InvalidEnPassant,
    #[error("invalid halfmove clock")]
    InvalidHalfmove,
    #[error("invalid fullmove number")]
    InvalidFullmove,
}

impl Position {
    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        let fields: Vec<&str> = fen.as_ref().split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenParseError::FieldCount(fields.len()));
        }

        let mut pos = Position::new();
        eat_placement(&mut pos, fields[0])?;
        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenParseError::InvalidSideToMove),
        };
        pos.castle_status = eat_castle_status(fields[2]);
        pos.en_passant_square = match fields[3] {
            "-" => None,
            square => Some(
                square
                    .parse::<Square>()
                    .map_err(|_| FenParseError::InvalidEnPassant)?,
            ),
        };
        pos.halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidHalfmove)?;
        pos.fullmove_clock = fields[5]
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidFullmove)?;
        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.side_to_move().to_string());
        buf.push(' ');
        if self.castle_status.is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');
        match self.en_passant_square() {
            Some(ep_square) => buf.push_str(&ep_square.to_string()),
            None => buf.push('-'),
        }
        buf.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_clock()
        ));
        buf
    }
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Position, FenParseError> {
        Position::from_fen(s)
    }
}

fn eat_placement(pos: &mut Position, placement: &str) -> Result<(), FenParseError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenParseError::RankCount(rows.len()));
    }

    // Placement lists the eighth rank first.
    for (&rank, row) in RANKS.iter().rev().zip(rows) {
        let mut file = 0;
        for c in row.chars() {
            // digits 1 through 8 indicate empty squares.
            if let Some(value) = c.to_digit(10) {
                if value == 0 || value > 8 {
                    return Err(FenParseError::InvalidDigit(c));
                }

                file += value as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight(rank));
                }

                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            if file >= 8 {
                return Err(FenParseError::FileDoesNotSumToEight(rank));
            }

            pos.board.set(Square::of(rank, FILES[file]), piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenParseError::FileDoesNotSumToEight(rank));
        }
    }

    Ok(())
}

/// Each of `K`, `Q`, `k` and `q` independently grants a right; `-` or none of them grants none.
fn eat_castle_status(field: &str) -> CastleStatus {
    let mut status = CastleStatus::empty();
    for c in field.chars() {
        match c {
            'K' => status |= CastleStatus::WHITE_KINGSIDE,
            'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
            'k' => status |= CastleStatus::BLACK_KINGSIDE,
            'q' => status |= CastleStatus::BLACK_QUEENSIDE,
            _ => {}
        }
    }

    status
}

#[cfg(test)]
mod tests {
    use crate::position::Position;
    use crate::types::{Color, File, Piece, PieceKind, Rank, Square, FILES};

    use super::FenParseError;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn fen_smoke() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();

        // white's turn to move.
        assert_eq!(Color::White, pos.side_to_move());

        // no castling.
        assert!(!pos.can_castle_kingside(Color::White));
        assert!(!pos.can_castle_kingside(Color::Black));
        assert!(!pos.can_castle_queenside(Color::White));
        assert!(!pos.can_castle_queenside(Color::Black));

        // no en passant.
        assert!(pos.en_passant_square().is_none());

        assert_eq!(0, pos.halfmove_clock());
        assert_eq!(1, pos.fullmove_clock());
    }

    #[test]
    fn starting_position() {
        let pos = Position::from_fen(START).unwrap();
        assert_eq!(Position::from_start_position(), pos);

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (&file, &kind) in FILES.iter().zip(back_rank.iter()) {
            assert_eq!(
                Some(Piece::new(kind, Color::White)),
                pos.piece_at(Square::of(Rank::One, file))
            );
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
                pos.piece_at(Square::of(Rank::Seven, file))
            );
            assert_eq!(None, pos.piece_at(Square::of(Rank::Four, file)));
        }

        assert!(pos.can_castle_kingside(Color::White));
        assert!(pos.can_castle_kingside(Color::Black));
        assert!(pos.can_castle_queenside(Color::White));
        assert!(pos.can_castle_queenside(Color::Black));
    }

    #[test]
    fn round_trip() {
        for fen in &[
            START,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k3/8/8/8/8/8/8/4K2R b Kq - 17 42",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(*fen, pos.as_fen());
        }
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let pos = Position::from_fen("  8/8/8/8/8/8/8/K6k   b  -  -  3  9 ").unwrap();
        assert_eq!("8/8/8/8/8/8/8/K6k b - - 3 9", pos.as_fen());
    }

    #[test]
    fn castle_letters_in_any_order() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w qkQK - 0 1").unwrap();
        assert!(pos.can_castle_kingside(Color::White));
        assert!(pos.can_castle_queenside(Color::Black));
        assert_eq!(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            pos.as_fen()
        );
    }

    #[test]
    fn en_passant_square() {
        let pos = Position::from_fen("8/8/8/3pP3/8/8/8/8 w - d6 0 1").unwrap();
        assert_eq!(
            Some(Square::of(Rank::Six, File::D)),
            pos.en_passant_square()
        );
    }

    #[test]
    fn empty() {
        let err = Position::from_fen("").unwrap_err();
        assert_eq!(FenParseError::FieldCount(0), err);
    }

    #[test]
    fn too_many_fields() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1 1").unwrap_err();
        assert_eq!(FenParseError::FieldCount(7), err);
    }

    #[test]
    fn fullmove_early_end() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0").unwrap_err();
        assert_eq!(FenParseError::FieldCount(5), err);
    }

    #[test]
    fn too_few_ranks() {
        let err = Position::from_fen("8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::RankCount(7), err);
    }

    #[test]
    fn unknown_piece() {
        let err = Position::from_fen("z7/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::UnknownPiece('z'), err);
    }

    #[test]
    fn invalid_digit() {
        let err = Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidDigit('9'), err);

        let err = Position::from_fen("08/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidDigit('0'), err);
    }

    #[test]
    fn not_sum_to_8() {
        let err = Position::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::FileDoesNotSumToEight(Rank::Eight), err);

        let err = Position::from_fen("8/8/8/8/8/8/8/7 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::FileDoesNotSumToEight(Rank::One), err);

        let err = Position::from_fen("8/8/8/8/8/8/8/8p w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::FileDoesNotSumToEight(Rank::One), err);
    }

    #[test]
    fn bad_side_to_move() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 c - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidSideToMove, err);

        let err = Position::from_fen("8/8/8/8/8/8/8/8 W - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidSideToMove, err);
    }

    #[test]
    fn bad_en_passant() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - 88 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidEnPassant, err);
    }

    #[test]
    fn invalid_halfmove() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - q 1").unwrap_err();
        assert_eq!(FenParseError::InvalidHalfmove, err);

        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - -1 1").unwrap_err();
        assert_eq!(FenParseError::InvalidHalfmove, err);
    }

    #[test]
    fn invalid_fullmove() {
        let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 4294967296").unwrap_err();
        assert_eq!(FenParseError::InvalidFullmove, err);
    }
}
