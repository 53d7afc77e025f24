// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{PieceKind, Square};

/// Possible errors that can arise when parsing move text into a `Move`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move text must be 4 or 5 characters, got {0}")]
    InvalidLength(usize),
    #[error("invalid square in move text `{0}`")]
    InvalidSquare(String),
    #[error("invalid promotion piece `{0}`")]
    InvalidPromotion(char),
}

/// A move from one square to another. Moves carry no knowledge of the position they are played
/// in; castling is a king moving two files and en-passant is a pawn moving diagonally onto the
/// en-passant square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn promotion(source: Square, destination: Square, kind: PieceKind) -> Move {
        Move {
            source,
            destination,
            promotion: Some(kind),
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    pub(crate) fn with_promotion(self, kind: PieceKind) -> Move {
        Move {
            promotion: Some(kind),
            ..self
        }
    }

    /// File and rank distance travelled by this move.
    pub(crate) fn deltas(self) -> (i32, i32) {
        (
            self.destination.file() as i32 - self.source.file() as i32,
            self.destination.rank() as i32 - self.source.rank() as i32,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

/// Parses a move from its source square, destination square and an optional lowercase promotion
/// letter, e.g. `e2e4` or `e7e8q`.
impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(MoveParseError::InvalidLength(chars.len()));
        }

        let square = |text: &[char]| {
            let text: String = text.iter().collect();
            text.parse::<Square>()
                .map_err(|_| MoveParseError::InvalidSquare(text))
        };

        let source = square(&chars[0..2])?;
        let destination = square(&chars[2..4])?;
        let promotion = match chars.get(4).copied() {
            None => None,
            Some('q') => Some(PieceKind::Queen),
            Some('r') => Some(PieceKind::Rook),
            Some('b') => Some(PieceKind::Bishop),
            Some('n') => Some(PieceKind::Knight),
            Some(c) => return Err(MoveParseError::InvalidPromotion(c)),
        };

        Ok(Move {
            source,
            destination,
            promotion,
        })
    }
}
