// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Chess rules: board positions, legal move generation, move application (castling, en-passant
//! and promotion included), check detection and FEN.
//!
//! ```
//! use chessrules::{Move, Position};
//!
//! let mut pos = Position::from_start_position();
//! assert_eq!(20, pos.legal_moves().len());
//!
//! pos.apply_move("e2e4".parse::<Move>().unwrap()).unwrap();
//! assert_eq!(
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
//!     pos.as_fen()
//! );
//! ```

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

mod attacks;
mod board;
mod fen;
mod move_generator;
mod moves;
mod perft;
mod position;
mod types;
mod validate;

pub use board::Board;
pub use fen::FenParseError;
pub use move_generator::MoveVec;
pub use moves::{Move, MoveParseError};
pub use perft::{perft, perft_divide};
pub use position::{MoveError, Position};
pub use types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square, SquareParseError};
pub use types::{FILES, RANKS};
