// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use thiserror::Error;

/// Error produced when square text is not a file letter `a`-`h` followed by a rank digit `1`-`8`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid square `{0}`")]
pub struct SquareParseError(pub String);

/// A square on the board, identified by its file and rank. Squares can only be constructed
/// in bounds; coordinate arithmetic that would leave the board yields `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        Square { file, rank }
    }

    /// Returns whether the given zero-based file and rank coordinates lie on the board.
    pub fn in_bounds(file: i32, rank: i32) -> bool {
        (0..8).contains(&file) && (0..8).contains(&rank)
    }

    pub fn from_coords(file: i32, rank: i32) -> Option<Square> {
        if !Square::in_bounds(file, rank) {
            return None;
        }

        Some(Square::of(Rank::from_i32(rank)?, File::from_i32(file)?))
    }

    pub fn rank(self) -> Rank {
        self.rank
    }

    pub fn file(self) -> File {
        self.file
    }

    /// The square `dfile` files and `drank` ranks away from this one, if it is on the board.
    pub fn offset(self, dfile: i32, drank: i32) -> Option<Square> {
        Square::from_coords(self.file as i32 + dfile, self.rank as i32 + drank)
    }

    /// Iterates over every square in board scan order: the eighth rank first, then down to the
    /// first, and from the a-file to the h-file within each rank.
    pub fn all() -> impl Iterator<Item = Square> {
        RANKS
            .iter()
            .rev()
            .flat_map(|&rank| FILES.iter().map(move |&file| Square::of(rank, file)))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Square, SquareParseError> {
        let err = || SquareParseError(s.to_owned());
        let mut chars = s.chars();
        let file = chars.next().and_then(|c| File::try_from(c).ok()).ok_or_else(err)?;
        let rank = chars.next().and_then(|c| Rank::try_from(c).ok()).ok_or_else(err)?;
        if chars.next().is_some() {
            return Err(err());
        }

        Ok(Square::of(rank, file))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    /// The first and eighth ranks, where pawns promote.
    pub fn is_back_rank(self) -> bool {
        self == Rank::One || self == Rank::Eight
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'1' + *self as u8) as char)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Rank::from_u32(value as u32 - '1' as u32).ok_or(()),
            _ => Err(()),
        }
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a'..='h' => File::from_u32(value as u32 - 'a' as u32).ok_or(()),
            _ => Err(()),
        }
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step for this color.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank this color's pawns start on, and may double step from.
    pub fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::Two,
            Color::Black => Rank::Seven,
        }
    }

    pub fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::One,
            Color::Black => Rank::Eight,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Whether a pawn may promote to this kind of piece.
    pub fn is_promotion_target(self) -> bool {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            PieceKind::Pawn | PieceKind::King => false,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(kind)
    }
}

bitflags! {
    pub struct CastleStatus: u8 {
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

/// Uppercase letters are White pieces, lowercase letters are Black pieces.
impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = self.kind.to_string();
        match self.color {
            Color::White => f.write_str(&letter.to_ascii_uppercase()),
            Color::Black => f.write_str(&letter),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::{Color, File, Piece, PieceKind, Rank, Square};

    #[test]
    fn bounds() {
        assert!(Square::in_bounds(0, 0));
        assert!(Square::in_bounds(7, 7));
        assert!(!Square::in_bounds(8, 0));
        assert!(!Square::in_bounds(0, -1));
        assert_eq!(None, Square::from_coords(-1, 3));
    }

    #[test]
    fn offset_off_the_board() {
        let h8 = Square::of(Rank::Eight, File::H);
        assert_eq!(None, h8.offset(1, 0));
        assert_eq!(None, h8.offset(0, 1));
        assert_eq!(Some(Square::of(Rank::Seven, File::G)), h8.offset(-1, -1));
    }

    #[test]
    fn square_text() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(Square::of(Rank::Four, File::E), sq);
        assert_eq!("e4", sq.to_string());

        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a1a".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn scan_order() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(64, squares.len());
        assert_eq!("a8", squares[0].to_string());
        assert_eq!("h8", squares[7].to_string());
        assert_eq!("a7", squares[8].to_string());
        assert_eq!("h1", squares[63].to_string());
    }

    #[test]
    fn piece_letters() {
        assert_eq!(
            Ok(Piece::new(PieceKind::Knight, Color::White)),
            Piece::try_from('N')
        );
        assert_eq!(
            Ok(Piece::new(PieceKind::Queen, Color::Black)),
            Piece::try_from('q')
        );
        assert_eq!(Err(()), Piece::try_from('x'));
        assert_eq!("K", Piece::new(PieceKind::King, Color::White).to_string());
        assert_eq!("p", Piece::new(PieceKind::Pawn, Color::Black).to_string());
    }

    #[test]
    fn piece_letters_follow_kind_letters() {
        for &c in &['p', 'n', 'b', 'r', 'q', 'k'] {
            let kind = PieceKind::try_from(c).unwrap();
            assert_eq!(c.to_string(), kind.to_string());
            assert_eq!(c.to_string(), Piece::new(kind, Color::Black).to_string());
            assert_eq!(
                c.to_ascii_uppercase().to_string(),
                Piece::new(kind, Color::White).to_string()
            );

            let white = Piece::new(kind, Color::White);
            assert_eq!(Ok(white), Piece::try_from(c.to_ascii_uppercase()));
        }
    }
}
