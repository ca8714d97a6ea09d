use std::fmt;
use std::str::FromStr;

use crate::masks::SQUARE_BIT;

/// A square of the 8×8 board, A1 to H8.
///
/// Squares are numbered row-major from the top-left corner, which is also the
/// bit index of the square in a grid pattern:
///
/// ```text
///   A  B  C  D  E  F  G  H
/// 1 00 01 02 03 04 05 06 07
/// 2 08 09 10 11 12 13 14 15
/// 3 16 17 18 19 20 21 22 23
/// 4 24 25 26 27 28 29 30 31
/// 5 32 33 34 35 36 37 38 39
/// 6 40 41 42 43 44 45 46 47
/// 7 48 49 50 51 52 53 54 55
/// 8 56 57 58 59 60 61 62 63
/// ```
///
/// `None` marks the absence of a square and must never be passed to the flip
/// functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
    None,
}

pub const BOARD_SIZE: usize = 8;
pub const TOTAL_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

impl Square {
    /// Returns the grid pattern with only this square set.
    #[inline]
    pub fn bitboard(self) -> u64 {
        debug_assert!(
            self != Square::None,
            "Square::bitboard called on Square::None"
        );
        *crate::uget!(SQUARE_BIT; self.index())
    }

    /// Returns the index of the square (0-63, or 64 for `None`).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts an index into a `Square` without bounds checking.
    ///
    /// # Arguments
    ///
    /// * `index` - The square index (0-63, or 64 for `None`).
    #[inline]
    pub fn from_u32_unchecked(index: u32) -> Square {
        debug_assert!(
            index <= 64,
            "Index out of bounds for Square enum. index: {index:?}"
        );
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Converts an index into a `Square`.
    ///
    /// # Returns
    ///
    /// `Some(Square)` for 0-64, `None` otherwise.
    #[inline]
    pub fn from_u32(index: u32) -> Option<Square> {
        if index <= 64 {
            Some(Square::from_u32_unchecked(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn from_usize_unchecked(index: usize) -> Square {
        Square::from_u32_unchecked(index as u32)
    }

    #[inline]
    pub fn from_usize(index: usize) -> Option<Square> {
        u32::try_from(index).ok().and_then(Square::from_u32)
    }

    /// Column of the square, 0 for the A file.
    #[inline]
    pub fn file(self) -> usize {
        assert!(self != Square::None, "Square::file called on Square::None");
        self.index() % BOARD_SIZE
    }

    /// Row of the square, 0 for the first rank.
    #[inline]
    pub fn rank(self) -> usize {
        assert!(self != Square::None, "Square::rank called on Square::None");
        self.index() / BOARD_SIZE
    }

    pub fn from_file_rank(file: u8, rank: u8) -> Square {
        assert!(file < BOARD_SIZE as u8, "Invalid file: {file}");
        assert!(rank < BOARD_SIZE as u8, "Invalid rank: {rank}");
        Self::from_usize_unchecked(rank as usize * BOARD_SIZE + file as usize)
    }

    /// Iterates over the 64 board squares in index order.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..TOTAL_SQUARES as u32).map(Square::from_u32_unchecked)
    }
}

// Square::None is the natural default, not A1
#[allow(clippy::derivable_impls)]
impl Default for Square {
    fn default() -> Self {
        Square::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("Invalid square format: must be 2 characters (e.g., 'a1')")]
    InvalidFormat,
    #[error("Invalid file '{0}': must be a-h or A-H")]
    InvalidFile(char),
    #[error("Invalid rank '{0}': must be 1-8")]
    InvalidRank(char),
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidFormat);
        };

        let file = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        Ok(Square::from_file_rank(
            file as u8 - b'a',
            rank_char as u8 - b'1',
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Square::None {
            return write!(f, "None");
        }

        let file = (self.file() as u8 + b'a') as char;
        let rank = (self.rank() as u8 + b'1') as char;
        write!(f, "{file}{rank}")
    }
}
