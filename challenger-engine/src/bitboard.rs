//! Sets of squares packed into a single 64-bit unsigned integer.
//!
//! Data Order:
//! * Little-Endian Rank-File mapping (LSR)
//! * A1 = least significant bit = 0
//! * H1 = 7, A2 = 8
//! * H8 = most significant bit = 63
//!
//! Compass Rose Bit Shifting:
//! ```text
//! NoWe       North       NoEa
//!      +7     +8      +9
//! West -1      0      +1 East
//!      -9     -8      -7
//! SoWe       South       SoEa
//! ```

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

use crate::coretypes::{Color, File, Rank, Square, Square::*, SquareIndexable, NUM_FILES};

/// Alias for inner type of Bitboard. Useful for const evaluation.
pub type BitboardKind = u64;

/// Bitboard wraps a u64, where each set bit marks its chess board square as a member of the set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) BitboardKind);

// Bit-or together the shifted representation of each square identifier.
// example: bb_from_shifts!(A1, A2) ->
//          Bitboard(0u64 | (1u64 << A1 as u8) | (1u64 << A2 as u8))
macro_rules! bb_from_shifts {
    ($($shiftable:ident),+) => {
        Bitboard(0u64 $( | (1u64 << $shiftable as u8))*)
    };
}

/// Bitboard Constants
impl Bitboard {
    pub const EMPTY: Bitboard = Self(0x0);
    pub const FULL: Bitboard = Self(!0x0);
    pub const DARK_SQUARES: Bitboard = Self(0xAA55AA55AA55AA55);
    pub const LIGHT_SQUARES: Bitboard = Self(!Self::DARK_SQUARES.0);

    pub const RANK_1: Bitboard = Self(0x00000000000000FF);
    pub const RANK_2: Bitboard = Self(Self::RANK_1.0 << 8);
    pub const RANK_7: Bitboard = Self(Self::RANK_1.0 << 48);
    pub const RANK_8: Bitboard = Self(Self::RANK_1.0 << 56);
    pub const FILE_A: Bitboard = Self(0x0101010101010101);
    pub const FILE_H: Bitboard = Self(Self::FILE_A.0 << 7);

    // Squares between king and rook which must be empty to castle.
    pub const W_KINGSIDE_BETWEEN: Bitboard = bb_from_shifts!(F1, G1);
    pub const W_QUEENSIDE_BETWEEN: Bitboard = bb_from_shifts!(B1, C1, D1);
    pub const B_KINGSIDE_BETWEEN: Bitboard = bb_from_shifts!(F8, G8);
    pub const B_QUEENSIDE_BETWEEN: Bitboard = bb_from_shifts!(B8, C8, D8);
    // Squares the king crosses or lands on while castling, which must not be attacked.
    pub const W_KINGSIDE_PASS: Bitboard = bb_from_shifts!(F1, G1);
    pub const W_QUEENSIDE_PASS: Bitboard = bb_from_shifts!(C1, D1);
    pub const B_KINGSIDE_PASS: Bitboard = bb_from_shifts!(F8, G8);
    pub const B_QUEENSIDE_PASS: Bitboard = bb_from_shifts!(C8, D8);

    /// Rank a color's pawns start on, from which they may double push.
    pub const fn pawn_start_rank(color: Color) -> Bitboard {
        match color {
            Color::White => Self::RANK_2,
            Color::Black => Self::RANK_7,
        }
    }

    /// Rank on which a color's pawns promote.
    pub const fn promotion_rank(color: Color) -> Bitboard {
        match color {
            Color::White => Self::RANK_8,
            Color::Black => Self::RANK_1,
        }
    }
}

impl Bitboard {
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns number of squares in bitboard, from 0 to 64 inclusive.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub fn has_square<I: SquareIndexable>(&self, idx: I) -> bool {
        self.0 & idx.shift() != 0
    }

    #[inline(always)]
    pub fn set_square<I: SquareIndexable>(&mut self, idx: I) {
        self.0 |= idx.shift();
    }

    #[inline(always)]
    pub fn clear_square<I: SquareIndexable>(&mut self, idx: I) {
        self.0 &= !idx.shift();
    }

    /// Clears the lowest square from self. If there are no squares, does nothing.
    #[inline(always)]
    pub fn clear_lowest_square(&mut self) {
        self.0 &= self.0.wrapping_sub(1);
    }

    /// Returns the lowest square in bitboard, or None if bitboard has no squares.
    #[inline(always)]
    pub const fn get_lowest_square(&self) -> Option<Square> {
        Square::from_u8(self.0.trailing_zeros() as u8)
    }

    /// Returns true if self has any squares that are in other.
    #[inline(always)]
    pub const fn has_any(&self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn to_north(&self) -> Self {
        Self(self.0 << 8)
    }
    #[inline(always)]
    pub const fn to_south(&self) -> Self {
        Self(self.0 >> 8)
    }
    /// Bits that would wrap onto the next rank are dropped.
    #[inline(always)]
    pub const fn to_east(&self) -> Self {
        Self((self.0 << 1) & !Self::FILE_A.0)
    }
    #[inline(always)]
    pub const fn to_west(&self) -> Self {
        Self((self.0 >> 1) & !Self::FILE_H.0)
    }
    #[inline(always)]
    pub const fn to_north_east(&self) -> Self {
        Self((self.0 << 9) & !Self::FILE_A.0)
    }
    #[inline(always)]
    pub const fn to_north_west(&self) -> Self {
        Self((self.0 << 7) & !Self::FILE_H.0)
    }
    #[inline(always)]
    pub const fn to_south_east(&self) -> Self {
        Self((self.0 >> 7) & !Self::FILE_A.0)
    }
    #[inline(always)]
    pub const fn to_south_west(&self) -> Self {
        Self((self.0 >> 9) & !Self::FILE_H.0)
    }

    /// Shift one square toward the opponent of `color`, the direction its pawns push.
    #[inline(always)]
    pub const fn to_forward(&self, color: Color) -> Self {
        match color {
            Color::White => self.to_north(),
            Color::Black => self.to_south(),
        }
    }

    /// Mirror every square across the horizontal center line, A1 <-> A8.
    #[inline(always)]
    pub const fn flip_ranks(&self) -> Self {
        Self(self.0.swap_bytes())
    }
}

impl Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl<I: SquareIndexable> From<I> for Bitboard {
    fn from(square_index: I) -> Self {
        Self(square_index.shift())
    }
}

impl From<File> for Bitboard {
    fn from(file: File) -> Self {
        Self(Self::FILE_A.0 << file as u8)
    }
}

impl From<Rank> for Bitboard {
    fn from(rank: Rank) -> Self {
        Self(Self::RANK_1.0 << (8 * rank as u8))
    }
}

/// Yields each square in a bitboard from lowest to highest.
pub struct BitboardSquareIterator {
    bb: Bitboard,
}

impl Iterator for BitboardSquareIterator {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let maybe_square = self.bb.get_lowest_square();
        self.bb.clear_lowest_square();
        maybe_square
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bb.len();
        (size, Some(size))
    }
}
impl ExactSizeIterator for BitboardSquareIterator {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardSquareIterator;
    fn into_iter(self) -> Self::IntoIter {
        BitboardSquareIterator { bb: self }
    }
}

/// Prints rank 8 first, with '1' for members and '.' otherwise.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let row: String = File::ALL
                .into_iter()
                .map(|file| match self.has_square((file, rank)) {
                    true => '1',
                    false => '.',
                })
                .collect();
            debug_assert_eq!(row.len(), NUM_FILES);
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_file_masks() {
        assert_eq!(Bitboard::from(Rank::R1), Bitboard::RANK_1);
        assert_eq!(Bitboard::from(Rank::R8).0, 0xFF00000000000000);
        assert_eq!(Bitboard::from(File::A), Bitboard::FILE_A);
        assert_eq!(Bitboard::from(File::H), Bitboard::FILE_H);
        assert_eq!(Bitboard::from(File::D).len(), 8);
        assert!(Bitboard::from(File::D).has_square(D5));
    }

    #[test]
    fn shifts_do_not_wrap() {
        for square in [H1, H2, H3, H4, H5, H6, H7, H8] {
            let bb = Bitboard::from(square);
            assert!(bb.to_east().is_empty());
            assert!(bb.to_north_east().is_empty());
            assert!(bb.to_south_east().is_empty());
        }
        for square in [A1, A2, A3, A4, A5, A6, A7, A8] {
            let bb = Bitboard::from(square);
            assert!(bb.to_west().is_empty());
            assert!(bb.to_north_west().is_empty());
            assert!(bb.to_south_west().is_empty());
        }
        assert_eq!(Bitboard::from(D4).to_north_east(), Bitboard::from(E5));
        assert_eq!(Bitboard::from(D4).to_south_west(), Bitboard::from(C3));
        assert_eq!(Bitboard::from(E2).to_forward(Color::White), Bitboard::from(E3));
        assert_eq!(Bitboard::from(E7).to_forward(Color::Black), Bitboard::from(E6));
    }

    #[test]
    fn lowest_square_iteration() {
        let bb = bb_from_shifts!(C3, A1, H8);
        let squares: Vec<Square> = bb.into_iter().collect();
        assert_eq!(squares, vec![A1, C3, H8]);

        let mut empty = Bitboard::EMPTY.into_iter();
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.next(), None);
        assert_eq!(Bitboard::EMPTY.get_lowest_square(), None);
    }

    #[test]
    fn flip_ranks_mirrors_squares() {
        let bb = bb_from_shifts!(A1, E2, H5);
        assert_eq!(bb.flip_ranks(), bb_from_shifts!(A8, E7, H4));
        assert_eq!(Bitboard::DARK_SQUARES.len(), 32);
        assert!(Bitboard::DARK_SQUARES.has_square(A1));
        assert!(Bitboard::LIGHT_SQUARES.has_square(H1));
    }

    #[test]
    fn display_bitboard() {
        let bb = Bitboard::RANK_1 | Bitboard::from(H8);
        let shown = bb.to_string();
        assert!(shown.starts_with(".......1\n"));
        assert!(shown.ends_with("11111111\n"));
    }
}
