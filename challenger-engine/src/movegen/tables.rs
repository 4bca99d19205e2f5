//! Lookup tables computed at compile time.
//!
//! Arrays are indexed by Square's discriminant.

use crate::bitboard::Bitboard;
use crate::coretypes::{Square, SquareIndexable, NUM_SQUARES};

/// Knight attacks from each square on an otherwise empty board.
pub const KNIGHT_PATTERN: [Bitboard; NUM_SQUARES] = generate_leaper_patterns(&[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
]);

/// King attacks from each square on an otherwise empty board.
pub const KING_PATTERN: [Bitboard; NUM_SQUARES] = generate_leaper_patterns(&[
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
]);

/// Distance of each square from the four center squares, counted in
/// file steps plus rank steps. Ranges from 0 (d4, e4, d5, e5) to 6 (corners).
pub const CENTER_MANHATTAN_DISTANCE: [u8; NUM_SQUARES] = generate_center_manhattan_distance();

pub fn knight_pattern<I: SquareIndexable>(idx: I) -> Bitboard {
    KNIGHT_PATTERN[idx.idx()]
}

pub fn king_pattern<I: SquareIndexable>(idx: I) -> Bitboard {
    KING_PATTERN[idx.idx()]
}

pub fn center_manhattan_distance(square: Square) -> u8 {
    CENTER_MANHATTAN_DISTANCE[square.idx()]
}

/// Minimum number of rook moves needed to travel between two squares on an empty board,
/// counted as file distance plus rank distance. Ranges from 0 to 14.
pub const fn rook_distance(from: Square, to: Square) -> u8 {
    from.file_u8().abs_diff(to.file_u8()) + from.rank_u8().abs_diff(to.rank_u8())
}

/// Each offset is (file delta, rank delta). Offsets landing off board are skipped.
const fn generate_leaper_patterns(offsets: &[(i8, i8)]) -> [Bitboard; NUM_SQUARES] {
    let mut patterns = [Bitboard::EMPTY; NUM_SQUARES];
    let mut square = 0;
    while square < NUM_SQUARES {
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            let (df, dr) = offsets[i];
            let (target_file, target_rank) = (file + df, rank + dr);
            if target_file >= 0 && target_file < 8 && target_rank >= 0 && target_rank < 8 {
                bits |= 1u64 << (target_rank * 8 + target_file) as u32;
            }
            i += 1;
        }
        patterns[square] = Bitboard(bits);
        square += 1;
    }
    patterns
}

const fn generate_center_manhattan_distance() -> [u8; NUM_SQUARES] {
    const fn from_center(coordinate: u8) -> u8 {
        if coordinate < 4 {
            3 - coordinate
        } else {
            coordinate - 4
        }
    }

    let mut distances = [0u8; NUM_SQUARES];
    let mut square = 0;
    while square < NUM_SQUARES {
        let (file, rank) = ((square % 8) as u8, (square / 8) as u8);
        distances[square] = from_center(file) + from_center(rank);
        square += 1;
    }
    distances
}
