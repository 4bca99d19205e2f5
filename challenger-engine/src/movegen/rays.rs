//! Attack rays for sliding pieces.

use crate::bitboard::Bitboard;
use crate::coretypes::Square;

/// Walk from `origin` (exclusive) in one compass direction until the first occupied
/// square (inclusive) or the edge of the board.
#[inline(always)]
fn ray_scan(origin: Square, occupancy: Bitboard, step: fn(&Bitboard) -> Bitboard) -> Bitboard {
    let mut ray = Bitboard::EMPTY;
    let mut cursor = step(&Bitboard::from(origin));
    while !cursor.is_empty() {
        ray |= cursor;
        if occupancy.has_any(cursor) {
            break;
        }
        cursor = step(&cursor);
    }
    ray
}

/// Squares a rook on `origin` attacks given all occupied squares.
pub(crate) fn rook_attacks(origin: Square, occupancy: Bitboard) -> Bitboard {
    ray_scan(origin, occupancy, Bitboard::to_north)
        | ray_scan(origin, occupancy, Bitboard::to_east)
        | ray_scan(origin, occupancy, Bitboard::to_south)
        | ray_scan(origin, occupancy, Bitboard::to_west)
}

/// Squares a bishop on `origin` attacks given all occupied squares.
pub(crate) fn bishop_attacks(origin: Square, occupancy: Bitboard) -> Bitboard {
    ray_scan(origin, occupancy, Bitboard::to_north_east)
        | ray_scan(origin, occupancy, Bitboard::to_south_east)
        | ray_scan(origin, occupancy, Bitboard::to_south_west)
        | ray_scan(origin, occupancy, Bitboard::to_north_west)
}

pub(crate) fn queen_attacks(origin: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(origin, occupancy) | bishop_attacks(origin, occupancy)
}
