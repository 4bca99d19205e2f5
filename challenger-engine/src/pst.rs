//! Piece-square tables.
//!
//! Each table holds a positional bonus per square for one kind of piece.
//! Tables are laid out as White sees the board, rank 8 first, so Black reads
//! them by square index directly and White reads them with the rank mirrored.

use crate::coretypes::{Color, CpKind, PieceKind, Square, SquareIndexable, NUM_SQUARES};

pub type PieceSquareTable = [CpKind; NUM_SQUARES];

#[rustfmt::skip]
pub const PAWNS: PieceSquareTable = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHTS: PieceSquareTable = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOPS: PieceSquareTable = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const ROOKS: PieceSquareTable = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
pub const QUEENS: PieceSquareTable = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

/// King safety while there is enough material on the board for an attack.
/// No endgame counterpart exists, the table fades out instead.
#[rustfmt::skip]
pub const KING_MIDDLE: PieceSquareTable = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

/// Table used for a kind of piece.
pub const fn table(piece_kind: PieceKind) -> &'static PieceSquareTable {
    match piece_kind {
        PieceKind::Pawn => &PAWNS,
        PieceKind::Knight => &KNIGHTS,
        PieceKind::Bishop => &BISHOPS,
        PieceKind::Rook => &ROOKS,
        PieceKind::Queen => &QUEENS,
        PieceKind::King => &KING_MIDDLE,
    }
}

/// Bonus for a piece of `color` standing on `square`.
pub fn read(table: &PieceSquareTable, square: Square, color: Color) -> CpKind {
    match color {
        Color::White => table[square.flip_rank().idx()],
        Color::Black => table[square.idx()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn colors_read_mirrored_squares() {
        // A pawn one step from promotion is worth the same to either side.
        assert_eq!(read(&PAWNS, E7, Color::White), 50);
        assert_eq!(read(&PAWNS, E2, Color::Black), 50);
        assert_eq!(read(&PAWNS, D2, Color::White), -20);
        assert_eq!(read(&PAWNS, D7, Color::Black), -20);

        // Castled king squares.
        assert_eq!(read(&KING_MIDDLE, G1, Color::White), 30);
        assert_eq!(read(&KING_MIDDLE, G8, Color::Black), 30);

        for square in Square::iter() {
            for piece_kind in PieceKind::ALL {
                let table = table(piece_kind);
                assert_eq!(
                    read(table, square, Color::White),
                    read(table, square.flip_rank(), Color::Black)
                );
            }
        }
    }
}
