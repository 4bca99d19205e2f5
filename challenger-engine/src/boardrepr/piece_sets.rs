//! Piece-Centric representation of a chess board.

use std::ops::{Index, IndexMut};

use crate::bitboard::Bitboard;
use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Piece, PieceKind, Square, NUM_PIECES, NUM_PIECE_KINDS};

/// A Bitboard for each of the 12 colored piece kinds.
/// PieceSets indexes by piece to get squares, as opposed to Mailbox which
/// indexes by square to get a piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PieceSets {
    pieces: [Bitboard; NUM_PIECES],
}

impl PieceSets {
    /// Returns PieceSets with all Bitboards set to empty.
    pub const fn new() -> Self {
        PieceSets {
            pieces: [Bitboard::EMPTY; NUM_PIECES],
        }
    }

    /// White pieces use indices 0-5, Black pieces 6-11.
    const fn offset(color: Color, piece_kind: PieceKind) -> usize {
        color as usize * NUM_PIECE_KINDS + piece_kind as usize
    }

    /// Squares occupied by any piece.
    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// Squares occupied by any piece of one color.
    pub fn color_occupied(&self, color: Color) -> Bitboard {
        let start = Self::offset(color, PieceKind::Pawn);
        self.pieces[start..start + NUM_PIECE_KINDS]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn place(&mut self, piece: Piece, square: Square) {
        self[piece].set_square(square);
    }

    pub fn remove(&mut self, piece: Piece, square: Square) {
        self[piece].clear_square(square);
    }

    /// Mirror ranks and swap the colors of every piece.
    pub fn color_flip(&self) -> Self {
        let mut flipped = Self::new();
        for color in Color::ALL {
            for piece_kind in PieceKind::ALL {
                flipped[(!color, piece_kind)] = self[(color, piece_kind)].flip_ranks();
            }
        }
        flipped
    }
}

impl Default for PieceSets {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<(Color, PieceKind)> for PieceSets {
    type Output = Bitboard;
    fn index(&self, (color, piece_kind): (Color, PieceKind)) -> &Self::Output {
        &self.pieces[Self::offset(color, piece_kind)]
    }
}

impl IndexMut<(Color, PieceKind)> for PieceSets {
    fn index_mut(&mut self, (color, piece_kind): (Color, PieceKind)) -> &mut Self::Output {
        &mut self.pieces[Self::offset(color, piece_kind)]
    }
}

impl Index<Piece> for PieceSets {
    type Output = Bitboard;
    fn index(&self, piece: Piece) -> &Self::Output {
        &self[(piece.color, piece.piece_kind)]
    }
}

impl IndexMut<Piece> for PieceSets {
    fn index_mut(&mut self, piece: Piece) -> &mut Self::Output {
        &mut self[(piece.color, piece.piece_kind)]
    }
}

impl From<&Mailbox> for PieceSets {
    fn from(mailbox: &Mailbox) -> Self {
        let mut pieces = Self::new();
        for square in Square::iter() {
            if let Some(piece) = mailbox[square] {
                pieces.place(piece, square);
            }
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn pieces_do_not_alias() {
        let mut pieces = PieceSets::new();
        pieces.place(Piece::new(Color::White, PieceKind::King), E1);
        pieces.place(Piece::new(Color::Black, PieceKind::Pawn), E7);

        // Every (color, kind) pair owns a distinct bitboard.
        for color in Color::ALL {
            for piece_kind in PieceKind::ALL {
                let expected = match (color, piece_kind) {
                    (Color::White, PieceKind::King) => Bitboard::from(E1),
                    (Color::Black, PieceKind::Pawn) => Bitboard::from(E7),
                    _ => Bitboard::EMPTY,
                };
                assert_eq!(pieces[(color, piece_kind)], expected);
            }
        }
        assert_eq!(pieces.color_occupied(Color::White), Bitboard::from(E1));
        assert_eq!(pieces.occupied().len(), 2);

        pieces.remove(Piece::new(Color::White, PieceKind::King), E1);
        assert!(pieces.color_occupied(Color::White).is_empty());
    }

    #[test]
    fn color_flip_swaps_and_mirrors() {
        let mut pieces = PieceSets::new();
        pieces.place(Piece::new(Color::White, PieceKind::Knight), G1);
        let flipped = pieces.color_flip();
        assert_eq!(flipped[(Color::Black, PieceKind::Knight)], Bitboard::from(G8));
        assert!(flipped[(Color::White, PieceKind::Knight)].is_empty());
    }
}
