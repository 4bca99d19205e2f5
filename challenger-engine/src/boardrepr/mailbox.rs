//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.

use std::ops::{Index, IndexMut};

use crate::coretypes::{Piece, Rank, Square, SquareIndexable, NUM_SQUARES};

/// Each of the 64 squares, starting at A1, holds a piece or nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; NUM_SQUARES],
}

impl Mailbox {
    /// Creates an empty Mailbox, where all squares are None.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; NUM_SQUARES],
        }
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for rank in Rank::ALL.into_iter().rev() {
            pretty.push_str("| ");
            for square in Square::iter().filter(|square| square.rank() == rank) {
                pretty.push(self[square].map_or(' ', |piece| piece.to_char()));
                pretty.push_str(" | ");
            }
            pretty.push(rank.to_char());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SquareIndexable> Index<I> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: I) -> &Self::Output {
        &self.board[idx.idx()]
    }
}

impl<I: SquareIndexable> IndexMut<I> for Mailbox {
    fn index_mut(&mut self, idx: I) -> &mut Self::Output {
        &mut self.board[idx.idx()]
    }
}
