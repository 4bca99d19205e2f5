//! Zobrist Hashing
//!
//! Positions are keyed by xor-ing together pseudo-random values for each feature of
//! the position. Keys are compared to detect repeated positions.

use std::collections::HashSet;
use std::ops::Index;
use std::sync::OnceLock;

use rand::prelude::*;

use crate::coretypes::{Castling, Color, File, Move, MoveFlag, Piece, PieceKind, Square};
use crate::coretypes::{SquareIndexable, NUM_FILES, NUM_PIECES, NUM_PIECE_KINDS, NUM_SQUARES};
use crate::movegen::en_passant_victim;
use crate::position::{Cache, Position};

/// HashKind is an alias for the underlying type of a Zobrist Hash.
pub type HashKind = u64;

/// Seed of the process-wide table, fixed so keys are reproducible between runs.
const ZOBRIST_SEED: u64 = 0x6368_616c_6c65_6e67;

/// ZobristTable contains unique, pseudo-randomly generated values
/// used for calculating Zobrist Hash of a chess position.
///
/// Each Piece gets a unique number for each square.
/// A single side to move gets a unique number.
/// Each possible combination of castling rights gets a unique number.
/// Each possible file for En-Passant gets a unique number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZobristTable {
    piece_hash: [[HashKind; NUM_SQUARES]; NUM_PIECES],
    ep_hash: [HashKind; NUM_FILES],
    castling_hash: [HashKind; Castling::ENUMERATIONS],
    player_hash: HashKind,
}

/// Table shared by every position of the process, generated on first use.
pub fn zobrist_table() -> &'static ZobristTable {
    static TABLE: OnceLock<ZobristTable> = OnceLock::new();
    TABLE.get_or_init(|| ZobristTable::with_seed(ZOBRIST_SEED))
}

impl ZobristTable {
    /// Black to move is hashed, White to move is not.
    const TOGGLE_PLAYER: Color = Color::Black;

    /// Returns a new ZobristTable with unique values generated from seeded rng.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Returns a new ZobristTable with unique values generated from rng.
    fn with_rng(mut rng: StdRng) -> Self {
        let mut used_values = HashSet::new();
        let mut unique_value = || loop {
            let value: HashKind = rng.gen();
            // insert returns false if value was already drawn.
            if value != 0 && used_values.insert(value) {
                break value;
            }
        };

        let mut piece_hash = [[HashKind::default(); NUM_SQUARES]; NUM_PIECES];
        let mut ep_hash = [HashKind::default(); NUM_FILES];
        let mut castling_hash = [HashKind::default(); Castling::ENUMERATIONS];

        for item in piece_hash
            .iter_mut()
            .flatten()
            .chain(ep_hash.iter_mut())
            .chain(castling_hash.iter_mut())
        {
            *item = unique_value();
        }
        let player_hash = unique_value();

        Self {
            piece_hash,
            ep_hash,
            castling_hash,
            player_hash,
        }
    }

    /// Generate the full hash of a position from scratch.
    pub fn generate_hash(&self, position: &Position) -> HashKind {
        let mut hash = HashKind::default();

        for color in Color::ALL {
            for piece_kind in PieceKind::ALL {
                let piece = Piece::new(color, piece_kind);
                for square in position.pieces()[piece] {
                    hash ^= self[(piece, square)];
                }
            }
        }

        if let Some(ep_square) = position.en_passant() {
            hash ^= self[ep_square.file()];
        }

        hash ^= self[position.castling()];

        if position.player() == Self::TOGGLE_PLAYER {
            hash ^= self.player_hash;
        }

        hash
    }

    /// Update a hash with a move that has just been applied to `position`.
    /// The update is its own inverse: applying it to the resulting hash
    /// restores the hash from before the move.
    ///
    /// # Arguments
    /// `hash`: The hash value to directly update.
    /// `position`: The position after `move_` was made.
    /// `move_`: The move that was applied.
    /// `cache`: Irreversible state of the position from before the move.
    pub fn update_hash(&self, hash: &mut HashKind, position: &Position, move_: Move, cache: Cache) {
        let mover = !position.player();

        *hash ^= self.player_hash;
        *hash ^= self[cache.castling];
        *hash ^= self[position.castling()];
        if let Some(ep_square) = cache.en_passant {
            *hash ^= self[ep_square.file()];
        }
        if let Some(ep_square) = position.en_passant() {
            *hash ^= self[ep_square.file()];
        }

        let moved = Piece::new(mover, move_.piece_kind);
        let landed = Piece::new(mover, move_.promotion().unwrap_or(move_.piece_kind));
        *hash ^= self[(moved, move_.from)];
        *hash ^= self[(landed, move_.to)];

        if let Some(captured_kind) = move_.captured {
            let captured = Piece::new(!mover, captured_kind);
            let captured_square = match move_.flag {
                MoveFlag::EnPassant => en_passant_victim(move_.to, mover),
                _ => move_.to,
            };
            *hash ^= self[(captured, captured_square)];
        }

        if move_.flag == MoveFlag::Castle {
            let (rook_from, rook_to) = Position::castling_rook_squares(move_.to);
            let rook = Piece::new(mover, PieceKind::Rook);
            *hash ^= self[(rook, rook_from)];
            *hash ^= self[(rook, rook_to)];
        }
    }
}

impl Index<(Piece, Square)> for ZobristTable {
    type Output = HashKind;
    fn index(&self, (piece, square): (Piece, Square)) -> &Self::Output {
        let offset = piece.color as usize * NUM_PIECE_KINDS + piece.piece_kind as usize;
        &self.piece_hash[offset][square.idx()]
    }
}

// Index used for accessing ep_hash (en-passant hash).
impl Index<File> for ZobristTable {
    type Output = HashKind;
    fn index(&self, index: File) -> &Self::Output {
        &self.ep_hash[index as usize]
    }
}

impl Index<Castling> for ZobristTable {
    type Output = HashKind;
    fn index(&self, index: Castling) -> &Self::Output {
        &self.castling_hash[index.bits() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    /// Incremental update of `before` by `move_str` must match a fresh hash of `after`.
    fn incremental_matches_generated(before: &str, move_str: &str, after: &str) {
        let table = ZobristTable::with_seed(7);
        let mut position = Position::parse_fen(before).unwrap();
        let expected_before = table.generate_hash(&position);
        let expected_after = table.generate_hash(&Position::parse_fen(after).unwrap());

        let move_ = position.parse_move(move_str).unwrap();
        let cache = position.cache();
        position.make_move(move_);

        let mut hash = expected_before;
        table.update_hash(&mut hash, &position, move_, cache);
        assert_eq!(hash, expected_after);
        assert_eq!(table.generate_hash(&position), expected_after);

        // Update is its own inverse.
        table.update_hash(&mut hash, &position, move_, cache);
        assert_eq!(hash, expected_before);
    }

    #[test]
    fn hash_start_position() {
        incremental_matches_generated(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "d2d4",
            "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1",
        );
    }

    #[test]
    fn hash_en_passant_position() {
        incremental_matches_generated(
            "rnbqkbnr/pp1p1ppp/8/2pPp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 3",
            "d5e6",
            "rnbqkbnr/pp1p1ppp/4P3/2p5/8/8/PPP1PPPP/RNBQKBNR b KQkq - 0 3",
        );
    }

    #[test]
    fn hash_castling_position() {
        incremental_matches_generated(
            "rnb1k1nr/pp3ppp/3bp3/q2p4/2Pp4/2NBPN2/PP3PPP/R1BQK2R w KQkq - 0 7",
            "e1g1",
            "rnb1k1nr/pp3ppp/3bp3/q2p4/2Pp4/2NBPN2/PP3PPP/R1BQ1RK1 b kq - 1 7",
        );
    }

    #[test]
    fn hash_capture_promotion() {
        incremental_matches_generated(
            "1n5k/P7/8/8/8/8/8/7K w - - 0 1",
            "a7b8q",
            "1Q5k/8/8/8/8/8/8/7K b - - 0 1",
        );
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(ZobristTable::with_seed(11), ZobristTable::with_seed(11));
        assert_ne!(ZobristTable::with_seed(11), ZobristTable::with_seed(12));
        assert!(std::ptr::eq(zobrist_table(), zobrist_table()));
    }
}
