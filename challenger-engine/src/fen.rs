//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//!
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`
//!
//! Fields are, in order: piece placement from rank 8 to rank 1, side to move,
//! castling rights, en passant target square, halfmove clock, fullmove number.
//! The two counters may be omitted, in which case they default to `0` and `1`.

use std::convert::TryFrom;
use std::fmt::Write;

use thiserror::Error;

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, File, MoveCount, Piece, PieceKind, Rank, Square};
use crate::coretypes::{NUM_FILES, NUM_RANKS};
use crate::position::Position;

/// Fen string of the standard chess start position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Ways a Fen string can fail to describe a position.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[error("expected 4 to 6 whitespace separated fields, found {0}")]
    FieldCount(usize),
    #[error("malformed piece placement: {0}")]
    Placement(&'static str),
    #[error("side to move is not w|b")]
    SideToMove,
    #[error("castling rights are not - or a subset of KQkq")]
    Castling,
    #[error("en passant target is not - or a square on rank 3 or 6")]
    EnPassant,
    #[error("halfmove clock is not a number")]
    HalfMoveClock,
    #[error("fullmove number is not a positive number")]
    FullMoveNumber,
    #[error("each side must have exactly one king")]
    KingCount,
}

/// Types that can be read from and written to a Fen string.
pub trait Fen: Sized {
    /// Parse a complete Fen string.
    fn parse_fen(input: &str) -> Result<Self, ParseFenError>;

    /// Write self as a Fen string.
    fn to_fen(&self) -> String;
}

impl Fen for Position {
    fn parse_fen(input: &str) -> Result<Self, ParseFenError> {
        let fields: Vec<&str> = input.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(ParseFenError::FieldCount(fields.len()));
        }

        let mailbox = parse_placement(fields[0])?;
        let player = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::SideToMove),
        };
        let castling: Castling = fields[2].parse().map_err(|_| ParseFenError::Castling)?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmoves = match fields.get(4) {
            Some(field) => field
                .parse::<MoveCount>()
                .map_err(|_| ParseFenError::HalfMoveClock)?,
            None => 0,
        };
        let fullmoves = match fields.get(5) {
            Some(field) => match field.parse::<MoveCount>() {
                Ok(fullmoves) if fullmoves > 0 => fullmoves,
                _ => return Err(ParseFenError::FullMoveNumber),
            },
            None => 1,
        };

        Ok(Position::from_parts(
            mailbox, player, castling, en_passant, halfmoves, fullmoves,
        ))
    }

    fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.mailbox[(file, rank)] {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank != Rank::R1 {
                fen.push('/');
            }
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        let _ = write!(
            fen,
            " {} {} {} {} {}",
            self.player, self.castling, en_passant, self.halfmoves, self.fullmoves
        );
        fen
    }
}

/// Placement ::= rank '/' rank '/' ... rank, from rank 8 down to rank 1.
fn parse_placement(placement: &str) -> Result<Mailbox, ParseFenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(ParseFenError::Placement("expected 8 ranks"));
    }

    let mut mailbox = Mailbox::new();
    let mut kings = [0u8; 2];

    for (rank, row) in Rank::ALL.into_iter().rev().zip(ranks) {
        let mut file = 0usize;
        for ch in row.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(ParseFenError::Placement("empty run is not 1-8"));
                }
                file += empty as usize;
            } else {
                let piece =
                    Piece::try_from(ch).map_err(|_| ParseFenError::Placement("unknown piece"))?;
                if file >= NUM_FILES {
                    return Err(ParseFenError::Placement("rank has more than 8 files"));
                }
                if piece.piece_kind() == PieceKind::Pawn && matches!(rank, Rank::R1 | Rank::R8) {
                    return Err(ParseFenError::Placement("pawn on first or last rank"));
                }
                if piece.piece_kind() == PieceKind::King {
                    kings[piece.color() as usize] += 1;
                }
                mailbox[(File::ALL[file], rank)] = Some(piece);
                file += 1;
            }
            if file > NUM_FILES {
                return Err(ParseFenError::Placement("rank has more than 8 files"));
            }
        }
        if file != NUM_FILES {
            return Err(ParseFenError::Placement("rank has fewer than 8 files"));
        }
    }

    if kings != [1, 1] {
        return Err(ParseFenError::KingCount);
    }
    Ok(mailbox)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, ParseFenError> {
    if field == "-" {
        return Ok(None);
    }
    let square: Square = field.parse().map_err(|_| ParseFenError::EnPassant)?;
    match square.rank() {
        Rank::R3 | Rank::R6 => Ok(Some(square)),
        _ => Err(ParseFenError::EnPassant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_roundtrip() {
        let position = Position::parse_fen(START_FEN).unwrap();
        assert_eq!(position, Position::start_position());
        assert_eq!(position.to_fen(), START_FEN);
    }

    #[test]
    fn fen_roundtrips() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pp1p1ppp/8/2pPp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 3",
            "4k3/8/8/8/8/8/8/4K3 b - - 47 90",
        ] {
            assert_eq!(Position::parse_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn counters_are_optional() {
        let position = Position::parse_fen("8/8/8/8/8/8/8/k6K w - -").unwrap();
        assert_eq!(position.halfmoves(), 0);
        assert_eq!(position.fullmoves(), 1);
        assert_eq!(position.to_fen(), "8/8/8/8/8/8/8/k6K w - - 0 1");
    }

    #[test]
    fn malformed_fens() {
        use ParseFenError::*;
        let cases = [
            ("8/8/8/8/8/8/8/k6K w", FieldCount(2)),
            ("8/8/8/8/8/8/k6K w - - 0 1", Placement("expected 8 ranks")),
            ("8/8/8/8/8/8/8/k5K w - - 0 1", Placement("rank has fewer than 8 files")),
            ("8/8/8/8/8/8/8/k6KP w - - 0 1", Placement("rank has more than 8 files")),
            ("8/8/8/8/8/8/8/k6X w - - 0 1", Placement("unknown piece")),
            ("8/8/8/8/8/8/8/k5PK w - - 0 1", Placement("pawn on first or last rank")),
            ("8/8/8/8/8/8/8/k6K x - - 0 1", SideToMove),
            ("8/8/8/8/8/8/8/k6K w KX - 0 1", Castling),
            ("8/8/8/8/8/8/8/k6K w - e4 0 1", EnPassant),
            ("8/8/8/8/8/8/8/k6K w - - x 1", HalfMoveClock),
            ("8/8/8/8/8/8/8/k6K w - - 0 0", FullMoveNumber),
            ("8/8/8/8/8/8/8/7K w - - 0 1", KingCount),
            ("8/8/8/8/8/8/8/kk5K w - - 0 1", KingCount),
        ];
        for (fen, expected) in cases {
            assert_eq!(Position::parse_fen(fen), Err(expected), "{fen}");
        }
    }
}
