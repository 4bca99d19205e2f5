//! Move generation.
//!
//! Moves are generated pseudo-legally per piece, then filtered by checking whether
//! the mover's king would be attacked on the board that results from the move.

use crate::bitboard::Bitboard;
use crate::coretypes::{Castling, Color, Move, MoveFlag, PieceKind, PieceKind::*, Square};
use crate::movelist::MoveList;
use crate::position::Position;

pub mod rays;
pub mod tables;

use rays::{bishop_attacks, queen_attacks, rook_attacks};
use tables::{king_pattern, knight_pattern};

/// Squares attacked by a set of pawns of the given color.
pub fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => pawns.to_north_east() | pawns.to_north_west(),
        Color::Black => pawns.to_south_east() | pawns.to_south_west(),
    }
}

/// Squares attacked by a non-pawn piece standing on `origin`.
pub fn piece_attacks(piece_kind: PieceKind, origin: Square, occupied: Bitboard) -> Bitboard {
    match piece_kind {
        Knight => knight_pattern(origin),
        Bishop => bishop_attacks(origin, occupied),
        Rook => rook_attacks(origin, occupied),
        Queen => queen_attacks(origin, occupied),
        King => king_pattern(origin),
        Pawn => Bitboard::EMPTY,
    }
}

/// Pieces of color `by` that attack `target`.
///
/// `occupied` is the blocker set used for sliding rays, and only attackers within
/// `mask` are considered. Both allow asking the question about a board that
/// differs from the position by one pending move.
pub(crate) fn attackers_to(
    position: &Position,
    target: Square,
    by: Color,
    occupied: Bitboard,
    mask: Bitboard,
) -> Bitboard {
    let pieces = &position.pieces;
    let queens = pieces[(by, Queen)];

    let pawns = pawn_attacks(Bitboard::from(target), !by) & pieces[(by, Pawn)];
    let knights = knight_pattern(target) & pieces[(by, Knight)];
    let kings = king_pattern(target) & pieces[(by, King)];
    let orthogonal = rook_attacks(target, occupied) & (pieces[(by, Rook)] | queens);
    let diagonal = bishop_attacks(target, occupied) & (pieces[(by, Bishop)] | queens);

    (pawns | knights | kings | orthogonal | diagonal) & mask
}

/// Returns true if any piece of color `by` attacks `target` in the current position.
pub(crate) fn is_attacked(position: &Position, target: Square, by: Color) -> bool {
    !attackers_to(
        position,
        target,
        by,
        position.pieces.occupied(),
        Bitboard::FULL,
    )
    .is_empty()
}

/// Square of the pawn removed by an en passant capture landing on `to`.
pub(crate) fn en_passant_victim(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => Square::ALL[to as usize - 8],
        Color::Black => Square::ALL[to as usize + 8],
    }
}

/// All legal moves for the player to move.
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves(position, &mut moves);
    moves.retain(|move_| is_king_safe_after(position, move_));
    moves
}

/// Legal moves that remove an opponent piece from the board.
pub fn legal_captures(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves(position, &mut moves);
    moves.retain(|move_| move_.is_capture() && is_king_safe_after(position, move_));
    moves
}

/// Returns true if the player's king is not attacked after playing `move_`.
/// `move_` must be pseudo-legal for the position.
fn is_king_safe_after(position: &Position, move_: &Move) -> bool {
    let us = position.player;
    let from = Bitboard::from(move_.from);
    let to = Bitboard::from(move_.to);

    let mut occupied = (position.pieces.occupied() & !from) | to;
    let mut captured = to;
    if move_.flag == MoveFlag::EnPassant {
        let victim = en_passant_victim(move_.to, us);
        occupied.clear_square(victim);
        captured = Bitboard::from(victim);
    }

    let king = match move_.piece_kind {
        King => move_.to,
        _ => position.king_square(us),
    };
    attackers_to(position, king, !us, occupied, !captured).is_empty()
}

/// Append every pseudo-legal move of the player to move.
fn pseudo_legal_moves(position: &Position, moves: &mut MoveList) {
    pawn_moves(position, moves);
    for piece_kind in [Knight, Bishop, Rook, Queen, King] {
        piece_moves(position, piece_kind, moves);
    }
    castling_moves(position, moves);
}

fn pawn_moves(position: &Position, moves: &mut MoveList) {
    let us = position.player;
    let empty = !position.pieces.occupied();
    let them = position.pieces.color_occupied(!us);

    for from in position.pieces[(us, Pawn)] {
        let from_bb = Bitboard::from(from);

        let single = from_bb.to_forward(us) & empty;
        if let Some(to) = single.get_lowest_square() {
            push_pawn_move(moves, us, from, to, None);

            if from_bb.has_any(Bitboard::pawn_start_rank(us)) {
                let double = single.to_forward(us) & empty;
                if let Some(to) = double.get_lowest_square() {
                    moves.push(Move::new(from, to, MoveFlag::DoublePush, Pawn, None));
                }
            }
        }

        let attacks = pawn_attacks(from_bb, us);
        for to in attacks & them {
            let captured = position.mailbox[to].map(|piece| piece.piece_kind);
            push_pawn_move(moves, us, from, to, captured);
        }

        if let Some(ep_square) = position.en_passant {
            if attacks.has_square(ep_square) {
                moves.push(Move::new(
                    from,
                    ep_square,
                    MoveFlag::EnPassant,
                    Pawn,
                    Some(Pawn),
                ));
            }
        }
    }
}

/// Pushes a pawn move, expanding it into all four promotions on the last rank.
fn push_pawn_move(
    moves: &mut MoveList,
    us: Color,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
) {
    if Bitboard::promotion_rank(us).has_square(to) {
        for flag in [
            MoveFlag::PromoteQueen,
            MoveFlag::PromoteRook,
            MoveFlag::PromoteBishop,
            MoveFlag::PromoteKnight,
        ] {
            moves.push(Move::new(from, to, flag, Pawn, captured));
        }
    } else {
        moves.push(Move::new(from, to, MoveFlag::Quiet, Pawn, captured));
    }
}

fn piece_moves(position: &Position, piece_kind: PieceKind, moves: &mut MoveList) {
    let us = position.player;
    let occupied = position.pieces.occupied();
    let ours = position.pieces.color_occupied(us);

    for from in position.pieces[(us, piece_kind)] {
        for to in piece_attacks(piece_kind, from, occupied) & !ours {
            let captured = position.mailbox[to].map(|piece| piece.piece_kind);
            moves.push(Move::new(from, to, MoveFlag::Quiet, piece_kind, captured));
        }
    }
}

/// Castling requires the right, an empty path between king and rook, and that the king
/// is not in check and does not cross an attacked square.
fn castling_moves(position: &Position, moves: &mut MoveList) {
    use Square::*;
    let us = position.player;
    let (king_from, sides) = match us {
        Color::White => (
            E1,
            [
                (Castling::W_KING, H1, G1, Bitboard::W_KINGSIDE_BETWEEN, Bitboard::W_KINGSIDE_PASS),
                (Castling::W_QUEEN, A1, C1, Bitboard::W_QUEENSIDE_BETWEEN, Bitboard::W_QUEENSIDE_PASS),
            ],
        ),
        Color::Black => (
            E8,
            [
                (Castling::B_KING, H8, G8, Bitboard::B_KINGSIDE_BETWEEN, Bitboard::B_KINGSIDE_PASS),
                (Castling::B_QUEEN, A8, C8, Bitboard::B_QUEENSIDE_BETWEEN, Bitboard::B_QUEENSIDE_PASS),
            ],
        ),
    };

    let occupied = position.pieces.occupied();
    if !position.pieces[(us, King)].has_square(king_from) || is_attacked(position, king_from, !us)
    {
        return;
    }

    for (right, rook_from, king_to, between, pass) in sides {
        let can_castle = position.castling.has(right)
            && position.pieces[(us, Rook)].has_square(rook_from)
            && !occupied.has_any(between)
            && pass.into_iter().all(|square| !is_attacked(position, square, !us));

        if can_castle {
            moves.push(Move::new(king_from, king_to, MoveFlag::Castle, King, None));
        }
    }
}
