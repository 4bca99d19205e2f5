//! Move Ordering
//!
//! Functions used for ordering a list of moves from best to worst.
//!
//! Move ordering is important for alpha-beta pruning performance.
//! If the best or good moves are searched early on in an alpha-beta search,
//! pruning occurs more frequently.
//!
//! Moves are ranked by a single heuristic score, recomputed every time a list is ordered:
//! 1. Captures score ten times the victim's value, less the attacker's value.
//! 2. Promotions earn a flat bonus.
//! 3. King moves are penalized.

use crate::coretypes::{Cp, Move, PieceKind};
use crate::movelist::MoveList;

const PROMOTION_BONUS: Cp = Cp(250);
const KING_MOVE_PENALTY: Cp = Cp(100);

/// Heuristic desirability of a move. Higher is searched first.
pub fn move_score(move_: &Move) -> Cp {
    let mut score = match move_.captured {
        Some(victim) => victim.centipawns() * 10 - move_.piece_kind.centipawns(),
        None => Cp(0),
    };
    if move_.is_promotion() {
        score += PROMOTION_BONUS;
    }
    if move_.piece_kind == PieceKind::King {
        score = score - KING_MOVE_PENALTY;
    }
    score
}

/// Order all moves from best to worst by `move_score`.
/// Moves with equal scores keep their generated order.
pub fn order_moves(mut moves: MoveList) -> MoveList {
    moves.sort_by_key(|move_| std::cmp::Reverse(move_score(move_)));
    moves
}
