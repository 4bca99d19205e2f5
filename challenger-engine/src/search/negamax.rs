//! Negamax implementation of Minimax with fail-hard Alpha-Beta pruning.

use std::cmp;

use crate::coretypes::{Cp, PlyKind};
use crate::moveorder::order_moves;
use crate::search::{quiescence, SearchStats};
use crate::Position;

/// Flat reward added to a castling move on top of the position it leads to.
pub const CASTLE_BONUS: Cp = Cp(500);

/// The player whose turn it is to move for a position is always treated as the maxing player.
/// negamax returns the score of the position for that player, never outside `[alpha, beta]`.
/// A return of `beta` means a move was found that the opponent will avoid, and the
/// true score may be higher.
///
/// Parameters:
///
/// position: current position to search. Restored before returning.
/// depth: remaining plies to search before quiescence takes over.
/// alpha: Best (greatest) guaranteed value for current player.
/// beta: Best (lowest) guaranteed value for opposite player.
/// stats: Counters of visited nodes.
pub fn negamax(
    position: &mut Position,
    depth: PlyKind,
    mut alpha: Cp,
    beta: Cp,
    stats: &mut SearchStats,
) -> Cp {
    debug_assert!(alpha < beta);
    if depth == 0 {
        return quiescence(position, alpha, beta, stats);
    }
    stats.nodes += 1;

    let legal_moves = position.get_legal_moves();
    if legal_moves.is_empty() {
        // Mates found with more depth remaining are closer to the root, and worse.
        let score = match position.is_in_check() {
            true => Cp::mated(depth),
            false => Cp::DRAW,
        };
        return score.clamp(alpha, beta);
    }
    if position.is_draw_by_rule() {
        return Cp::DRAW.clamp(alpha, beta);
    }

    for move_ in order_moves(legal_moves) {
        let mut score = -negamax(&mut position.play(move_), depth - 1, -beta, -alpha, stats);
        if move_.is_castle() {
            score += CASTLE_BONUS;
        }

        // Cut-off has occurred, no further children of this position need to be searched.
        if score >= beta {
            return beta;
        }
        alpha = cmp::max(alpha, score);
    }
    alpha
}
