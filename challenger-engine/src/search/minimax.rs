//! Minimax implementation.
//!
//! Full width negamax without pruning. It walks every node down to the same
//! horizon as `negamax`, so the pruned search must always agree with it when
//! started from a full window.

use std::cmp;

use crate::coretypes::{Cp, PlyKind};
use crate::search::{quiescence, SearchStats, CASTLE_BONUS};
use crate::Position;

/// Score of `position` for the player to move, searched `depth` plies deep.
pub fn minimax(position: &mut Position, depth: PlyKind) -> Cp {
    let mut stats = SearchStats::default();
    minimax_impl(position, depth, &mut stats)
}

fn minimax_impl(position: &mut Position, depth: PlyKind, stats: &mut SearchStats) -> Cp {
    if depth == 0 {
        return quiescence(position, -Cp::INFINITY, Cp::INFINITY, stats);
    }
    stats.nodes += 1;

    let legal_moves = position.get_legal_moves();
    if legal_moves.is_empty() {
        return match position.is_in_check() {
            true => Cp::mated(depth),
            false => Cp::DRAW,
        };
    }
    if position.is_draw_by_rule() {
        return Cp::DRAW;
    }

    let mut best_cp = -Cp::INFINITY;
    for move_ in legal_moves {
        let mut move_cp = -minimax_impl(&mut position.play(move_), depth - 1, stats);
        if move_.is_castle() {
            move_cp += CASTLE_BONUS;
        }
        best_cp = cmp::max(best_cp, move_cp);
    }
    best_cp
}
