//! Quiescence Search
//!
//! When a position is being searched, nodes at the final depth (leaf nodes)
//! can be either terminal or non-terminal.
//! Non-terminal nodes are scored according to a static evaluation function
//! that provides a best guess at that node's value.
//!
//! Statically evaluating non-terminal leaf nodes leads to the horizon effect.
//! An engine may see a leaf node where Queen x Pawn as a winning position,
//! while right over the horizon exists Pawn x Queen.
//!
//! To reduce this horizon effect, a quiescence search is used in place of
//! a direct static evaluation of a leaf node. Only captures are searched,
//! so every line ends once material stops changing hands.

use std::cmp;

use crate::coretypes::Cp;
use crate::evaluation::evaluate;
use crate::moveorder::order_moves;
use crate::search::SearchStats;
use crate::Position;

/// Returns a score relative to the player to move, never outside `[alpha, beta]`.
///
/// The static evaluation serves as a lower bound ("stand pat"): the player to move
/// is never forced to capture, so it can always keep at least the current score.
pub fn quiescence(position: &mut Position, mut alpha: Cp, beta: Cp, stats: &mut SearchStats) -> Cp {
    stats.q_nodes += 1;

    let stand_pat = evaluate(position);
    if stand_pat >= beta {
        return beta;
    }
    alpha = cmp::max(alpha, stand_pat);

    for move_ in order_moves(position.get_legal_captures()) {
        let score = -quiescence(&mut position.play(move_), -beta, -alpha, stats);

        if score >= beta {
            return beta;
        }
        alpha = cmp::max(alpha, score);
    }
    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn parse(fen: &str) -> Position {
        Position::parse_fen(fen).unwrap()
    }

    #[test]
    fn sees_recapture() {
        // Qxd5 wins a pawn but loses the queen to exd5.
        let mut position = parse("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1");
        let mut stats = SearchStats::default();
        let stand_pat = evaluate(&position);
        let score = quiescence(&mut position, -Cp::INFINITY, Cp::INFINITY, &mut stats);

        assert_eq!(score, stand_pat);
        assert!(stats.q_nodes > 1);
    }

    #[test]
    fn takes_free_material() {
        let mut position = parse("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let mut stats = SearchStats::default();
        let score = quiescence(&mut position, -Cp::INFINITY, Cp::INFINITY, &mut stats);
        assert!(score > evaluate(&position));
        assert!(score > Cp(0));
    }

    #[test]
    fn terminates_within_window() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq - 0 3",
            "2r3k1/1q3ppp/8/3Q4/8/8/5PPP/2R3K1 w - - 0 1",
        ];
        let windows = [
            (-Cp::INFINITY, Cp::INFINITY),
            (Cp(-100), Cp(100)),
            (Cp(400), Cp(401)),
        ];
        for fen in fens {
            let mut position = parse(fen);
            let original = position.clone();
            for (alpha, beta) in windows {
                let mut stats = SearchStats::default();
                let score = quiescence(&mut position, alpha, beta, &mut stats);
                assert!(alpha <= score && score <= beta, "{fen}: {score}");
                assert_eq!(position, original);
            }
        }
    }
}
