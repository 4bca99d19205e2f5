//! Mates
//!
//! Tests to ensure engine finds forced checkmates.
//! They should find the best move with a small depth.

use challenger_engine::coretypes::{Color, Color::*, Square, Square::*};
use challenger_engine::fen::Fen;
use challenger_engine::search::{choose_move, DepthPolicy};
use challenger_engine::timeman::Timer;
use challenger_engine::*;

/// Searches `fen_str` and checks the engine announces mate in `moves` for `winner`,
/// playing a move that lands on `to`.
fn mate_tester(fen_str: &str, to: Square, moves: i32, winner: Color) {
    let mut position = Position::parse_fen(fen_str).unwrap();
    let depth = (2 * moves) as u8;
    let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(depth)).unwrap();

    assert_eq!(result.leading(), Some(winner));
    assert!(result.score.is_mate());
    assert_eq!(result.mate_in(), Some(moves));
    assert_eq!(result.best_move.to(), to);
}

/// A unique position where a king should not be able to capture a checking queen,
/// even though recapturing piece is pinned to opposing king.
/// https://support.chess.com/article/373-checkmate-with-a-pinned-piece-whats-going-on
#[test]
fn mate_with_pinned_piece() {
    let pos = Position::parse_fen("k7/1r6/8/8/4B3/8/1q6/K7 w - - 0 1").unwrap();
    assert!(pos.is_checkmate());
}

#[test]
fn mate_in_1_queen_take_pawn() {
    let pos = "r1bqk2r/2p2pp1/p1pp3p/2b5/2B1P1n1/2N2Q2/PPP2PPP/R1B1R1K1 w kq - 2 11";
    mate_tester(pos, F7, 1, White);
}

#[test]
fn mate_in_1_back_rank() {
    mate_tester("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1", D8, 1, White);
}

#[test]
fn mate_in_1_for_black() {
    mate_tester("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", A1, 1, Black);
    mate_tester("3r2k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", D1, 1, Black);
}

#[test]
fn mate_in_2_back_rank_queen() {
    // Qa8+ Rc8 Qxc8#
    let pos = "6k1/5ppp/4p3/4P2q/3P1P2/2r4P/4R1QK/8 w - - 0 3";
    mate_tester(pos, A8, 2, White);
}

#[test]
fn prefers_mate_over_stalemate() {
    // Qg6 stalemates, Qg7 mates.
    let mut position = Position::parse_fen("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1").unwrap();
    let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(2)).unwrap();

    position.make_move(result.best_move);
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
}

#[test]
fn delays_unavoidable_mate() {
    // Black is mated next move whatever it plays, but the search still returns a move.
    let mut position = Position::parse_fen("7k/8/6K1/8/8/8/8/R7 b - - 0 1").unwrap();
    let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(3)).unwrap();

    assert_eq!(result.leading(), Some(White));
    assert_eq!(result.mate_in(), Some(-1));
    assert!(position.get_legal_moves().contains(&result.best_move));
}
