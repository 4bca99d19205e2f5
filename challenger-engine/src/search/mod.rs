//! Search functions.
//!
//! `choose_move` is the entry point: it picks a depth once, then runs a full-width
//! negamax search below every root move and keeps the best one.

mod depth;
mod minimax;
mod negamax;
mod quiescence;

pub use depth::*;
pub use minimax::*;
pub use negamax::*;
pub use quiescence::*;

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use crate::coretypes::{Color, Cp, CpKind, Move, PlyKind};
use crate::moveorder::order_moves;
use crate::timeman::Timer;
use crate::Position;

/// Counters shared by every node of one search.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Main search nodes with depth remaining.
    pub nodes: u64,
    /// Quiescence search nodes.
    pub q_nodes: u64,
}

/// The results found from running a search on some root position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search.
    pub best_move: Move,
    /// The centipawn score of making the best move, relative to the root player.
    pub score: Cp,
    /// The player to move for the root position that was searched.
    pub player: Color,
    /// Depth in plies, counting the root move.
    pub depth: PlyKind,
    /// Total number of nodes visited in a search, including quiescence nodes.
    pub nodes: u64,
    /// Total number of nodes visited in a quiescence search.
    pub q_nodes: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        match secs > 0.0 {
            true => (self.nodes as f64 / secs).round(),
            false => 0.0,
        }
    }

    /// Converts the score of the search into one that is absolute, with White as + and Black as -.
    pub fn absolute_score(&self) -> Cp {
        self.score * self.player.sign()
    }

    /// Returns the color who is leading in the search of the root position, or None if drawn.
    pub fn leading(&self) -> Option<Color> {
        match self.absolute_score().signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }

    /// Full moves until a forced mate, positive when the root player delivers it.
    pub fn mate_in(&self) -> Option<CpKind> {
        if !self.score.is_mate() {
            return None;
        }
        let depth_left = self.score.0.abs() - Cp::CHECKMATE.0;
        let plies = self.depth as CpKind - depth_left;
        Some((plies + 1) / 2 * self.score.signum())
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "best_move: {} score: {} depth: {} nodes: {} q_nodes: {} elapsed: {}.{:03}s nps: {}",
            self.best_move,
            self.score,
            self.depth,
            self.nodes,
            self.q_nodes,
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis(),
            self.nps(),
        )
    }
}

/// Score a root move must beat to replace the first ordered move.
///
/// When every root move scores at or below this floor, the first ordered move is played.
pub const ROOT_FLOOR: Cp = Cp(-900);

/// Challenger Engine primary position search function.
///
/// Orders the root moves, selects a depth with `policy`, and searches each root
/// move with a full window. A move replaces the current best only with a strictly
/// higher score, starting from `ROOT_FLOOR`, so the first ordered move wins ties
/// and is kept when nothing scores above the floor.
/// Returns None if the player to move has no legal moves.
pub fn choose_move(
    position: &mut Position,
    timer: &Timer,
    policy: DepthPolicy,
) -> Option<SearchResult> {
    let start_time = Instant::now();
    let moves = order_moves(position.get_legal_moves());
    let first_move = *moves.first()?;
    let depth = policy.select(position, timer, &moves);

    let mut stats = SearchStats::default();
    let mut first_score = None;
    let mut best: Option<(Move, Cp)> = None;

    for move_ in moves {
        let score = -negamax(
            &mut position.play(move_),
            depth - 1,
            -Cp::INFINITY,
            Cp::INFINITY,
            &mut stats,
        );
        first_score.get_or_insert(score);
        if score > best.map_or(ROOT_FLOOR, |(_, best_score)| best_score) {
            best = Some((move_, score));
        }
    }

    // Nothing beat the floor: the first move is played with its own score.
    let (best_move, best_score) = match best {
        Some(best) => best,
        None => (first_move, first_score?),
    };

    let result = SearchResult {
        best_move,
        score: best_score,
        player: position.player(),
        depth,
        nodes: stats.nodes + stats.q_nodes,
        q_nodes: stats.q_nodes,
        elapsed: start_time.elapsed(),
    };
    log::info!("{result}");
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Square::*;
    use crate::fen::Fen;

    fn parse(fen: &str) -> Position {
        Position::parse_fen(fen).unwrap()
    }

    #[test]
    fn mate_in_one() {
        let mut position = parse("7k/8/6K1/8/8/8/8/R7 w - - 0 1");
        let original = position.clone();
        let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(2)).unwrap();

        assert_eq!(position, original);
        assert_eq!((result.best_move.from(), result.best_move.to()), (A1, A8));
        assert_eq!(result.score, Cp::CHECKMATE + Cp(1));
        assert_eq!(result.mate_in(), Some(1));
        assert_eq!(result.leading(), Some(Color::White));

        position.make_move(result.best_move);
        assert!(position.is_checkmate());
    }

    #[test]
    fn mate_in_one_for_black() {
        let mut position = parse("r7/8/8/8/8/6k1/8/7K b - - 0 1");
        let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(2)).unwrap();

        assert_eq!(result.best_move.to(), A1);
        assert_eq!(result.mate_in(), Some(1));
        assert_eq!(result.leading(), Some(Color::Black));
        assert!(result.absolute_score() < Cp(0));
    }

    #[test]
    fn no_moves_no_result() {
        let mut mated = parse("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        let mut stalemated = parse("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let timer = Timer::unlimited();
        assert_eq!(choose_move(&mut mated, &timer, DepthPolicy::default()), None);
        assert_eq!(choose_move(&mut stalemated, &timer, DepthPolicy::default()), None);
    }

    #[test]
    fn wins_hanging_queen() {
        let mut position = parse("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(3)).unwrap();
        assert_eq!((result.best_move.from(), result.best_move.to()), (E4, D5));
        assert!(result.score > Cp(0));
        assert!(result.nodes >= result.q_nodes);
    }

    #[test]
    fn single_legal_move() {
        // The king can only escape check by taking the rook on b2.
        let mut position = parse("k7/8/8/8/8/8/1r6/K6r w - - 0 1");
        let moves = position.get_legal_moves();
        let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(1)).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(result.best_move, moves[0]);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn lost_position_plays_first_ordered_move() {
        // The pinned knight cannot move, and both king moves lose heavily.
        let mut position = parse("7k/8/8/8/3n4/8/8/QQ2K3 b - - 0 1");
        let first = order_moves(position.get_legal_moves())[0];
        let result = choose_move(&mut position, &Timer::unlimited(), DepthPolicy::Fixed(2)).unwrap();

        assert_eq!(result.best_move, first);
        assert!(result.score <= ROOT_FLOOR);
        assert_eq!(result.leading(), Some(Color::White));
    }
}
