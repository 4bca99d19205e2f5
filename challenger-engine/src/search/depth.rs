//! Depth selection.
//!
//! A search depth is chosen once per root position from how much material is left,
//! how many moves both sides have, and how much time the player to move has.
//! Nothing is re-checked during the search itself.

use std::str::FromStr;

use crate::coretypes::{Color, Move, PieceKind, PlyKind};
use crate::error::{self, ErrorKind};
use crate::timeman::Timer;
use crate::Position;

/// Depth used by `DepthPolicy::default()`.
pub const DEFAULT_DEPTH: PlyKind = 6;

/// Below this many milliseconds the estimated depth is lowered.
const LOW_TIME_MS: u64 = 10_000;
const LOW_TIME_REDUCTION: PlyKind = 2;

/// Steps of (pieces without kings, moves of both sides, depth). A step applies when
/// both counts are below its limits. Later steps override earlier ones.
const DEPTH_STEPS: [(usize, usize, PlyKind); 4] = [(12, 65, 4), (9, 50, 5), (5, 35, 6), (2, 25, 7)];
const BASE_DEPTH: PlyKind = 3;

/// Strategy choosing how deep the root moves are searched.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DepthPolicy {
    /// Always search this many plies. The estimate is still computed and logged.
    Fixed(PlyKind),
    /// Search as deep as `estimate_depth` suggests.
    Heuristic,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_DEPTH)
    }
}

impl FromStr for DepthPolicy {
    type Err = error::Error;

    /// Parses `fixed`, `fixed:<ply>`, or `heuristic`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.split_once(':') {
            None if lower == "fixed" => Ok(Self::default()),
            None if lower == "heuristic" => Ok(Self::Heuristic),
            Some(("fixed", ply)) => ply
                .parse()
                .map(Self::Fixed)
                .map_err(|_| (ErrorKind::DepthPolicyParse, s).into()),
            _ => Err((ErrorKind::DepthPolicyParse, s).into()),
        }
    }
}

impl DepthPolicy {
    /// Depth for a root position, never less than 1.
    /// `root_moves` are the legal moves of the player to move, in search order.
    pub fn select(&self, position: &mut Position, timer: &Timer, root_moves: &[Move]) -> PlyKind {
        let estimate = estimate_depth(position, timer, root_moves);
        log::debug!("Pieces left: {}", estimate.pieces_without_kings);
        log::debug!(
            "legal moves: (This Side) {}, (Total) {}",
            estimate.root_moves,
            estimate.moves_both_sides
        );

        let depth = match *self {
            Self::Fixed(depth) => depth,
            Self::Heuristic => estimate.depth,
        };
        let depth = depth.max(1);
        log::debug!("depth: {depth} ({self:?}, estimated {})", estimate.depth);
        depth
    }
}

/// Inputs and outcome of the depth heuristic for one root position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DepthEstimate {
    /// Pieces of both colors, counting pawns as half a piece and leaving out the kings.
    pub pieces_without_kings: usize,
    /// Legal moves of the player to move.
    pub root_moves: usize,
    /// Root moves plus the opponent's replies to the first root move.
    pub moves_both_sides: usize,
    pub depth: PlyKind,
}

/// Estimates a search depth. Fewer pieces and fewer moves allow a deeper search,
/// and a short clock takes two plies off, to no less than 1.
///
/// The first root move is played and undone to count the opponent's moves.
pub fn estimate_depth(position: &mut Position, timer: &Timer, root_moves: &[Move]) -> DepthEstimate {
    let pawns = position.pieces_of(Color::White, PieceKind::Pawn).len()
        + position.pieces_of(Color::Black, PieceKind::Pawn).len();
    let pieces = position.piece_count(Color::White) + position.piece_count(Color::Black);
    let pieces_without_kings = pieces.saturating_sub(pawns / 2 + 2);

    let mut moves_both_sides = root_moves.len();
    if let Some(&first) = root_moves.first() {
        moves_both_sides += position.play(first).get_legal_moves().len();
    }

    let mut depth = BASE_DEPTH;
    for (piece_limit, move_limit, step_depth) in DEPTH_STEPS {
        if pieces_without_kings < piece_limit && moves_both_sides < move_limit {
            depth = step_depth;
        }
    }
    if timer.milliseconds_remaining() < LOW_TIME_MS {
        depth = depth.saturating_sub(LOW_TIME_REDUCTION).max(1);
    }

    DepthEstimate {
        pieces_without_kings,
        root_moves: root_moves.len(),
        moves_both_sides,
        depth,
    }
}
