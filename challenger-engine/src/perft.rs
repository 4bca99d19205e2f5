//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::ops::{Add, AddAssign};
use std::panic;
use std::sync::Mutex;
use std::thread;

use crate::coretypes::{Move, PlyKind};
use crate::movelist::MoveList;
use crate::position::Position;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

/// Count the number of nodes at a certain depth.
/// This ignores higher terminal nodes.
/// In other words, it counts the number of paths to the given depth.
///
/// With more than one thread, root moves are handed out one at a time to
/// workers that each search their own copy of the position.
pub fn perft(position: &Position, ply: PlyKind, threads: usize) -> PerftInfo {
    if ply == 0 {
        return PerftInfo::new(1);
    }
    if ply <= 2 || threads <= 1 {
        return perft_recurse(&mut position.clone(), ply);
    }

    let moves = Mutex::new(position.get_legal_moves());
    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| scope.spawn(|| perft_executor(position.clone(), ply, &moves)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|cause| panic::resume_unwind(cause)))
            .fold(PerftInfo::default(), Add::add)
    })
}

/// Perft of the position after each legal move, one ply shallower than `ply`.
/// Useful for finding which branch a move generator miscounts.
pub fn divide(position: &Position, ply: PlyKind) -> Vec<(Move, PerftInfo)> {
    let mut position = position.clone();
    let ply = ply.max(1);
    position
        .get_legal_moves()
        .into_iter()
        .map(|move_| {
            let child = &mut position.play(move_);
            let info = match ply {
                1 => PerftInfo::new(1),
                _ => perft_recurse(child, ply - 1),
            };
            (move_, info)
        })
        .collect()
}

/// Steals one root move at a time until none are left.
fn perft_executor(mut position: Position, ply: PlyKind, moves: &Mutex<MoveList>) -> PerftInfo {
    debug_assert!(ply > 1);
    let mut perft_info = PerftInfo::default();
    while let Some(move_) = next_move(moves) {
        perft_info += perft_recurse(&mut position.play(move_), ply - 1);
    }
    perft_info
}

fn next_move(moves: &Mutex<MoveList>) -> Option<Move> {
    moves.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).pop()
}

/// Ply must be non-zero.
fn perft_recurse(position: &mut Position, ply: PlyKind) -> PerftInfo {
    debug_assert_ne!(ply, 0);
    let legal_moves = position.get_legal_moves();
    if ply == 1 {
        // Bulk count the final ply.
        return PerftInfo::new(legal_moves.len() as u64);
    }

    let mut perft_info = PerftInfo::default();
    for legal_move in legal_moves {
        perft_info += perft_recurse(&mut position.play(legal_move), ply - 1);
    }
    perft_info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn start_position_shallow() {
        let position = Position::start_position();
        assert_eq!(perft(&position, 0, 1).nodes, 1);
        assert_eq!(perft(&position, 1, 1).nodes, 20);
        assert_eq!(perft(&position, 2, 1).nodes, 400);
        assert_eq!(perft(&position, 3, 1).nodes, 8_902);
    }

    #[test]
    fn threads_agree() {
        let position = Position::parse_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let single = perft(&position, 3, 1);
        let threaded = perft(&position, 3, 4);
        assert_eq!(single, threaded);
        assert_eq!(single.nodes, 97_862);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::start_position();
        let branches = divide(&position, 3);
        let total = branches.iter().map(|(_, info)| *info).fold(PerftInfo::default(), Add::add);

        assert_eq!(branches.len(), 20);
        assert_eq!(total, perft(&position, 3, 1));
        assert!(divide(&position, 1).iter().all(|(_, info)| info.nodes == 1));
    }
}
