//! MoveList types used in Challenger engine.
//!
//! The underlying type of MoveList may change at any time during
//! pre-1.0 development, so a MoveList type alias makes changes easy.

use arrayvec::ArrayVec;

use crate::coretypes::Move;

/// Capacity of a MoveList.
/// No legal chess position has more than 218 moves. Pseudo-legal generation
/// may briefly hold a few more before the legality filter runs.
pub const MOVE_LIST_CAPACITY: usize = 256;

/// Fixed capacity list of moves, stored inline without allocating.
pub type MoveList = ArrayVec<Move, MOVE_LIST_CAPACITY>;
