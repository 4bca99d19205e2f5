//! Time Management
//!
//! The engine reads the clock once, before a search starts, to pick a depth.
//! Nothing inside the search checks the time.

use std::time::Duration;

use crate::coretypes::Color;

/// Snapshot of the time the player to move has left on its clock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Timer {
    remaining: Duration,
}

impl Timer {
    pub const fn from_millis(milliseconds: u64) -> Self {
        Self {
            remaining: Duration::from_millis(milliseconds),
        }
    }

    /// Timer of the player to move, from both players' clocks.
    pub const fn for_player(wtime: Duration, btime: Duration, player: Color) -> Self {
        let remaining = match player {
            Color::White => wtime,
            Color::Black => btime,
        };
        Self { remaining }
    }

    /// A clock that never runs low, for analysis without time control.
    pub const fn unlimited() -> Self {
        Self {
            remaining: Duration::MAX,
        }
    }

    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Remaining time, saturating at `u64::MAX` milliseconds.
    pub fn milliseconds_remaining(&self) -> u64 {
        u64::try_from(self.remaining.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::unlimited()
    }
}
