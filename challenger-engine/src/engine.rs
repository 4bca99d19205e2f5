//! Engine struct acts as a simplified API for the various parts of the Challenger engine.

use crate::search::{self, DepthPolicy, SearchResult};
use crate::timeman::Timer;
use crate::Position;

/// EngineBuilder allows for parameters of an Engine to be set and built once.
///
/// Default values:
///
/// * `position`: Starting chess position
/// * `policy`: `DepthPolicy::Fixed(6)`
/// * `debug`: false
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    position: Position,
    policy: DepthPolicy,
    debug: bool,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            position: Position::start_position(),
            policy: DepthPolicy::default(),
            debug: false,
        }
    }

    /// Create and return a new Engine.
    pub fn build(&self) -> Engine {
        Engine {
            position: self.position.clone(),
            policy: self.policy,
            debug: self.debug,
        }
    }

    /// Set the Engine's initial position.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set how the engine picks its search depth.
    pub fn policy(mut self, policy: DepthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set whether the engine begins in debug mode.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine holds the position of the game being played and the depth policy used
/// to search it. The position keeps every earlier position of the game, so
/// repetitions are recognized during search.
#[derive(Debug, Clone)]
pub struct Engine {
    position: Position,
    policy: DepthPolicy,
    debug: bool,
}

impl Engine {
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Returns reference to current position of engine.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Set the position for evaluation.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_policy(&mut self, policy: DepthPolicy) {
        self.policy = policy;
    }

    /// Update the engine's debug parameter.
    pub fn set_debug(&mut self, new_debug: bool) {
        self.debug = new_debug;
    }

    /// Informs engine that next search will be from a new game.
    pub fn new_game(&mut self) {
        self.position = Position::start_position();
    }

    /// Search any position with the engine's depth policy.
    /// Returns None if the player to move has no legal moves.
    pub fn search(&self, position: &mut Position, timer: &Timer) -> Option<SearchResult> {
        search::choose_move(position, timer, self.policy)
    }

    /// Search the engine's own position. `policy` overrides the engine's policy
    /// for this search only.
    pub fn search_current(
        &mut self,
        timer: &Timer,
        policy: Option<DepthPolicy>,
    ) -> Option<SearchResult> {
        let policy = policy.unwrap_or(self.policy);
        search::choose_move(&mut self.position, timer, policy)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
