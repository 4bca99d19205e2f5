//! Challenger Engine
//!
//! A chess move chooser: a fail-hard alpha-beta negamax search over a
//! bitboard position, extended by a captures-only quiescence search and
//! guided by a tapered material, piece-square and mop-up evaluation.
//!
//! `search::choose_move` is the entry point. `engine` and `uci` wrap it
//! for use by a UCI front end.

pub mod bitboard;
pub mod boardrepr;
pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub(crate) mod movegen;
pub mod movelist;
pub mod moveorder;
pub mod perft;
pub mod position;
pub mod pst;
pub mod search;
pub mod timeman;
pub mod uci;
pub mod zobrist;

pub use engine::{Engine, EngineBuilder};
pub use position::{GameResult, Position};
