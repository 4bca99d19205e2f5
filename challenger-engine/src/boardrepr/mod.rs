//! Chess board piece placement representations.
//!
//! A position keeps both forms in sync: piece sets answer "where are the white rooks",
//! the mailbox answers "what stands on e4".
mod mailbox;
mod piece_sets;

pub use mailbox::Mailbox;
pub use piece_sets::PieceSets;
