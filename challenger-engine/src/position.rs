//! Holds Position struct, the most important data structure for the engine.
//! Position represents a chess position, and the history of reversible state
//! needed to take moves back.

use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};

use crate::bitboard::Bitboard;
use crate::boardrepr::{Mailbox, PieceSets};
use crate::coretypes::{Castling, Color, File, Move, MoveCount, MoveFlag, Piece, PieceKind};
use crate::coretypes::{Color::*, PieceKind::*, Rank, Square};
use crate::error::{self, ErrorKind};
use crate::fen::Fen;
use crate::movegen::{self, en_passant_victim};
use crate::movelist::MoveList;
use crate::zobrist::{zobrist_table, HashKind};

/// Irreversible state of a position, saved before each move is made.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cache {
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) hash: HashKind,
}

/// struct Position
/// A complete data set that can represent any chess position.
/// # Members:
/// * pieces - a piece-centric setwise container of all basic chess piece positions.
/// * mailbox - square-centric view of the same pieces.
/// * player - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Indicates if en passant is possible, and for which square.
/// * halfmoves - Tracker for 50 move draw rule. Resets after capture/pawn move.
/// * fullmoves - Starts at 1, increments after each black player's move.
/// * hash - Zobrist key of the position.
/// * history - saved state of every earlier position, most recent last.
#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) pieces: PieceSets,
    pub(crate) mailbox: Mailbox,
    pub(crate) player: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
    pub(crate) hash: HashKind,
    history: Vec<Cache>,
}

/// Why a game is over.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameResult {
    /// The player of this color is checkmated.
    Mated(Color),
    Stalemate,
    Repetition,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl GameResult {
    /// Color of the winning player, or None for a draw.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Mated(loser) => Some(!*loser),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameResult::Mated(White) => f.write_str("white is mated"),
            GameResult::Mated(Black) => f.write_str("black is mated"),
            GameResult::Stalemate => f.write_str("stalemate"),
            GameResult::Repetition => f.write_str("repetition"),
            GameResult::FiftyMoveRule => f.write_str("fifty move rule"),
            GameResult::InsufficientMaterial => f.write_str("insufficient material"),
        }
    }
}

/// Plays a move on a borrowed position, and takes it back when dropped.
///
/// The guard derefs to the position after the move, so it can be searched further.
/// Undo runs on every exit path, including early returns from a cutoff.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
    move_: Move,
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut mailbox = Mailbox::new();
        for (file, piece_kind) in File::ALL.into_iter().zip(BACK_RANK) {
            mailbox[(file, Rank::R1)] = Some(Piece::new(White, piece_kind));
            mailbox[(file, Rank::R2)] = Some(Piece::new(White, Pawn));
            mailbox[(file, Rank::R7)] = Some(Piece::new(Black, Pawn));
            mailbox[(file, Rank::R8)] = Some(Piece::new(Black, piece_kind));
        }

        Self::from_parts(mailbox, White, Castling::ALL, None, 0, 1)
    }

    /// Build a position with no history from its board and state fields.
    pub(crate) fn from_parts(
        mailbox: Mailbox,
        player: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmoves: MoveCount,
        fullmoves: MoveCount,
    ) -> Self {
        let mut position = Self {
            pieces: PieceSets::from(&mailbox),
            mailbox,
            player,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
            hash: 0,
            history: Vec::new(),
        };
        position.hash = zobrist_table().generate_hash(&position);
        position
    }

    /// Const getters.
    pub fn pieces(&self) -> &PieceSets {
        &self.pieces
    }
    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }
    pub fn player(&self) -> Color {
        self.player
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub fn fullmoves(&self) -> MoveCount {
        self.fullmoves
    }
    pub fn hash(&self) -> HashKind {
        self.hash
    }

    /// Squares of every piece of one kind and color.
    pub fn pieces_of(&self, color: Color, piece_kind: PieceKind) -> Bitboard {
        self.pieces[(color, piece_kind)]
    }

    /// Number of pieces on the board of one color, kings and pawns included.
    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces.color_occupied(color).len()
    }

    /// Square of a player's king.
    ///
    /// Every position holds exactly one king per side: Fen parsing rejects anything
    /// else, and legal moves never capture a king.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces[(color, King)]
            .get_lowest_square()
            .expect("position has one king per side")
    }

    pub fn has_kingside_castle_right(&self, color: Color) -> bool {
        self.castling.has(Castling::king_side(color))
    }

    pub fn has_queenside_castle_right(&self, color: Color) -> bool {
        self.castling.has(Castling::queen_side(color))
    }

    /// Irreversible state of the current position.
    pub(crate) fn cache(&self) -> Cache {
        Cache {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmoves: self.halfmoves,
            hash: self.hash,
        }
    }

    /// Origin and destination of the rook for a castle whose king lands on `king_to`.
    pub(crate) fn castling_rook_squares(king_to: Square) -> (Square, Square) {
        let rank = king_to.rank();
        match king_to.file() {
            File::G => (Square::from((File::H, rank)), Square::from((File::F, rank))),
            _ => (Square::from((File::A, rank)), Square::from((File::D, rank))),
        }
    }

    /// Castling rights lost when a piece leaves or lands on `square`.
    fn castling_rights_lost(square: Square) -> Castling {
        match square {
            Square::E1 => Castling::W_SIDE,
            Square::H1 => Castling::W_KING,
            Square::A1 => Castling::W_QUEEN,
            Square::E8 => Castling::B_SIDE,
            Square::H8 => Castling::B_KING,
            Square::A8 => Castling::B_QUEEN,
            _ => Castling::NONE,
        }
    }

    fn put(&mut self, piece: Piece, square: Square) {
        self.pieces.place(piece, square);
        self.mailbox[square] = Some(piece);
    }

    fn take(&mut self, piece: Piece, square: Square) {
        self.pieces.remove(piece, square);
        self.mailbox[square] = None;
    }

    /// Apply a move to self, in place, saving the state needed to undo it.
    /// `make_move` does not check if the move is legal, `move_` must come from
    /// this position's legal move generation.
    pub fn make_move(&mut self, move_: Move) {
        let cache = self.cache();
        self.history.push(cache);

        let mover = self.player;
        let moved = Piece::new(mover, move_.piece_kind);
        let landed = Piece::new(mover, move_.promotion().unwrap_or(move_.piece_kind));

        self.take(moved, move_.from);
        if let Some(captured_kind) = move_.captured {
            let captured_square = match move_.flag {
                MoveFlag::EnPassant => en_passant_victim(move_.to, mover),
                _ => move_.to,
            };
            self.take(Piece::new(!mover, captured_kind), captured_square);
        }
        self.put(landed, move_.to);

        if move_.flag == MoveFlag::Castle {
            let rook = Piece::new(mover, Rook);
            let (rook_from, rook_to) = Self::castling_rook_squares(move_.to);
            self.take(rook, rook_from);
            self.put(rook, rook_to);
        }

        self.castling.clear(Self::castling_rights_lost(move_.from));
        self.castling.clear(Self::castling_rights_lost(move_.to));

        self.en_passant = match move_.flag {
            MoveFlag::DoublePush => Square::from_u8((move_.from as u8 + move_.to as u8) / 2),
            _ => None,
        };

        if move_.is_unrepeatable() {
            self.halfmoves = 0;
        } else {
            self.halfmoves += 1;
        }
        if mover == Black {
            self.fullmoves += 1;
        }
        self.player = !mover;

        let mut hash = self.hash;
        zobrist_table().update_hash(&mut hash, self, move_, cache);
        self.hash = hash;
    }

    /// Undo the application of a move, in place.
    /// `move_` must be the move most recently made on this position.
    pub fn undo_move(&mut self, move_: Move) {
        let cache = self
            .history
            .pop()
            .expect("undo_move is paired with an earlier make_move");

        let mover = !self.player;
        let moved = Piece::new(mover, move_.piece_kind);
        let landed = Piece::new(mover, move_.promotion().unwrap_or(move_.piece_kind));

        if move_.flag == MoveFlag::Castle {
            let rook = Piece::new(mover, Rook);
            let (rook_from, rook_to) = Self::castling_rook_squares(move_.to);
            self.take(rook, rook_to);
            self.put(rook, rook_from);
        }

        self.take(landed, move_.to);
        if let Some(captured_kind) = move_.captured {
            let captured_square = match move_.flag {
                MoveFlag::EnPassant => en_passant_victim(move_.to, mover),
                _ => move_.to,
            };
            self.put(Piece::new(!mover, captured_kind), captured_square);
        }
        self.put(moved, move_.from);

        if mover == Black {
            self.fullmoves -= 1;
        }
        self.player = mover;
        self.castling = cache.castling;
        self.en_passant = cache.en_passant;
        self.halfmoves = cache.halfmoves;
        self.hash = cache.hash;
    }

    /// Make a move that is taken back when the returned guard is dropped.
    pub fn play(&mut self, move_: Move) -> MoveGuard<'_> {
        self.make_move(move_);
        MoveGuard {
            position: self,
            move_,
        }
    }

    /// Returns a list of all legal moves for active player.
    pub fn get_legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Returns all legal moves of the active player that capture a piece.
    pub fn get_legal_captures(&self) -> MoveList {
        movegen::legal_captures(self)
    }

    /// Returns true if active player's king is attacked.
    pub fn is_in_check(&self) -> bool {
        movegen::is_attacked(self, self.king_square(self.player), !self.player)
    }

    /// Returns true if active player is in check and has no legal moves.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.get_legal_moves().is_empty()
    }

    /// Returns true if active player is not in check and has no legal moves.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.get_legal_moves().is_empty()
    }

    /// Returns true if the game is drawn, by rule or by stalemate.
    pub fn is_draw(&self) -> bool {
        self.is_draw_by_rule() || self.is_stalemate()
    }

    /// Draws that do not depend on move generation:
    /// repetition, fifty-move rule, and insufficient material.
    pub fn is_draw_by_rule(&self) -> bool {
        self.is_repetition() || self.is_fifty_move_draw() || self.is_insufficient_material()
    }

    /// Returns how the game ended at this position, or None if it goes on.
    /// Checkmate takes precedence over every draw.
    pub fn game_result(&self) -> Option<GameResult> {
        if self.get_legal_moves().is_empty() {
            return Some(match self.is_in_check() {
                true => GameResult::Mated(self.player),
                false => GameResult::Stalemate,
            });
        }
        if self.is_repetition() {
            Some(GameResult::Repetition)
        } else if self.is_fifty_move_draw() {
            Some(GameResult::FiftyMoveRule)
        } else if self.is_insufficient_material() {
            Some(GameResult::InsufficientMaterial)
        } else {
            None
        }
    }

    /// Returns true if the current position occurred before, since the last
    /// capture or pawn move.
    pub fn is_repetition(&self) -> bool {
        self.history
            .iter()
            .rev()
            .take(self.halfmoves as usize)
            .any(|cache| cache.hash == self.hash)
    }

    /// Returns true after 100 plies without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmoves >= 100
    }

    /// Returns true if neither player can possibly deliver checkmate:
    /// bare kings, a single minor piece, or one bishop each on same colored squares.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = [Pawn, Rook, Queen].into_iter().any(|piece_kind| {
            !(self.pieces[(White, piece_kind)] | self.pieces[(Black, piece_kind)]).is_empty()
        });
        if heavy_or_pawn {
            return false;
        }

        let knights = self.pieces[(White, Knight)].len() + self.pieces[(Black, Knight)].len();
        let white_bishops = self.pieces[(White, Bishop)];
        let black_bishops = self.pieces[(Black, Bishop)];
        if knights + white_bishops.len() + black_bishops.len() <= 1 {
            return true;
        }

        let bishops = white_bishops | black_bishops;
        knights == 0
            && white_bishops.len() == 1
            && black_bishops.len() == 1
            && (bishops & Bitboard::DARK_SQUARES == bishops
                || bishops & Bitboard::LIGHT_SQUARES == bishops)
    }

    /// Returns the position with ranks mirrored and colors swapped.
    /// The flipped position has no history.
    pub fn color_flip(&self) -> Self {
        let mut mailbox = Mailbox::new();
        for square in Square::iter() {
            mailbox[square.flip_rank()] =
                self.mailbox[square].map(|piece| Piece::new(!piece.color, piece.piece_kind));
        }
        let position = Self::from_parts(
            mailbox,
            !self.player,
            self.castling.color_flip(),
            self.en_passant.map(|square| square.flip_rank()),
            self.halfmoves,
            self.fullmoves,
        );
        debug_assert_eq!(position.pieces, self.pieces.color_flip());
        position
    }

    /// Find the legal move written as `input` in pure coordinate notation, such as `e2e4` or `e7e8q`.
    pub fn parse_move(&self, input: &str) -> error::Result<Move> {
        self.get_legal_moves()
            .into_iter()
            .find(|move_| move_.to_string() == input)
            .ok_or_else(|| (ErrorKind::IllegalMove, input).into())
    }
}

/// Positions are equal when their boards and states are equal, regardless of how they were reached.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.mailbox == other.mailbox
            && self.player == other.player
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmoves == other.halfmoves
            && self.fullmoves == other.fullmoves
            && self.hash == other.hash
    }
}

impl Eq for Position {}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays pretty-printed chess board and Fen string representing Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}Fen: {}", self.mailbox.pretty(), self.to_fen())
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;
    fn deref(&self) -> &Self::Target {
        self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.position.undo_move(self.move_);
    }
}
