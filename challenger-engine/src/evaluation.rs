//! Evaluation functions that return a centipawn.
//!
//! Every term is scored for one color at a time. `evaluate` combines both colors
//! and reports the difference from the perspective of the player to move.

use crate::coretypes::{Color, Cp, CpKind, PieceKind, PieceKind::*};
use crate::movegen::tables::{center_manhattan_distance, rook_distance};
use crate::position::Position;
use crate::pst;

impl PieceKind {
    /// Default, color independent value per piece.
    /// The king is never traded, so it carries no material value.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            Pawn => 100,
            Knight => 300,
            Bishop => 300,
            Rook => 500,
            Queen => 900,
            King => 0,
        })
    }
}

/// Non-pawn material of one side at which its endgame phase begins: two rooks and two minors.
pub const ENDGAME_MATERIAL_START: Cp =
    Cp(Rook.centipawns().0 * 2 + Bishop.centipawns().0 + Knight.centipawns().0);

/// A material lead larger than this switches on the mop-up term.
const MOP_UP_MARGIN: Cp = Cp(Pawn.centipawns().0 * 2);

/// Largest rook distance between two squares, corner to opposite corner.
const MAX_ROOK_DISTANCE: CpKind = 14;

/// Primary evaluate function for engine.
/// A positive value is an advantage for the player to move.
pub fn evaluate(position: &Position) -> Cp {
    let num_moves = position.get_legal_moves().len();
    let white = side_score(position, Color::White, num_moves);
    let black = side_score(position, Color::Black, num_moves);

    (white - black) * position.player().sign()
}

/// Everything one color scores, before it is compared to the other color.
fn side_score(position: &Position, color: Color, num_moves: usize) -> Cp {
    let my_material = material(position, color);
    let opponent_material = material(position, !color);
    let opponent_weight = endgame_phase_weight(non_pawn_material(position, !color));

    my_material
        + castling_rights(position, color)
        + mobility(position, color, num_moves)
        + mop_up(position, color, my_material, opponent_material, opponent_weight)
        + piece_square(position, color, opponent_weight)
}

/// Sum of piece values of one color.
pub fn material(position: &Position, color: Color) -> Cp {
    PieceKind::ALL
        .into_iter()
        .map(|piece_kind| piece_kind.centipawns() * position.pieces_of(color, piece_kind).len() as CpKind)
        .fold(Cp::default(), |acc, value| acc + value)
}

/// Material of one color without its pawns.
pub fn non_pawn_material(position: &Position, color: Color) -> Cp {
    material(position, color) - Pawn.centipawns() * position.pieces_of(color, Pawn).len() as CpKind
}

/// Keeping a castling right is rewarded, losing it is penalized.
pub fn castling_rights(position: &Position, color: Color) -> Cp {
    let kingside = match position.has_kingside_castle_right(color) {
        true => Cp(20),
        false => Cp(-15),
    };
    let queenside = match position.has_queenside_castle_right(color) {
        true => Cp(15),
        false => Cp(-10),
    };
    kingside + queenside
}

/// Only the player to move is credited with its number of legal moves.
pub fn mobility(position: &Position, color: Color, num_moves: usize) -> Cp {
    match position.player() == color {
        true => Cp(num_moves as CpKind),
        false => Cp(0),
    }
}

/// How far a side has progressed into its endgame, from 0.0 with full material
/// to 1.0 once only king and pawns remain.
pub fn endgame_phase_weight(non_pawn_material: Cp) -> f32 {
    1.0 - f32::min(1.0, non_pawn_material.0 as f32 / ENDGAME_MATERIAL_START.0 as f32)
}

/// Reward for the materially winning side for driving the opponent king to the
/// edge and approaching it with its own king.
/// Zero unless `color` leads by more than two pawns and the opponent has entered its endgame.
pub fn mop_up(
    position: &Position,
    color: Color,
    my_material: Cp,
    opponent_material: Cp,
    opponent_weight: f32,
) -> Cp {
    if my_material <= opponent_material + MOP_UP_MARGIN || opponent_weight <= 0.0 {
        return Cp(0);
    }

    let my_king = position.king_square(color);
    let opponent_king = position.king_square(!color);

    let score = 10 * center_manhattan_distance(opponent_king) as CpKind
        + 4 * (MAX_ROOK_DISTANCE - rook_distance(my_king, opponent_king) as CpKind);

    Cp((score as f32 * opponent_weight) as CpKind)
}

/// Piece-square bonus of every piece of one color.
/// The king's table is faded out as the opponent runs out of material.
pub fn piece_square(position: &Position, color: Color, opponent_weight: f32) -> Cp {
    let mut value: CpKind = 0;
    for piece_kind in [Pawn, Knight, Bishop, Rook, Queen] {
        let table = pst::table(piece_kind);
        for square in position.pieces_of(color, piece_kind) {
            value += pst::read(table, square, color);
        }
    }

    let king_middle = pst::read(&pst::KING_MIDDLE, position.king_square(color), color);
    value += (king_middle as f32 * (1.0 - opponent_weight)) as CpKind;

    Cp(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn parse(fen: &str) -> Position {
        Position::parse_fen(fen).unwrap()
    }

    #[test]
    fn start_position_terms() {
        let position = Position::start_position();
        let num_moves = position.get_legal_moves().len();

        assert_eq!(material(&position, Color::White), Cp(3900));
        assert_eq!(material(&position, Color::Black), Cp(3900));
        assert_eq!(castling_rights(&position, Color::White), Cp(35));
        assert_eq!(castling_rights(&position, Color::Black), Cp(35));
        assert_eq!(mobility(&position, Color::White, num_moves), Cp(20));
        assert_eq!(mobility(&position, Color::Black, num_moves), Cp(0));
        assert_eq!(endgame_phase_weight(non_pawn_material(&position, Color::Black)), 0.0);
        assert_eq!(piece_square(&position, Color::White, 0.0), Cp(-95));
        assert_eq!(piece_square(&position, Color::Black, 0.0), Cp(-95));

        // Everything cancels except the mover's mobility.
        assert_eq!(evaluate(&position), Cp(20));
    }

    #[test]
    fn castling_rights_penalty() {
        let position = parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
        assert_eq!(castling_rights(&position, Color::White), Cp(20 - 10));
        assert_eq!(castling_rights(&position, Color::Black), Cp(-15 + 15));
    }

    #[test]
    fn endgame_phase_weights() {
        assert_eq!(endgame_phase_weight(Cp(0)), 1.0);
        assert_eq!(endgame_phase_weight(Cp(800)), 0.5);
        assert_eq!(endgame_phase_weight(ENDGAME_MATERIAL_START), 0.0);
        assert_eq!(endgame_phase_weight(Cp(3100)), 0.0);
    }

    #[test]
    fn evaluation_is_color_symmetric() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "6k1/8/8/8/8/8/3R4/3K4 b - - 0 1",
            "r1bq1rk1/ppp2ppp/2n5/3np3/2B5/2NP1N2/PPP2PPP/R2QK2R w KQ - 0 8",
        ] {
            let position = parse(fen);
            assert_eq!(evaluate(&position), evaluate(&position.color_flip()), "{fen}");
        }
    }

    #[test]
    fn mop_up_gating() {
        // White is up a rook, Black has only its king.
        let position = parse("7k/8/8/8/8/8/4P3/R3K3 w - - 0 1");
        let white = material(&position, Color::White);
        let black = material(&position, Color::Black);
        let black_weight = endgame_phase_weight(non_pawn_material(&position, Color::Black));
        assert_eq!(black_weight, 1.0);

        let full = mop_up(&position, Color::White, white, black, black_weight);
        let half = mop_up(&position, Color::White, white, black, 0.5);
        assert!(full > Cp(0));
        assert_eq!(half, Cp((full.0 as f32 * 0.5) as CpKind));

        // No mop-up for the losing side, for an opponent still in its middlegame,
        // or for a lead of exactly two pawns.
        assert_eq!(mop_up(&position, Color::Black, black, white, 1.0), Cp(0));
        assert_eq!(mop_up(&position, Color::White, white, black, 0.0), Cp(0));
        assert_eq!(mop_up(&position, Color::White, Cp(300), Cp(100), 1.0), Cp(0));
        assert!(mop_up(&position, Color::White, Cp(301), Cp(100), 1.0) > Cp(0));
    }

    #[test]
    fn mop_up_prefers_cornered_king() {
        let cornered = parse("7k/8/8/8/8/8/4P3/R3K3 w - - 0 1");
        let centered = parse("8/8/8/4k3/8/8/4P3/R3K3 w - - 0 1");
        let score = |position: &Position| {
            mop_up(
                position,
                Color::White,
                material(position, Color::White),
                material(position, Color::Black),
                1.0,
            )
        };
        // h8: distance 6 from the center, e1 to h8 is 10 rook steps.
        assert_eq!(score(&cornered), Cp(10 * 6 + 4 * (14 - 10)));
        // e5 is a center square, e1 to e5 is 4 rook steps.
        assert_eq!(score(&centered), Cp(4 * (14 - 4)));
        assert!(score(&cornered) > score(&centered));
    }

    #[test]
    fn king_table_fades_in_endgame() {
        // White king on g1 earns its castled bonus only while Black has material.
        let middlegame = parse("r2qk2r/8/8/8/8/8/8/6K1 w - - 0 1");
        let endgame = parse("4k3/8/8/8/8/8/8/6K1 w - - 0 1");
        assert_eq!(piece_square(&middlegame, Color::White, 0.0), Cp(30));
        assert_eq!(piece_square(&endgame, Color::White, 1.0), Cp(0));
        assert_eq!(piece_square(&endgame, Color::White, 0.5), Cp(15));
    }
}
