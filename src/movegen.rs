/*
  Windmill, a UCI-compatible chess engine.
  Copyright (C) 2024 The Windmill Authors (see AUTHORS.md file)

  Windmill is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Windmill is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Generation of exactly the legal moves in a position.
//!
//! Legality is enforced while generating, not by filtering afterward.
//! Two masks do most of the work: the *checkmask* (where a non-king
//! piece may land at all: everywhere when not in check, only blocking or
//! capturing squares in single check, nowhere in double check) and the
//! *pinmasks* (the rays which pinned pieces must stay on, split into a
//! diagonal and an orthogonal board). King moves are filtered against
//! the opponent's attacks computed with our king lifted off the board,
//! so the king cannot retreat along the very ray that checks him.

use crate::{magic::ATTACKS, CastleSwap, GameState, Move, MoveKind, Rights};

use super::{Bitboard, Color, Direction, Piece, Position, Square};

use std::mem::transmute;

/// For each square, the set of squares a knight there attacks.
pub const KNIGHT_ATTACKS: [Bitboard; 64] = create_step_attacks(&Direction::KNIGHT_STEPS, 2);

/// For each square, the set of squares a king there attacks.
pub const KING_ATTACKS: [Bitboard; 64] = create_step_attacks(&Direction::KING_STEPS, 1);

/// For each square, the squares a pawn there attacks; the outer index is
/// the pawn's color.
pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    create_step_attacks(&[Direction::NORTHEAST, Direction::NORTHWEST], 1),
    create_step_attacks(&[Direction::SOUTHEAST, Direction::SOUTHWEST], 1),
];

/// Get the attacks made by moving in each of `dirs` from each square.
/// Steps that would travel a Chebyshev distance above `max_dist` have
/// wrapped around a board edge and are excluded.
const fn create_step_attacks(dirs: &[Direction], max_dist: u8) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut i = 0;
    #[allow(clippy::cast_possible_truncation)]
    while i < attacks.len() {
        // SAFETY: `i` is always less than 64.
        let sq: Square = unsafe { transmute(i as u8) };
        let mut j = 0;
        #[allow(clippy::cast_sign_loss)]
        while j < dirs.len() {
            let target = (sq as i8) + dirs[j].0;
            if 0 <= target && target < 64 {
                // SAFETY: bounds were checked above.
                let target_sq: Square = unsafe { transmute(target as u8) };
                if target_sq.chebyshev_to(sq) <= max_dist {
                    attacks[i] = attacks[i].with_square(target_sq);
                }
            }
            j += 1;
        }
        i += 1;
    }

    attacks
}

#[must_use]
/// Get the legal moves available to `us` in `state`. The order of the
/// returned moves is not specified.
///
/// # Examples
///
/// ```
/// use windmill::{movegen::get_moves, Color, GameState};
///
/// let state = GameState::default();
/// assert_eq!(get_moves(&state, Color::White).len(), 20);
/// ```
pub fn get_moves(state: &GameState, us: Color) -> Vec<Move> {
    let pos = &state.position;
    let them = !us;
    let allies = pos.side(us);
    let occupancy = pos.occupied();
    let king_sq = pos.king_square(us);

    let mut moves = Vec::with_capacity(50);

    let unsafe_sqs = king_unsafe_squares(pos, us);

    // The king moves regardless of checks, as long as it steps off the
    // unsafe squares.
    emit_targets(
        &mut moves,
        pos,
        them,
        king_sq,
        KING_ATTACKS[king_sq as usize] & !allies & !unsafe_sqs,
        Piece::King,
    );

    let checkers = square_attackers(pos, king_sq, them, occupancy);
    if checkers.more_than_one() {
        // in double check, nothing but a king move can help
        return moves;
    }

    let checkmask = if checkers.is_empty() {
        Bitboard::ALL
    } else {
        // single check: land on the path between king and checker, or
        // on the checker itself
        // SAFETY: `checkers` was checked to be nonempty.
        let checker_sq = unsafe { Square::unsafe_from(checkers) };
        Bitboard::between(king_sq, checker_sq) | checkers
    };

    let (pin_diag, pin_ortho) = pinmasks(pos, us, king_sq);
    let pinned = pin_diag | pin_ortho;

    // pinned knights can never move: no knight jump stays on a ray
    for from_sq in pos.pieces(us, Piece::Knight) & !pinned {
        emit_targets(
            &mut moves,
            pos,
            them,
            from_sq,
            KNIGHT_ATTACKS[from_sq as usize] & !allies & checkmask,
            Piece::Knight,
        );
    }

    let queens = pos.pieces(us, Piece::Queen);

    // diagonal movers: an orthogonally-pinned one has no diagonal moves
    // at all, and a diagonally-pinned one must stay on the pin rays
    let diag_movers = pos.pieces(us, Piece::Bishop) | queens;
    for from_sq in diag_movers & !pinned {
        let kind = slider_kind(queens, from_sq, Piece::Bishop);
        emit_targets(
            &mut moves,
            pos,
            them,
            from_sq,
            ATTACKS.bishop(occupancy, from_sq) & !allies & checkmask,
            kind,
        );
    }
    for from_sq in diag_movers & pin_diag {
        let kind = slider_kind(queens, from_sq, Piece::Bishop);
        emit_targets(
            &mut moves,
            pos,
            them,
            from_sq,
            ATTACKS.bishop(occupancy, from_sq) & !allies & checkmask & pin_diag,
            kind,
        );
    }

    // orthogonal movers, symmetrically
    let ortho_movers = pos.pieces(us, Piece::Rook) | queens;
    for from_sq in ortho_movers & !pinned {
        let kind = slider_kind(queens, from_sq, Piece::Rook);
        emit_targets(
            &mut moves,
            pos,
            them,
            from_sq,
            ATTACKS.rook(occupancy, from_sq) & !allies & checkmask,
            kind,
        );
    }
    for from_sq in ortho_movers & pin_ortho {
        let kind = slider_kind(queens, from_sq, Piece::Rook);
        emit_targets(
            &mut moves,
            pos,
            them,
            from_sq,
            ATTACKS.rook(occupancy, from_sq) & !allies & checkmask & pin_ortho,
            kind,
        );
    }

    pawn_moves(
        &mut moves,
        state,
        us,
        king_sq,
        checkmask,
        pin_diag,
        pin_ortho,
    );

    if checkers.is_empty() {
        castles(&mut moves, pos, &state.rights, us, occupancy, unsafe_sqs);
    }

    moves
}

#[must_use]
/// Determine whether `us` is in check in this position.
pub fn in_check(pos: &Position, us: Color) -> bool {
    !square_attackers(pos, pos.king_square(us), !us, pos.occupied()).is_empty()
}

#[must_use]
/// Get the pieces of `color` which attack `sq` under the given
/// occupancy.
pub fn square_attackers(pos: &Position, sq: Square, color: Color, occupancy: Bitboard) -> Bitboard {
    let queens = pos.pieces(color, Piece::Queen);

    // a pawn of `color` attacks `sq` exactly when a pawn of the other
    // color on `sq` would attack the pawn's square
    (PAWN_ATTACKS[!color as usize][sq as usize] & pos.pieces(color, Piece::Pawn))
        | (KNIGHT_ATTACKS[sq as usize] & pos.pieces(color, Piece::Knight))
        | (KING_ATTACKS[sq as usize] & pos.pieces(color, Piece::King))
        | (ATTACKS.rook(occupancy, sq) & (pos.pieces(color, Piece::Rook) | queens))
        | (ATTACKS.bishop(occupancy, sq) & (pos.pieces(color, Piece::Bishop) | queens))
}

#[must_use]
/// Get every square attacked by the opponent of `us`, computed with the
/// king of `us` removed from the occupancy. These are the squares the
/// king may not move to: lifting the king first means a ray that
/// currently ends on him keeps extending through his square, so he
/// cannot step backward along his own check.
pub fn king_unsafe_squares(pos: &Position, us: Color) -> Bitboard {
    let them = !us;
    let occupancy = pos.occupied() ^ pos.pieces(us, Piece::King);
    let queens = pos.pieces(them, Piece::Queen);

    let pawns = pos.pieces(them, Piece::Pawn);
    let mut attacked = match them {
        Color::White => ((pawns & !Bitboard::FILE_H) >> 7) | ((pawns & !Bitboard::FILE_A) >> 9),
        Color::Black => ((pawns & !Bitboard::FILE_A) << 7) | ((pawns & !Bitboard::FILE_H) << 9),
    };

    for sq in pos.pieces(them, Piece::Knight) {
        attacked |= KNIGHT_ATTACKS[sq as usize];
    }
    for sq in pos.pieces(them, Piece::Bishop) | queens {
        attacked |= ATTACKS.bishop(occupancy, sq);
    }
    for sq in pos.pieces(them, Piece::Rook) | queens {
        attacked |= ATTACKS.rook(occupancy, sq);
    }
    attacked |= KING_ATTACKS[pos.king_square(them) as usize];

    attacked
}

/// Compute the diagonal and orthogonal pin rays for the king of `us`.
/// Each ray runs from the king to an enemy slider with exactly one
/// allied piece standing between them, and includes the slider's own
/// square (a pinned piece may capture its pinner).
fn pinmasks(pos: &Position, us: Color, king_sq: Square) -> (Bitboard, Bitboard) {
    let them = !us;
    let allies = pos.side(us);
    let occupancy = pos.occupied();
    let queens = pos.pieces(them, Piece::Queen);

    let mut masks = (Bitboard::EMPTY, Bitboard::EMPTY);

    let diag_snipers =
        ATTACKS.bishop(Bitboard::EMPTY, king_sq) & (pos.pieces(them, Piece::Bishop) | queens);
    let ortho_snipers =
        ATTACKS.rook(Bitboard::EMPTY, king_sq) & (pos.pieces(them, Piece::Rook) | queens);

    for (snipers, mask) in [(diag_snipers, &mut masks.0), (ortho_snipers, &mut masks.1)] {
        for sniper_sq in snipers {
            let ray = Bitboard::between(king_sq, sniper_sq);
            let blockers = ray & occupancy;
            if blockers.has_single_bit() && !(blockers & allies).is_empty() {
                *mask |= ray.with_square(sniper_sq);
            }
        }
    }

    masks
}

/// The kind of the slider on `from_sq`, given the queen board and the
/// non-queen alternative.
fn slider_kind(queens: Bitboard, from_sq: Square, otherwise: Piece) -> Piece {
    if queens.contains(from_sq) {
        Piece::Queen
    } else {
        otherwise
    }
}

/// Append one move per square of `targets`, tagging each as a capture of
/// whatever sits there or as a quiet move of `mover`.
fn emit_targets(
    moves: &mut Vec<Move>,
    pos: &Position,
    them: Color,
    from_sq: Square,
    targets: Bitboard,
    mover: Piece,
) {
    for to_sq in targets {
        let kind = match pos.kind_at(them, to_sq) {
            Some(victim) => MoveKind::Capture(victim),
            None => MoveKind::Quiet(mover),
        };
        moves.push(Move::new(from_sq, to_sq, kind));
    }
}

/// Append all legal pawn moves: pushes, double pushes, captures,
/// promotions, and en passant.
#[allow(clippy::similar_names)]
fn pawn_moves(
    moves: &mut Vec<Move>,
    state: &GameState,
    us: Color,
    king_sq: Square,
    checkmask: Bitboard,
    pin_diag: Bitboard,
    pin_ortho: Bitboard,
) {
    let pos = &state.position;
    let them = !us;
    let pawns = pos.pieces(us, Piece::Pawn);
    let enemies = pos.side(them);
    let occupancy = pos.occupied();
    let unoccupied = !occupancy;
    let promote_rank = us.pawn_promote_rank();
    let forward = us.pawn_direction();

    // Pushes. A diagonally pinned pawn can never push; an orthogonally
    // pinned pawn can push only when it shares the king's file, which
    // keeps it on its pin ray.
    let king_file = Bitboard::FILE_A << king_sq.file() as u8;
    let pushers = pawns & !pin_diag & (!pin_ortho | king_file);
    let mut singles = match us {
        Color::White => pushers >> 8,
        Color::Black => pushers << 8,
    } & unoccupied;
    let doubles = match us {
        Color::White => (singles & us.pawn_relay_rank()) >> 8,
        Color::Black => (singles & us.pawn_relay_rank()) << 8,
    } & unoccupied
        & checkmask;
    singles &= checkmask;

    for to_sq in singles & promote_rank {
        let from_sq = to_sq - forward;
        for kind in Piece::PROMOTING {
            moves.push(Move::new(from_sq, to_sq, MoveKind::Promote(kind)));
        }
    }
    for to_sq in singles & !promote_rank {
        moves.push(Move::new(
            to_sq - forward,
            to_sq,
            MoveKind::Quiet(Piece::Pawn),
        ));
    }
    for to_sq in doubles {
        let from_sq = (to_sq - forward) - forward;
        moves.push(Move::new(from_sq, to_sq, MoveKind::DoublePush));
    }

    // Captures. An orthogonally pinned pawn can never capture; a
    // diagonally pinned one only along its pin rays. The file clamps
    // keep the shifts from wrapping around the board edge.
    let capturable = enemies & checkmask;
    let free = pawns & !pin_ortho & !pin_diag;
    let pinned = pawns & pin_diag;
    // east: toward the h-file
    let (east_dir, west_dir) = match us {
        Color::White => (Direction::NORTHEAST, Direction::NORTHWEST),
        Color::Black => (Direction::SOUTHEAST, Direction::SOUTHWEST),
    };
    let (east_free, east_pinned, west_free, west_pinned) = match us {
        Color::White => (
            (free & !Bitboard::FILE_H) >> 7,
            (pinned & !Bitboard::FILE_H) >> 7,
            (free & !Bitboard::FILE_A) >> 9,
            (pinned & !Bitboard::FILE_A) >> 9,
        ),
        Color::Black => (
            (free & !Bitboard::FILE_H) << 9,
            (pinned & !Bitboard::FILE_H) << 9,
            (free & !Bitboard::FILE_A) << 7,
            (pinned & !Bitboard::FILE_A) << 7,
        ),
    };
    let east_targets = (east_free & capturable) | (east_pinned & capturable & pin_diag);
    let west_targets = (west_free & capturable) | (west_pinned & capturable & pin_diag);

    for (targets, dir) in [(east_targets, east_dir), (west_targets, west_dir)] {
        for to_sq in targets & promote_rank {
            let from_sq = to_sq - dir;
            for kind in Piece::PROMOTING {
                moves.push(Move::new(from_sq, to_sq, MoveKind::Promote(kind)));
            }
        }
        for to_sq in targets & !promote_rank {
            let from_sq = to_sq - dir;
            // SAFETY: a capture target always carries an enemy piece.
            let victim = pos.kind_at(them, to_sq).unwrap();
            moves.push(Move::new(from_sq, to_sq, MoveKind::Capture(victim)));
        }
    }

    // En passant. Rare enough that full simulation is affordable: lift
    // both pawns, drop ours on the target square, and probe the enemy
    // sliders from the king. This covers every discovered-check shape,
    // including the infamous shared-rank double removal.
    if let Some(ep_sq) = state.rights.en_passant {
        let victim_sq = ep_sq - forward;
        let in_mask = checkmask == Bitboard::ALL
            || checkmask.contains(victim_sq)
            || checkmask.contains(ep_sq);
        if in_mask {
            let to_board = Bitboard::from(ep_sq);
            let victim_board = Bitboard::from(victim_sq);
            let enemy_rooks =
                pos.pieces(them, Piece::Rook) | pos.pieces(them, Piece::Queen);
            let enemy_bishops =
                pos.pieces(them, Piece::Bishop) | pos.pieces(them, Piece::Queen);
            for from_sq in PAWN_ATTACKS[them as usize][ep_sq as usize] & pawns {
                let after =
                    occupancy ^ Bitboard::from(from_sq) ^ victim_board ^ to_board;
                if (ATTACKS.rook(after, king_sq) & enemy_rooks).is_empty()
                    && (ATTACKS.bishop(after, king_sq) & enemy_bishops).is_empty()
                {
                    moves.push(Move::new(from_sq, ep_sq, MoveKind::EnPassant));
                }
            }
        }
    }
}

/// Append the legal castling moves. The caller has already established
/// that the king is not in check, so only the crossed squares need to be
/// tested for safety.
fn castles(
    moves: &mut Vec<Move>,
    pos: &Position,
    rights: &Rights,
    us: Color,
    occupancy: Bitboard,
    unsafe_sqs: Bitboard,
) {
    // (gap that must be empty, squares the king crosses, king's landing)
    let (kingside_gap, kingside_cross, kingside_to) = match us {
        Color::White => (
            Bitboard::new(0x6000_0000_0000_0000),
            Bitboard::new(0x6000_0000_0000_0000),
            Square::G1,
        ),
        Color::Black => (Bitboard::new(0x60), Bitboard::new(0x60), Square::G8),
    };
    let (queenside_gap, queenside_cross, queenside_to) = match us {
        Color::White => (
            Bitboard::new(0x0E00_0000_0000_0000),
            Bitboard::new(0x0C00_0000_0000_0000),
            Square::C1,
        ),
        Color::Black => (Bitboard::new(0x0E), Bitboard::new(0x0C), Square::C8),
    };
    let (kingside_swap, queenside_swap) = match us {
        Color::White => (CastleSwap::WHITE_KINGSIDE, CastleSwap::WHITE_QUEENSIDE),
        Color::Black => (CastleSwap::BLACK_KINGSIDE, CastleSwap::BLACK_QUEENSIDE),
    };
    let king_sq = pos.king_square(us);

    if rights.castling.kingside_available(us)
        && (occupancy & kingside_gap).is_empty()
        && (unsafe_sqs & kingside_cross).is_empty()
    {
        moves.push(Move::new(
            king_sq,
            kingside_to,
            MoveKind::Castle(kingside_swap),
        ));
    }

    if rights.castling.queenside_available(us)
        && (occupancy & queenside_gap).is_empty()
        && (unsafe_sqs & queenside_cross).is_empty()
    {
        moves.push(Move::new(
            king_sq,
            queenside_to,
            MoveKind::Castle(queenside_swap),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect the UCI strings of the legal moves of a FEN's position.
    fn move_strings(fen: &str) -> Vec<String> {
        let (state, us) = GameState::from_fen(fen).unwrap();
        get_moves(&state, us).iter().map(|m| m.to_uci()).collect()
    }

    #[test]
    fn step_tables() {
        assert_eq!(KNIGHT_ATTACKS[Square::A8 as usize].len(), 2);
        assert_eq!(KNIGHT_ATTACKS[Square::D4 as usize].len(), 8);
        assert_eq!(KING_ATTACKS[Square::A1 as usize].len(), 3);
        assert_eq!(KING_ATTACKS[Square::E4 as usize].len(), 8);
        // white pawn on e2 attacks d3 and f3
        assert_eq!(
            PAWN_ATTACKS[Color::White as usize][Square::E2 as usize],
            Bitboard::from(Square::D3) | Bitboard::from(Square::F3)
        );
        // pawns on the rim only attack inward
        assert_eq!(
            PAWN_ATTACKS[Color::Black as usize][Square::H4 as usize],
            Bitboard::from(Square::G3)
        );
    }

    #[test]
    fn twenty_moves_from_the_start() {
        assert_eq!(move_strings("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").len(), 20);
    }

    #[test]
    fn no_unsafe_squares_near_the_start_king() {
        let state = GameState::default();
        let unsafe_sqs = king_unsafe_squares(&state.position, Color::White);
        let king_zone =
            KING_ATTACKS[Square::E1 as usize] | Bitboard::from(Square::E1);
        assert_eq!(unsafe_sqs & king_zone, Bitboard::EMPTY);
        assert!(!in_check(&state.position, Color::White));
    }

    #[test]
    fn checkmask_is_the_path_to_the_checker() {
        // white king on c3 checked by a queen on f6
        let (state, us) = GameState::from_fen("7k/8/5q2/8/8/2K5/8/8 w - - 0 1").unwrap();
        let king_sq = state.position.king_square(us);
        let checkers = square_attackers(&state.position, king_sq, !us, state.position.occupied());
        let checkmask = Bitboard::between(king_sq, Square::F6) | checkers;
        assert_eq!(
            checkmask,
            Bitboard::from(Square::D4) | Bitboard::from(Square::E5) | Bitboard::from(Square::F6)
        );
        // six escape squares, nothing else
        let moves = get_moves(&state, us);
        assert_eq!(moves.len(), 6);
        assert!(!moves.iter().any(|m| m.to_square() == Square::B2));
        assert!(!moves.iter().any(|m| m.to_square() == Square::D4));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        // rook on e8 and bishop on a5 both check the king on e1
        let (state, us) = GameState::from_fen("k3r3/8/8/b7/8/8/8/4K3 w - - 0 1").unwrap();
        for m in get_moves(&state, us) {
            assert_eq!(m.from_square(), Square::E1);
        }
    }

    #[test]
    fn pinned_knight_cannot_move() {
        // knight on d2 is pinned to the king on e1 by the bishop on b4
        let (state, us) = GameState::from_fen("4k3/8/8/8/1b6/8/3N4/4K3 w - - 0 1").unwrap();
        assert!(!get_moves(&state, us)
            .iter()
            .any(|m| m.from_square() == Square::D2));
    }

    #[test]
    fn pinned_rook_slides_along_its_pin() {
        // rook on e4 is pinned on the e-file by the rook on e8
        let (state, us) = GameState::from_fen("4r2k/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
        let rook_moves: Vec<Move> = get_moves(&state, us)
            .into_iter()
            .filter(|m| m.from_square() == Square::E4)
            .collect();
        assert_eq!(rook_moves.len(), 6);
        assert!(rook_moves.iter().all(|m| m.to_square().file() == 4));
        assert!(rook_moves
            .iter()
            .any(|m| m.kind() == MoveKind::Capture(Piece::Rook)));
    }

    #[test]
    fn en_passant_removes_the_right_pawn() {
        // black captures g4xf3 en passant; the white pawn sits on f4
        let (state, us) = GameState::from_fen("k7/5p2/K7/8/5Pp1/8/8/8 b - f3 0 1").unwrap();
        let m = Move::from_uci("g4f3", &state, us).unwrap();
        assert_eq!(m.kind(), MoveKind::EnPassant);
        let next = state.make_move(us, m);
        assert!(!next
            .position
            .pieces(Color::White, Piece::Pawn)
            .contains(Square::F4));
        assert!(next
            .position
            .pieces(Color::Black, Piece::Pawn)
            .contains(Square::F3));
    }

    #[test]
    fn en_passant_discovered_check_is_illegal() {
        // capturing exd3 would lift both pawns off the fourth rank and
        // expose the black king on a4 to the queen on h4
        let (state, us) = GameState::from_fen("8/8/8/8/k2Pp2Q/8/8/4K3 b - d3 0 1").unwrap();
        assert!(Move::from_uci("e4d3", &state, us).is_err());
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // white just played c2c4, checking the king on b5; dxc3 en
        // passant removes the checker
        let (state, us) = GameState::from_fen("8/8/8/1k6/2Pp4/8/8/4K3 b - c3 0 1").unwrap();
        let moves = get_moves(&state, us);
        assert!(moves
            .iter()
            .any(|m| m.kind() == MoveKind::EnPassant && m.to_square() == Square::C3));
    }

    #[test]
    fn castling_through_attack_is_absent() {
        // the rook on f8 covers f1, so kingside castling is out;
        // queenside is untouched
        let strings = move_strings("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!strings.contains(&"e1g1".to_string()));
        assert!(strings.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_blocked_by_pieces_is_absent() {
        let strings =
            move_strings("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(!strings.contains(&"e1g1".to_string()));
        assert!(!strings.contains(&"e1c1".to_string()));
    }

    #[test]
    fn both_castles_when_the_path_is_clear() {
        let strings = move_strings("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert!(strings.contains(&"e1g1".to_string()));
        assert!(strings.contains(&"e1c1".to_string()));
    }

    #[test]
    fn promotions_come_in_fours() {
        let (state, us) = GameState::from_fen("8/5P2/2k5/4K3/8/8/8/8 w - - 0 1").unwrap();
        let promotions: Vec<Move> = get_moves(&state, us)
            .into_iter()
            .filter(|m| m.from_square() == Square::F7)
            .collect();
        assert_eq!(promotions.len(), 4);
        for kind in Piece::PROMOTING {
            assert!(promotions
                .iter()
                .any(|m| m.kind() == MoveKind::Promote(kind)));
        }
    }

    #[test]
    fn capture_promotions_clear_the_corner() {
        // white pawn on b7 can promote straight or capture the a8 rook
        let (state, us) = GameState::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = Move::from_uci("b7a8q", &state, us).unwrap();
        assert_eq!(m.kind(), MoveKind::Promote(Piece::Queen));
        let next = state.make_move(us, m);
        assert!(next
            .position
            .pieces(Color::White, Piece::Queen)
            .contains(Square::A8));
        assert!(next.position.pieces(Color::Black, Piece::Rook).is_empty());
    }

    #[test]
    fn kiwipete_has_48_moves() {
        let strings = move_strings(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        );
        assert_eq!(strings.len(), 48);
    }

    #[test]
    fn no_reply_ever_captures_the_king() {
        // the legality property: after any legal move, the opponent has
        // no move onto our king's square
        let (state, us) =
            GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        for m in get_moves(&state, us) {
            let next = state.make_move(us, m);
            let our_king = next.position.king_square(us);
            for reply in get_moves(&next, !us) {
                assert_ne!(reply.to_square(), our_king, "reply to {m} captures the king");
            }
        }
    }
}
