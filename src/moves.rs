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

//! Definitions of moves, which can describe any legal playable move.

use crate::{movegen, Color, GameState};

use super::{Bitboard, Piece, Square};

use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The two squares toggled by one half of a castling move. Both boards
/// carry exactly two set bits, and applying a castle is two XORs: one
/// into the king's bitboard and one into the rook's.
pub struct CastleSwap {
    /// The king's origin and destination.
    pub king: Bitboard,
    /// The rook's origin and destination.
    pub rook: Bitboard,
}

impl CastleSwap {
    /// White castling kingside: the king toggles e1/g1 and the rook
    /// toggles h1/f1.
    pub const WHITE_KINGSIDE: CastleSwap = CastleSwap {
        king: Bitboard::new(0x5000_0000_0000_0000),
        rook: Bitboard::new(0xA000_0000_0000_0000),
    };

    /// White castling queenside: the king toggles e1/c1 and the rook
    /// toggles a1/d1.
    pub const WHITE_QUEENSIDE: CastleSwap = CastleSwap {
        king: Bitboard::new(0x1400_0000_0000_0000),
        rook: Bitboard::new(0x0900_0000_0000_0000),
    };

    /// Black castling kingside: the king toggles e8/g8 and the rook
    /// toggles h8/f8.
    pub const BLACK_KINGSIDE: CastleSwap = CastleSwap {
        king: Bitboard::new(0x0000_0000_0000_0050),
        rook: Bitboard::new(0x0000_0000_0000_00A0),
    };

    /// Black castling queenside: the king toggles e8/c8 and the rook
    /// toggles a8/d8.
    pub const BLACK_QUEENSIDE: CastleSwap = CastleSwap {
        king: Bitboard::new(0x0000_0000_0000_0014),
        rook: Bitboard::new(0x0000_0000_0000_0009),
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// What a move does beyond relocating a piece. Every consumer matches on
/// this exhaustively; there are no catch-all arms anywhere in the
/// engine.
pub enum MoveKind {
    /// A non-capturing, non-special move, carrying the moving piece's
    /// kind.
    Quiet(Piece),
    /// A capture, carrying the kind of the piece being captured.
    Capture(Piece),
    /// A two-rank pawn push, which creates an en-passant target square.
    DoublePush,
    /// A pawn capturing en passant; the captured pawn stands one rank
    /// behind the destination square.
    EnPassant,
    /// Castling, carrying the XOR masks for the king and rook.
    Castle(CastleSwap),
    /// A pawn reaching the last rank, carrying the kind promoted to.
    /// Promotions that capture are covered here as well: applying a
    /// promotion clears any opposing piece on the destination.
    Promote(Piece),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The information of one move: its origin and destination as one-bit
/// bitboards, and the tag describing how to apply it.
pub struct Move {
    from: Bitboard,
    to: Bitboard,
    kind: MoveKind,
}

impl Move {
    #[inline(always)]
    #[must_use]
    /// Make a new `Move` between two squares.
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Move {
        Move {
            from: Bitboard::from(from),
            to: Bitboard::from(to),
            kind,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the origin of this move as a one-bit bitboard.
    pub const fn from_board(self) -> Bitboard {
        self.from
    }

    #[inline(always)]
    #[must_use]
    /// Get the destination of this move as a one-bit bitboard.
    pub const fn to_board(self) -> Bitboard {
        self.to
    }

    #[inline(always)]
    #[must_use]
    /// Get the square that a piece moves from to execute this move.
    pub fn from_square(self) -> Square {
        // SAFETY: `from` always has exactly one bit set.
        unsafe { Square::unsafe_from(self.from) }
    }

    #[inline(always)]
    #[must_use]
    /// Get the target square of this move.
    pub fn to_square(self) -> Square {
        // SAFETY: `to` always has exactly one bit set.
        unsafe { Square::unsafe_from(self.to) }
    }

    #[inline(always)]
    #[must_use]
    /// Get the tag describing what this move does.
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    #[must_use]
    /// Construct the long-algebraic (UCI) string of this move: the
    /// origin and destination squares, with a lowercase piece letter
    /// appended for promotions. Castling prints as the king's two
    /// squares ("e1g1").
    pub fn to_uci(self) -> String {
        match self.kind {
            MoveKind::Promote(p) => format!(
                "{}{}{}",
                self.from_square(),
                self.to_square(),
                p.code().to_ascii_lowercase()
            ),
            MoveKind::Quiet(_)
            | MoveKind::Capture(_)
            | MoveKind::DoublePush
            | MoveKind::EnPassant
            | MoveKind::Castle(_) => {
                format!("{}{}", self.from_square(), self.to_square())
            }
        }
    }

    /// Convert a move from its long-algebraic (UCI) representation, by
    /// generating the legal moves of `state` and matching the described
    /// origin, destination, and promotion against them.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` if `s` is malformed or does
    /// not describe a legal move in `state`.
    ///
    /// # Examples
    ///
    /// ```
    /// use windmill::{Color, GameState, Move, Square};
    ///
    /// let state = GameState::default();
    /// let m = Move::from_uci("e2e4", &state, Color::White).unwrap();
    /// assert_eq!(m.from_square(), Square::E2);
    /// assert_eq!(m.to_square(), Square::E4);
    /// assert!(Move::from_uci("e2e5", &state, Color::White).is_err());
    /// ```
    pub fn from_uci(s: &str, state: &GameState, us: Color) -> Result<Move, &'static str> {
        if !(s.len() == 4 || s.len() == 5) {
            return Err("string was neither a normal move nor a promotion");
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            None => None,
            Some(c) => match Piece::from_code(c.to_ascii_uppercase()) {
                Some(p @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => Some(p),
                _ => return Err("invalid promotion type given"),
            },
        };

        movegen::get_moves(state, us)
            .into_iter()
            .find(|m| {
                m.from_square() == from
                    && m.to_square() == to
                    && match m.kind {
                        MoveKind::Promote(p) => promotion == Some(p),
                        MoveKind::Quiet(_)
                        | MoveKind::Capture(_)
                        | MoveKind::DoublePush
                        | MoveKind::EnPassant
                        | MoveKind::Castle(_) => promotion.is_none(),
                    }
            })
            .ok_or("no legal move matches the given string")
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_masks_have_two_bits() {
        for swap in [
            CastleSwap::WHITE_KINGSIDE,
            CastleSwap::WHITE_QUEENSIDE,
            CastleSwap::BLACK_KINGSIDE,
            CastleSwap::BLACK_QUEENSIDE,
        ] {
            assert_eq!(swap.king.len(), 2);
            assert_eq!(swap.rook.len(), 2);
        }
        assert!(CastleSwap::WHITE_KINGSIDE.king.contains(Square::E1));
        assert!(CastleSwap::WHITE_KINGSIDE.king.contains(Square::G1));
        assert!(CastleSwap::BLACK_QUEENSIDE.rook.contains(Square::A8));
        assert!(CastleSwap::BLACK_QUEENSIDE.rook.contains(Square::D8));
    }

    #[test]
    fn uci_printing() {
        let m = Move::new(Square::E2, Square::E4, MoveKind::DoublePush);
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::new(Square::E7, Square::E8, MoveKind::Promote(Piece::Queen));
        assert_eq!(promo.to_uci(), "e7e8q");

        let castle = Move::new(
            Square::E1,
            Square::G1,
            MoveKind::Castle(CastleSwap::WHITE_KINGSIDE),
        );
        assert_eq!(castle.to_uci(), "e1g1");
    }

    #[test]
    fn uci_parse_normal() {
        let state = GameState::default();
        let m = Move::from_uci("g1f3", &state, Color::White).unwrap();
        assert_eq!(m.from_square(), Square::G1);
        assert_eq!(m.to_square(), Square::F3);
        assert_eq!(m.kind(), MoveKind::Quiet(Piece::Knight));
    }

    #[test]
    fn uci_parse_promotion() {
        let (state, us) = GameState::from_fen("8/5P2/2k5/4K3/8/8/8/8 w - - 0 1").unwrap();
        let m = Move::from_uci("f7f8n", &state, us).unwrap();
        assert_eq!(m.kind(), MoveKind::Promote(Piece::Knight));
        // a bare pawn push to the last rank is not a legal move
        assert!(Move::from_uci("f7f8", &state, us).is_err());
    }

    #[test]
    fn uci_round_trip_for_every_legal_move() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let (state, us) = GameState::from_fen(fen).unwrap();
            for m in crate::movegen::get_moves(&state, us) {
                assert_eq!(Move::from_uci(&m.to_uci(), &state, us), Ok(m));
            }
        }
    }

    #[test]
    fn uci_parse_rejects_garbage() {
        let state = GameState::default();
        assert!(Move::from_uci("garbage", &state, Color::White).is_err());
        assert!(Move::from_uci("e2e9", &state, Color::White).is_err());
        assert!(Move::from_uci("e2e4x", &state, Color::White).is_err());
    }
}
