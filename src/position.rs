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

//! The board state: piece placement, and how moves transform it.

use crate::rights::CastleRights;

use super::{Bitboard, Color, Move, MoveKind, Piece, Rights, Square};

use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The placement of every piece on the board: one bitboard per (color,
/// kind) pair, plus the derived union of each side and of the whole
/// board. The twelve piece boards are pairwise disjoint, their union is
/// exactly `occupied`, and each side has exactly one king bit; this
/// invariant is re-checked after every move in debug builds.
pub struct Position {
    /// The piece boards, indexed by color and then kind.
    boards: [[Bitboard; Piece::NUM]; 2],
    /// The squares occupied by each side.
    sides: [Bitboard; 2],
    /// The squares occupied by anything.
    occupied: Bitboard,
}

impl Position {
    /// A board with no pieces on it. Not legal to play on, but the
    /// starting point for FEN parsing.
    pub const EMPTY: Position = Position {
        boards: [[Bitboard::EMPTY; Piece::NUM]; 2],
        sides: [Bitboard::EMPTY; 2],
        occupied: Bitboard::EMPTY,
    };

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by pieces of one color and kind.
    pub const fn pieces(&self, color: Color, kind: Piece) -> Bitboard {
        self.boards[color as usize][kind as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by one side.
    pub const fn side(&self, color: Color) -> Bitboard {
        self.sides[color as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by anything.
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline(always)]
    #[must_use]
    /// Get the square of the king of `color`.
    pub fn king_square(&self, color: Color) -> Square {
        // SAFETY: the position invariant guarantees one king bit.
        unsafe { Square::unsafe_from(self.pieces(color, Piece::King)) }
    }

    #[inline(always)]
    #[must_use]
    /// Get the kind of the piece of `color` on `sq`, if there is one.
    pub fn kind_at(&self, color: Color, sq: Square) -> Option<Piece> {
        if !self.side(color).contains(sq) {
            return None;
        }
        for kind in Piece::ALL {
            if self.pieces(color, kind).contains(sq) {
                return Some(kind);
            }
        }
        None
    }

    /// Put a piece onto the board. The target square must be empty.
    fn add_piece(&mut self, color: Color, kind: Piece, sq: Square) {
        let bb = Bitboard::from(sq);
        self.boards[color as usize][kind as usize] |= bb;
        self.sides[color as usize] |= bb;
        self.occupied |= bb;
    }

    /// Apply a legal move by `us` whose moving piece is `mover`,
    /// producing the resulting placement. Application is XOR per the
    /// move's tag.
    #[must_use]
    fn apply(&self, us: Color, mover: Piece, m: Move) -> Position {
        let them = !us;
        let swap = m.from_board() | m.to_board();
        let mut next = *self;

        match m.kind() {
            MoveKind::Quiet(kind) => {
                next.boards[us as usize][kind as usize] ^= swap;
                next.sides[us as usize] ^= swap;
            }
            MoveKind::Capture(victim) => {
                next.boards[us as usize][mover as usize] ^= swap;
                next.sides[us as usize] ^= swap;
                next.boards[them as usize][victim as usize] &= !m.to_board();
                next.sides[them as usize] &= !m.to_board();
            }
            MoveKind::DoublePush => {
                next.boards[us as usize][Piece::Pawn as usize] ^= swap;
                next.sides[us as usize] ^= swap;
            }
            MoveKind::EnPassant => {
                // the captured pawn stands one rank behind the landing
                // square
                let victim = Bitboard::from(m.to_square() - us.pawn_direction());
                next.boards[us as usize][Piece::Pawn as usize] ^= swap;
                next.sides[us as usize] ^= swap;
                next.boards[them as usize][Piece::Pawn as usize] ^= victim;
                next.sides[them as usize] ^= victim;
            }
            MoveKind::Castle(castle) => {
                next.boards[us as usize][Piece::King as usize] ^= castle.king;
                next.boards[us as usize][Piece::Rook as usize] ^= castle.rook;
                next.sides[us as usize] ^= castle.king | castle.rook;
            }
            MoveKind::Promote(kind) => {
                next.boards[us as usize][Piece::Pawn as usize] ^= m.from_board();
                next.boards[us as usize][kind as usize] ^= m.to_board();
                next.sides[us as usize] ^= swap;
                if !(next.sides[them as usize] & m.to_board()).is_empty() {
                    // a promotion capture; clear whatever was there
                    for victim in Piece::ALL {
                        next.boards[them as usize][victim as usize] &= !m.to_board();
                    }
                    next.sides[them as usize] &= !m.to_board();
                }
            }
        }
        next.occupied = next.sides[0] | next.sides[1];

        debug_assert!(next.is_consistent());
        next
    }

    /// Check the position invariant: piece boards pairwise disjoint,
    /// derived boards matching their unions, and one king per side.
    fn is_consistent(&self) -> bool {
        let mut union = Bitboard::EMPTY;
        let mut total = 0u8;
        for color in Color::BOTH {
            let mut side_union = Bitboard::EMPTY;
            for kind in Piece::ALL {
                let bb = self.pieces(color, kind);
                total += bb.len();
                side_union |= bb;
            }
            if side_union != self.side(color) {
                return false;
            }
            if !self.pieces(color, Piece::King).has_single_bit() {
                return false;
            }
            union |= side_union;
        }

        // disjointness: the bit count of the union matches the sum of
        // the individual counts
        union == self.occupied && union.len() == total
    }
}

impl Display for Position {
    /// Display this position as an 8 by 8 grid of piece letters, rank 8
    /// at the top, uppercase for White and lowercase for Black.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..64u8 {
            let sq = Square::try_from(i).unwrap();
            match (
                self.kind_at(Color::White, sq),
                self.kind_at(Color::Black, sq),
            ) {
                (Some(kind), _) => write!(f, "{} ", kind.code())?,
                (_, Some(kind)) => write!(f, "{} ", kind.code().to_ascii_lowercase())?,
                (None, None) => write!(f, ". ")?,
            }
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// A full game state: the piece placement together with the castling and
/// en-passant rights. A plain value; making a move produces a new state
/// and leaves the old one untouched, which is what lets the search keep
/// parent states on its stack instead of unmaking moves.
pub struct GameState {
    /// The piece placement.
    pub position: Position,
    /// The castling and en-passant rights.
    pub rights: Rights,
}

impl GameState {
    #[must_use]
    /// Apply a legal move by `us`, producing the resulting state.
    ///
    /// # Panics
    ///
    /// May panic if `m` is not legal in this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use windmill::{Color, GameState, Move, Square};
    ///
    /// let state = GameState::default();
    /// let m = Move::from_uci("e2e4", &state, Color::White).unwrap();
    /// let next = state.make_move(Color::White, m);
    /// assert_eq!(next.rights.en_passant, Some(Square::E3));
    /// ```
    pub fn make_move(self, us: Color, m: Move) -> GameState {
        let mover = match m.kind() {
            MoveKind::Quiet(kind) => kind,
            MoveKind::Capture(_) => self.position.kind_at(us, m.from_square()).unwrap(),
            MoveKind::DoublePush | MoveKind::EnPassant | MoveKind::Promote(_) => Piece::Pawn,
            MoveKind::Castle(_) => Piece::King,
        };

        GameState {
            position: self.position.apply(us, mover, m),
            rights: self.rights.after_move(us, m, mover),
        }
    }

    /// Load a state from the given FEN. Only the first four fields
    /// (placement, active color, castling, en passant) are consumed; the
    /// move clocks may be present or absent and are ignored. Returns the
    /// state along with the side to move.
    ///
    /// # Errors
    ///
    /// Will return `Err` with a description if the FEN is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use windmill::{Color, GameState};
    ///
    /// let (state, to_move) =
    ///     GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
    ///         .unwrap();
    /// assert_eq!(state, GameState::default());
    /// assert_eq!(to_move, Color::White);
    /// ```
    pub fn from_fen(fen: &str) -> Result<(GameState, Color), &'static str> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or("FEN is empty")?;
        let mut position = Position::EMPTY;
        let mut index = 0u8;
        for c in placement.chars() {
            match c {
                '/' => {
                    if index == 0 || index % 8 != 0 {
                        return Err("rank divider in the middle of a rank");
                    }
                }
                '1'..='8' => index += c as u8 - b'0',
                _ => {
                    let kind = Piece::from_code(c.to_ascii_uppercase())
                        .ok_or("unrecognized piece character")?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::try_from(index).map_err(|_| "too many squares in FEN")?;
                    if position.occupied().contains(sq) {
                        return Err("two pieces on one square");
                    }
                    position.add_piece(color, kind, sq);
                    index += 1;
                }
            }
            if index > 64 {
                return Err("too many squares in FEN");
            }
        }
        if index != 64 {
            return Err("not enough squares in FEN");
        }
        if !position.is_consistent() {
            return Err("board does not have exactly one king per side");
        }

        let to_move = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            _ => return Err("unrecognized active color"),
        };

        let mut castling = CastleRights::NONE;
        match fields.next() {
            None => return Err("missing castling rights"),
            Some("-") => (),
            Some(rights) => {
                for c in rights.chars() {
                    castling |= match c {
                        'K' => CastleRights::kingside(Color::White),
                        'Q' => CastleRights::queenside(Color::White),
                        'k' => CastleRights::kingside(Color::Black),
                        'q' => CastleRights::queenside(Color::Black),
                        _ => return Err("unrecognized castling rights character"),
                    };
                }
            }
        }

        let en_passant = match fields.next() {
            None => return Err("missing en passant square"),
            Some("-") => None,
            Some(s) => Some(Square::from_algebraic(s)?),
        };

        // halfmove clock and fullmove number are intentionally ignored

        Ok((
            GameState {
                position,
                rights: Rights {
                    castling,
                    en_passant,
                },
            },
            to_move,
        ))
    }
}

impl Default for GameState {
    /// The standard starting position, White to move.
    fn default() -> GameState {
        GameState {
            position: Position {
                boards: [
                    [
                        Bitboard::new(0x4200_0000_0000_0000), // knights
                        Bitboard::new(0x2400_0000_0000_0000), // bishops
                        Bitboard::new(0x8100_0000_0000_0000), // rooks
                        Bitboard::new(0x0800_0000_0000_0000), // queen
                        Bitboard::new(0x00FF_0000_0000_0000), // pawns
                        Bitboard::new(0x1000_0000_0000_0000), // king
                    ],
                    [
                        Bitboard::new(0x0000_0000_0000_0042),
                        Bitboard::new(0x0000_0000_0000_0024),
                        Bitboard::new(0x0000_0000_0000_0081),
                        Bitboard::new(0x0000_0000_0000_0008),
                        Bitboard::new(0x0000_0000_0000_FF00),
                        Bitboard::new(0x0000_0000_0000_0010),
                    ],
                ],
                sides: [
                    Bitboard::new(0xFFFF_0000_0000_0000),
                    Bitboard::new(0x0000_0000_0000_FFFF),
                ],
                occupied: Bitboard::new(0xFFFF_0000_0000_FFFF),
            },
            rights: Rights::INITIAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    /// Shorthand: parse a FEN, play the given UCI move, and return the
    /// resulting state along with the mover's color.
    fn play(fen: &str, uci: &str) -> (GameState, Color) {
        let (state, us) = GameState::from_fen(fen).unwrap();
        let m = Move::from_uci(uci, &state, us).unwrap();
        (state.make_move(us, m), us)
    }

    #[test]
    fn start_position_from_fen() {
        let (state, to_move) =
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(state, GameState::default());
        assert_eq!(to_move, Color::White);
        assert!(state.position.is_consistent());
        assert_eq!(state.position.king_square(Color::White), Square::E1);
        assert_eq!(state.position.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn fen_with_missing_fields_is_rejected() {
        assert!(GameState::from_fen("").is_err());
        assert!(GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
        assert!(GameState::from_fen("8/8/8/8/8/8/8/8 w - -").is_err());
        assert!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1")
                .is_err()
        );
    }

    #[test]
    fn fen_with_bad_placement_is_rejected() {
        assert!(GameState::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(GameState::from_fen("ppppppppp/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(GameState::from_fen("k7/8/8/8/8/8/8/K6x w - - 0 1").is_err());
    }

    #[test]
    fn fen_reads_en_passant_square() {
        let (state, _) =
            GameState::from_fen("rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        assert_eq!(state.rights.en_passant, Some(Square::F6));
    }

    #[test]
    fn pawn_push_moves_one_pawn() {
        let (next, _) = play(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
        );
        let expected =
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap()
                .0;
        assert_eq!(next, expected);
    }

    #[test]
    fn make_move_is_pure() {
        let state = GameState::default();
        let m = Move::from_uci("b1c3", &state, Color::White).unwrap();
        let a = state.make_move(Color::White, m);
        let b = state.make_move(Color::White, m);
        assert_eq!(a, b);
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn capture_removes_the_victim() {
        let (next, _) = play(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            "e4d5",
        );
        let expected =
            GameState::from_fen("rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2")
                .unwrap()
                .0;
        assert_eq!(next, expected);
    }

    #[test]
    fn kingside_castle_moves_both_pieces() {
        let (next, _) = play(
            "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "e1g1",
        );
        let expected = GameState::from_fen(
            "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4",
        )
        .unwrap()
        .0;
        assert_eq!(next, expected);
    }

    #[test]
    fn queenside_castle_moves_both_pieces() {
        let (next, _) = play("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8");
        assert!(next.position.pieces(Color::Black, Piece::King).contains(Square::C8));
        assert!(next.position.pieces(Color::Black, Piece::Rook).contains(Square::D8));
        assert!(!next.position.side(Color::Black).contains(Square::A8));
        assert!(!next.rights.castling.kingside_available(Color::Black));
        assert!(!next.rights.castling.queenside_available(Color::Black));
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let (next, us) = play("8/5P2/2k5/4K3/8/8/8/8 w - - 0 1", "f7f8q");
        assert!(next.position.pieces(us, Piece::Pawn).is_empty());
        assert!(next.position.pieces(us, Piece::Queen).contains(Square::F8));
    }

    // the corner-square rights scenarios, all from one position
    const ROOK_CORNERS_FEN: &str = "r3k2r/3N4/8/8/p7/8/8/R3K2R w KQkq - 0 1";

    #[test]
    fn rook_move_clears_kingside_right_only() {
        let (next, _) = play(ROOK_CORNERS_FEN, "h1g1");
        assert!(!next.rights.castling.kingside_available(Color::White));
        assert!(next.rights.castling.queenside_available(Color::White));
        assert!(next.rights.castling.kingside_available(Color::Black));
        assert!(next.rights.castling.queenside_available(Color::Black));
    }

    #[test]
    fn rook_capture_clears_queenside_right_only() {
        let (next, _) = play(ROOK_CORNERS_FEN, "a1a4");
        assert!(next.rights.castling.kingside_available(Color::White));
        assert!(!next.rights.castling.queenside_available(Color::White));
    }

    #[test]
    fn king_move_clears_both_rights() {
        let (next, _) = play(ROOK_CORNERS_FEN, "e1d2");
        assert!(!next.rights.castling.kingside_available(Color::White));
        assert!(!next.rights.castling.queenside_available(Color::White));
        assert!(next.rights.castling.kingside_available(Color::Black));
    }

    #[test]
    fn black_king_capture_clears_blacks_rights() {
        // give black the move: the king takes the knight on d7
        let (state, _) = GameState::from_fen("r3k2r/3N4/8/8/p7/8/8/R3K2R b KQkq - 0 1").unwrap();
        let m = Move::from_uci("e8d7", &state, Color::Black).unwrap();
        let next = state.make_move(Color::Black, m);
        assert!(!next.rights.castling.kingside_available(Color::Black));
        assert!(!next.rights.castling.queenside_available(Color::Black));
        assert!(next.rights.castling.kingside_available(Color::White));
        assert!(next.rights.castling.queenside_available(Color::White));
    }

    #[test]
    fn display_orients_rank_8_on_top() {
        let shown = GameState::default().position.to_string();
        let first_line = shown.lines().next().unwrap();
        assert_eq!(first_line.trim(), "r n b q k b n r");
    }
}
