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

//! Castling and en-passant rights, and how moves update them.

use super::{Color, Move, MoveKind, Piece, Square};

use std::{
    convert::TryFrom,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A bitset of castling permissions. From MSB to LSB of the internal
/// byte:
/// * 4 unused bits
/// * Black queenside castling
/// * Black kingside castling
/// * White queenside castling
/// * White kingside castling
pub struct CastleRights(pub u8);

impl CastleRights {
    /// A `CastleRights` where all rights are available.
    pub const ALL: CastleRights = CastleRights(15);

    /// A `CastleRights` where no rights are available.
    pub const NONE: CastleRights = CastleRights(0);

    #[inline(always)]
    #[must_use]
    /// Create a `CastleRights` for kingside castling on one side.
    pub const fn kingside(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(1),
            Color::Black => CastleRights(4),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Create a `CastleRights` for queenside castling on one side.
    pub const fn queenside(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(2),
            Color::Black => CastleRights(8),
        }
    }

    #[must_use]
    /// Get the full rights for one color.
    pub const fn color_rights(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(3),
            Color::Black => CastleRights(12),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Can the given color castle kingside under these rights?
    pub fn kingside_available(self, color: Color) -> bool {
        self & CastleRights::kingside(color) != CastleRights::NONE
    }

    #[inline(always)]
    #[must_use]
    /// Can the given color castle queenside under these rights?
    pub fn queenside_available(self, color: Color) -> bool {
        self & CastleRights::queenside(color) != CastleRights::NONE
    }
}

impl BitOr for CastleRights {
    type Output = CastleRights;

    #[inline(always)]
    fn bitor(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }
}

impl BitOrAssign for CastleRights {
    #[inline(always)]
    fn bitor_assign(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }
}

impl BitAnd for CastleRights {
    type Output = CastleRights;

    #[inline(always)]
    fn bitand(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & other.0)
    }
}

impl BitAndAssign for CastleRights {
    #[inline(always)]
    fn bitand_assign(&mut self, other: CastleRights) {
        self.0 &= other.0;
    }
}

impl Not for CastleRights {
    type Output = CastleRights;

    #[inline(always)]
    fn not(self) -> CastleRights {
        CastleRights(self.0 ^ 15)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The rights attached to a board beyond the piece placement: which
/// castles are still permitted, and the square a pawn may capture onto
/// en passant (the square behind a pawn that just pushed two ranks).
pub struct Rights {
    /// The castling permissions of both players.
    pub castling: CastleRights,
    /// The en-passant target square, if the previous move was a double
    /// pawn push.
    pub en_passant: Option<Square>,
}

impl Rights {
    /// The rights at the start of a standard game.
    pub const INITIAL: Rights = Rights {
        castling: CastleRights::ALL,
        en_passant: None,
    };

    /// The empty rights: no castling, no en passant.
    pub const NONE: Rights = Rights {
        castling: CastleRights::NONE,
        en_passant: None,
    };

    #[must_use]
    /// Compute the rights after `us` plays `m`, a legal move whose
    /// moving piece is `mover`. The en-passant square is cleared unless
    /// the move is a double push; a king move forfeits both of the
    /// mover's castle flags, and touching a rook's original corner
    /// (moving from it, or capturing onto it) forfeits the matching
    /// flag.
    pub(crate) fn after_move(self, us: Color, m: Move, mover: Piece) -> Rights {
        let mut castling = self.castling;
        let mut en_passant = None;

        match m.kind() {
            MoveKind::DoublePush => {
                let relay = (m.from_square() as u8 + m.to_square() as u8) / 2;
                en_passant = Some(Square::try_from(relay).unwrap());
            }
            MoveKind::Castle(_) => castling &= !CastleRights::color_rights(us),
            MoveKind::Capture(victim) => {
                // only reachable through pseudo-legal exploration, but
                // harmless to handle
                if victim == Piece::King {
                    castling &= !CastleRights::color_rights(!us);
                }
            }
            MoveKind::Quiet(_) | MoveKind::EnPassant | MoveKind::Promote(_) => (),
        }

        if mover == Piece::King {
            castling &= !CastleRights::color_rights(us);
        }

        for sq in [m.from_square(), m.to_square()] {
            castling &= !match sq {
                Square::A1 => CastleRights::queenside(Color::White),
                Square::H1 => CastleRights::kingside(Color::White),
                Square::A8 => CastleRights::queenside(Color::Black),
                Square::H8 => CastleRights::kingside(Color::Black),
                _ => CastleRights::NONE,
            };
        }

        Rights {
            castling,
            en_passant,
        }
    }
}
