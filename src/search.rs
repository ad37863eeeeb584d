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

//! Fixed-depth alpha-beta search for the best move.

use crate::{movegen, pst, Color, Eval, GameState, Move};

#[must_use]
/// Search to the given depth and return the best move for `us` along
/// with its evaluation. Ties are broken in favor of the move generated
/// first. Returns `None` only when `us` has no legal moves, which the
/// caller should have ruled out before searching; a depth of zero is
/// treated as one.
///
/// The search is a plain negamax: each recursion negates and swaps the
/// window bounds, and a subtree is abandoned as soon as its value proves
/// at least as good as something the opponent can already avoid.
pub fn search(state: &GameState, us: Color, depth: u8) -> Option<(Move, Eval)> {
    let depth = depth.max(1);
    let mut best = None;
    let mut alpha = Eval::MIN;

    for m in movegen::get_moves(state, us) {
        let next = state.make_move(us, m);
        let value = -alpha_beta(&next, !us, depth - 1, -Eval::MAX, -alpha, 1);
        if value > alpha || best.is_none() {
            alpha = value;
            best = Some((m, value));
        }
    }

    best
}

/// Evaluate `state` for `side` by searching `depth` plies deeper. `ply`
/// is the distance from the root, which grades mate scores so that the
/// search prefers faster mates and delays unavoidable ones.
fn alpha_beta(
    state: &GameState,
    side: Color,
    depth: u8,
    mut alpha: Eval,
    beta: Eval,
    ply: u8,
) -> Eval {
    if depth == 0 {
        return pst::evaluate(&state.position, side);
    }

    let moves = movegen::get_moves(state, side);
    if moves.is_empty() {
        return if movegen::in_check(&state.position, side) {
            Eval::mated_in(ply)
        } else {
            Eval::DRAW
        };
    }

    let mut best = Eval::MIN;
    for m in moves {
        let next = state.make_move(side, m);
        let value = -alpha_beta(&next, !side, depth - 1, -beta, -alpha, ply + 1);
        if value > best {
            best = value;
            if value > alpha {
                alpha = value;
            }
        }
        if best >= beta {
            break;
        }
    }

    best
}
