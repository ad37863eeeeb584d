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

//! Performance testing, or "perft": counting the leaves of the move
//! generation tree. The exact counts from well-known positions are the
//! canonical check of move-generator correctness, since every missed or
//! phantom move in any line perturbs the total.

use std::time::Instant;

use crate::movegen::get_moves;

use super::{Color, GameState};

/// Count the leaf nodes of the move tree of `state` to the given depth,
/// printing the per-move subtotals at the root and a node rate summary.
pub fn perft(state: &GameState, us: Color, depth: u8) -> u64 {
    let tic = Instant::now();
    let num_nodes = perft_search::<true>(state, us, depth);
    let elapsed = (Instant::now() - tic).as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let speed = num_nodes as f64 / elapsed;
    println!("time {elapsed:.2} secs, num nodes {num_nodes}: {speed:.0} nodes/sec");

    num_nodes
}

/// The core counting recursion. `DIVIDE` prints one subtotal line per
/// root move.
fn perft_search<const DIVIDE: bool>(state: &GameState, us: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = get_moves(state, us);
    if depth == 1 && !DIVIDE {
        return moves.len() as u64;
    }
    let mut total = 0;
    for m in moves {
        let next = state.make_move(us, m);
        let count = perft_search::<false>(&next, !us, depth - 1);
        if DIVIDE {
            println!("{m}, {count}");
        }
        total += count;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check every expected node count from one position, depth 1 up.
    fn perft_assistant(fen: &str, node_counts: &[u64]) {
        let (state, us) = GameState::from_fen(fen).unwrap();
        for (depth, &expected) in node_counts.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let depth = depth as u8 + 1;
            assert_eq!(
                perft_search::<false>(&state, us, depth),
                expected,
                "wrong node count at depth {depth}"
            );
        }
    }

    #[test]
    fn start_position() {
        perft_assistant(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &[20, 400, 8_902, 197_281, 4_865_609],
        );
    }

    #[test]
    fn kiwipete() {
        // the classic castling/pin/en-passant torture position
        perft_assistant(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &[48, 2_039, 97_862, 4_085_603],
        );
    }

    #[test]
    fn endgame_position() {
        // rich in en-passant and promotion edge cases
        perft_assistant(
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            &[14, 191, 2_812, 43_238, 674_624],
        );
    }

    #[test]
    fn promotion_position() {
        perft_assistant(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            &[44, 1_486, 62_379, 2_103_487],
        );
    }

    #[test]
    fn mirrored_kiwipete_variant() {
        // Steven Edwards' position 6; symmetric and full of tactics
        perft_assistant(
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            &[46, 2_079, 89_890, 3_894_594],
        );
    }
}
