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

//! The Universal Chess Interface front-end: a line loop on standard
//! input which drives the engine from a chess GUI.
//!
//! Windmill searches to a fixed depth, so the time-control fields of
//! `go` are accepted and ignored; `go depth N` selects the depth.

use std::io::{self, BufRead};

use crate::{movegen, perft, search, Color, GameState, Move};

/// The search depth used when `go` does not specify one.
const DEFAULT_DEPTH: u8 = 5;

/// The engine state tracked between UCI commands.
struct Session {
    state: GameState,
    to_move: Color,
}

/// Run the UCI loop until `quit` or the end of input.
pub fn run() {
    let mut session = Session {
        state: GameState::default(),
        to_move: Color::White,
    };

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if !handle_line(&mut session, &line) {
            break;
        }
    }
}

/// Dispatch one line of input. Returns `false` when the loop should
/// stop.
fn handle_line(session: &mut Session, line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("uci") => {
            println!("id name Windmill {}", env!("CARGO_PKG_VERSION"));
            println!("id author The Windmill Authors");
            println!("uciok");
        }
        Some("isready") => println!("readyok"),
        Some("ucinewgame") => {
            session.state = GameState::default();
            session.to_move = Color::White;
        }
        Some("position") => match parse_position(tokens) {
            Ok((state, to_move)) => {
                session.state = state;
                session.to_move = to_move;
            }
            Err(e) => println!("info string error: {e}"),
        },
        Some("go") => go(session, tokens),
        Some("display") | Some("d") => {
            print!("{}", session.state.position);
            println!(
                "{} to move",
                match session.to_move {
                    Color::White => "white",
                    Color::Black => "black",
                }
            );
        }
        Some("quit") => return false,
        Some(command) => println!("info string unrecognized command: {command}"),
        None => (),
    }
    true
}

/// Parse the remainder of a `position` command: `startpos` or `fen
/// <fields>`, optionally followed by `moves` and a list of UCI moves to
/// replay.
fn parse_position<'a, I: Iterator<Item = &'a str>>(
    mut tokens: I,
) -> Result<(GameState, Color), &'static str> {
    match tokens.next() {
        Some("startpos") => match tokens.next() {
            Some("moves") => replay_moves((GameState::default(), Color::White), tokens),
            None => Ok((GameState::default(), Color::White)),
            Some(_) => Err("expected moves after position"),
        },
        Some("fen") => {
            // `take_while` consumes the `moves` keyword itself, leaving
            // the iterator at the first move to replay
            let fen_fields: Vec<&str> = tokens
                .by_ref()
                .take_while(|&token| token != "moves")
                .collect();
            let start = GameState::from_fen(&fen_fields.join(" "))?;
            replay_moves(start, tokens)
        }
        _ => Err("expected startpos or fen"),
    }
}

/// Replay a list of UCI move strings onto a state.
fn replay_moves<'a, I: Iterator<Item = &'a str>>(
    start: (GameState, Color),
    tokens: I,
) -> Result<(GameState, Color), &'static str> {
    let (mut state, mut to_move) = start;
    for token in tokens {
        let m = Move::from_uci(token, &state, to_move)?;
        state = state.make_move(to_move, m);
        to_move = !to_move;
    }
    Ok((state, to_move))
}

/// Handle a `go` command: run the search and print the chosen move.
fn go<'a, I: Iterator<Item = &'a str>>(session: &Session, mut tokens: I) {
    let mut depth = DEFAULT_DEPTH;
    while let Some(token) = tokens.next() {
        match token {
            "depth" => {
                if let Some(d) = tokens.next().and_then(|s| s.parse().ok()) {
                    depth = d;
                }
            }
            "perft" => {
                if let Some(d) = tokens.next().and_then(|s| s.parse().ok()) {
                    perft::perft(&session.state, session.to_move, d);
                }
                return;
            }
            // time management is out of scope; accept and ignore
            _ => (),
        }
    }

    if movegen::get_moves(&session.state, session.to_move).is_empty() {
        println!("info string no legal moves");
        return;
    }
    match search::search(&session.state, session.to_move, depth) {
        Some((m, value)) => {
            println!("info depth {depth} score {value}");
            println!("bestmove {}", m.to_uci());
        }
        None => println!("info string no legal moves"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn parse_startpos() {
        let (state, to_move) =
            parse_position("startpos".split_whitespace()).unwrap();
        assert_eq!(state, GameState::default());
        assert_eq!(to_move, Color::White);
    }

    #[test]
    fn parse_startpos_with_moves() {
        let (state, to_move) =
            parse_position("startpos moves e2e4 c7c5 g1f3".split_whitespace()).unwrap();
        assert_eq!(to_move, Color::Black);
        let expected = GameState::from_fen(
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        )
        .unwrap()
        .0;
        assert_eq!(state, expected);
    }

    #[test]
    fn parse_fen_with_moves() {
        let (state, to_move) = parse_position(
            "fen k7/8/K7/8/5Pp1/8/8/8 b - f3 0 1 moves g4f3"
                .split_whitespace(),
        )
        .unwrap();
        assert_eq!(to_move, Color::White);
        assert!(state
            .position
            .pieces(Color::Black, crate::Piece::Pawn)
            .contains(Square::F3));
    }

    #[test]
    fn parse_rejects_illegal_replays() {
        assert!(parse_position("startpos moves e2e5".split_whitespace()).is_err());
        assert!(parse_position("nonsense".split_whitespace()).is_err());
    }
}
