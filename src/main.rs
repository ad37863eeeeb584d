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

//! The entry point of the Windmill engine.

fn main() {
    println!("Windmill {}", env!("CARGO_PKG_VERSION"));
    // build the attack and evaluation tables now, so the first search
    // starts instantly
    windmill::initialize();
    windmill::uci::run();
}
