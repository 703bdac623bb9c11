use crate::core::{Coordinate, Gameboard, HitOutcome, BOARD_SIZE};
use crate::events::{GameEvent, GameListener};
use crate::player::Party;

/// Parse `A5`-style input (column letter, one-based row) into a coordinate.
pub fn parse_coord(input: &str) -> Result<Coordinate, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coordinate::new(col as i32, row as i32 - 1))
}

/// Render a board. With `reveal` unhit ships are shown as `S`.
pub fn render_board(board: &Gameboard, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ╔═══════════════════════╗\n    ║  ");
    for c in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'A' + c as u8) as char);
    }
    out.push_str(" ║\n    ╠═══════════════════════╣\n");
    for (r, row) in board.cells().iter().enumerate() {
        out.push_str(&format!("    ║ {:2}", r + 1));
        for cell in row {
            let sunk = cell
                .ship()
                .is_some_and(|i| board.ships()[i].is_sunk());
            let ch = match (cell.is_hit(), cell.is_occupied()) {
                _ if sunk => '#',
                (true, true) => 'X',
                (true, false) => 'o',
                (false, true) if reveal => 'S',
                _ => '.',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push_str(" ║\n");
    }
    out.push_str("    ╚═══════════════════════╝\n");
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water");
    } else {
        out.push_str("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown");
    }
    out
}

/// Display the opponent board (top) and the player's board (bottom).
pub fn print_player_view(own: &Gameboard, opponent: &Gameboard) {
    println!("Opponent board:");
    println!("{}", render_board(opponent, false));
    println!("\nYour board:");
    println!("{}", render_board(own, true));
}

pub fn print_targeting_help() {
    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║                  TARGETING HELP                        ║");
    println!("╠════════════════════════════════════════════════════════╣");
    println!("║ Format: <COLUMN><ROW>, e.g. A5, B10, J1                ║");
    println!("║ Valid columns: A-J (A is leftmost)                     ║");
    println!("║ Valid rows: 1-10 (1 is topmost)                        ║");
    println!("║ Type 'q' to leave the game.                            ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

/// Listener that narrates the game on standard output.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl GameListener for TextRenderer {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnChanged(Party::Player) => println!("\n▶ Your turn."),
            GameEvent::TurnChanged(Party::Computer) => println!("\n… Computer is thinking."),
            GameEvent::CellHit {
                target,
                coordinate,
                outcome,
                sunk_cells,
            } => {
                let who = match target {
                    Party::Computer => "Your shot",
                    Party::Player => "Enemy shot",
                };
                match outcome {
                    HitOutcome::Miss => println!("💧 {} at {} hit only water.", who, coordinate),
                    HitOutcome::Ship => println!("🎯 {} at {} struck a ship!", who, coordinate),
                    HitOutcome::Sunk => {
                        let cells: Vec<String> =
                            sunk_cells.iter().map(ToString::to_string).collect();
                        println!("💥 {} at {} sank a ship ({})!", who, coordinate, cells.join(" "));
                    }
                }
            }
            GameEvent::GameEnded { winner, .. } => match winner {
                Party::Player => println!("\n🏆 You won!"),
                Party::Computer => println!("\n💀 You lost!"),
            },
        }
    }
}
