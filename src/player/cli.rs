use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::{parse_coord, print_targeting_help};
use crate::core::{Coordinate, ShotGrid};

use super::MoveSource;

/// Reads the human's targets from standard input, one per line.
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    pub async fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

#[async_trait::async_trait]
impl MoveSource for StdinSource {
    async fn next_target(&mut self, shots: &ShotGrid) -> anyhow::Result<Option<Coordinate>> {
        loop {
            let Some(line) = self.read_line("\nEnter target (e.g. A5, 'help', 'q'): ").await? else {
                return Ok(None);
            };
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }
            if line.eq_ignore_ascii_case("help") {
                print_targeting_help();
                continue;
            }
            match parse_coord(&line) {
                Ok(target) if shots[target.y as usize][target.x as usize] => {
                    println!("✗ You already fired at {}! Choose another target.", target);
                }
                Ok(target) => return Ok(Some(target)),
                Err(e) => {
                    println!("✗ Invalid coordinate: {}", e);
                    println!("   Example: A5, B10, J1");
                }
            }
        }
    }
}
