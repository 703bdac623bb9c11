use std::time::Duration;

use broadside::{
    cli::{print_player_view, render_board, TextRenderer},
    init_logging, simulate, GameConfig, Host, Party, Session, StdinSource,
};
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer on this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 500, help = "Shortest computer thinking time")]
        min_delay_ms: u64,
        #[arg(long, default_value_t = 1250, help = "Longest computer thinking time")]
        max_delay_ms: u64,
    },
    /// Pit a random shooter against the computer and print JSON summaries.
    Sim {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        games: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            min_delay_ms,
            max_delay_ms,
        } => {
            init_logging(LevelFilter::Warn);
            let config = GameConfig {
                seed,
                min_delay: Duration::from_millis(min_delay_ms),
                max_delay: Duration::from_millis(max_delay_ms),
                ..GameConfig::default()
            };
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            play(config).await?;
        }
        Commands::Sim { seed, games } => {
            init_logging(LevelFilter::Info);
            for i in 0..games {
                let summary = simulate(seed.wrapping_add(i)).await?;
                println!("{}", serde_json::to_string(&summary)?);
            }
        }
    }
    Ok(())
}

async fn play(config: GameConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;
    session.subscribe(TextRenderer);
    let mut host = Host::new(session);
    let mut input = StdinSource::new();

    loop {
        host.with_session(|s| {
            println!("\nYour fleet:");
            println!("{}", render_board(s.player().gameboard(), true));
        });
        let prompt = "\n[r] re-roll ships  [s] start  [q] quit: ";
        let Some(line) = input.read_line(prompt).await? else {
            return Ok(());
        };
        match line.to_ascii_lowercase().as_str() {
            "r" => {
                host.with_session_mut(|s| s.randomize_ships(Party::Player))?;
                continue;
            }
            "s" => {}
            "q" => return Ok(()),
            other => {
                println!("Unknown command '{}'", other);
                continue;
            }
        }

        let winner = host.run(&mut input).await?;
        host.with_session(|s| print_player_view(s.player().gameboard(), s.computer().gameboard()));
        if winner.is_none() {
            return Ok(());
        }
    }
}
