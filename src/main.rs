#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use twenty48::{init_logging, prelude::*, rank_moves, FIELD_WIDTH};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Strategy {
    /// Greedy one-step advisor.
    Auto,
    /// Uniformly random direction.
    Random,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a single game until no move is left.
    Play {
        #[arg(long, value_enum, default_value_t = Strategy::Auto)]
        strategy: Strategy,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 100_000)]
        max_moves: usize,
        #[arg(long, help = "Print the board after every move")]
        show: bool,
    },
    /// Rank the four moves for a board given as 16 row-major tile values.
    Advise {
        #[arg(num_args = 16, required = true)]
        tiles: Vec<u32>,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            strategy,
            seed,
            max_moves,
            show,
        } => {
            if let Some(s) = seed {
                info!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut engine = GameEngine::new(rng);
            if show {
                println!("{}", engine.grid());
            }

            let mut moves = 0usize;
            let mut attempts = 0usize;
            while engine.can_move() && attempts < max_moves {
                attempts += 1;
                let (direction, outcome) = match strategy {
                    Strategy::Auto => {
                        let (eff, outcome) = engine.auto_move();
                        (eff.direction, outcome)
                    }
                    Strategy::Random => engine.random_move(),
                };
                if !outcome.changed {
                    if matches!(strategy, Strategy::Auto) {
                        // the advisor only picks a no-op when nothing can move
                        break;
                    }
                    continue;
                }
                moves += 1;
                if show {
                    println!("{} (+{})", direction, outcome.reward);
                    println!("{}", engine.grid());
                }
            }

            println!("{}", engine.grid());
            println!("Score:    {}", engine.score());
            println!("Max tile: {}", engine.max_tile());
            println!("Moves:    {}", moves);
            match engine.status() {
                GameStatus::Over => println!("Game over."),
                GameStatus::Won => println!("Reached the winning tile, move limit hit."),
                GameStatus::InProgress => println!("Move limit hit."),
            }
        }
        Commands::Advise { tiles } => {
            let mut rows = [[0u32; FIELD_WIDTH]; FIELD_WIDTH];
            for (i, value) in tiles.into_iter().enumerate() {
                rows[i / FIELD_WIDTH][i % FIELD_WIDTH] = value;
            }
            let grid = Grid::from_rows(rows).map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", grid);
            for eff in rank_moves(&grid, 0) {
                match eff.empty_tiles {
                    Some(empty) => println!(
                        "{:>5}: {} empty, +{}",
                        eff.direction, empty, eff.score
                    ),
                    None => println!("{:>5}: no change", eff.direction),
                }
            }
        }
    }
    Ok(())
}
