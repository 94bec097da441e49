use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use twenty48::{init_logging, GameEngine};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    let mut results = Vec::new();
    for game in 0..games {
        let rng = SmallRng::seed_from_u64(seed.wrapping_add(game));
        let mut engine = GameEngine::new(rng);
        let mut moves = 0usize;
        while engine.can_move() {
            let (_, outcome) = engine.auto_move();
            if !outcome.changed {
                break;
            }
            moves += 1;
        }
        log::info!(
            "game {} finished: score {}, max tile {}",
            game,
            engine.score(),
            engine.max_tile()
        );
        results.push(json!({
            "seed": seed.wrapping_add(game),
            "score": engine.score(),
            "max_tile": engine.max_tile(),
            "moves": moves,
        }));
    }

    let best_score = results
        .iter()
        .filter_map(|r| r["score"].as_u64())
        .max()
        .unwrap_or(0);
    let result = json!({
        "games": results,
        "best_score": best_score,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
