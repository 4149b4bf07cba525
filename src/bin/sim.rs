use solo_battleship::{
    init_logging, run_round, AiPlayer, GameConfig, GameEngine, GameStatus, Player, RandomPlayer,
    ReplayDecision, RoundSummary,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: {} <seed> [rounds] [random|ai]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let rounds: usize = match args.get(2) {
        Some(r) => r.parse()?,
        None => 1,
    };
    let strategy = args.get(3).map(String::as_str).unwrap_or("ai");
    let mut player: Box<dyn Player> = match strategy {
        "ai" => Box::new(AiPlayer::new()),
        "random" => Box::new(RandomPlayer::new()),
        other => return Err(anyhow::anyhow!("unknown strategy '{}'", other)),
    };

    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut engine = GameEngine::new(GameConfig::default().with_seed(seed))?;

    let mut summaries: Vec<RoundSummary> = Vec::with_capacity(rounds);
    for round in 0..rounds {
        if round > 0 {
            engine.decide_replay(ReplayDecision::PlayAgain)?;
        }
        let summary = run_round(player.as_mut(), &mut engine, &mut rng)?;
        summaries.push(summary);
    }

    let wins = summaries
        .iter()
        .filter(|s| s.status == GameStatus::Won)
        .count();
    let losses = summaries
        .iter()
        .filter(|s| s.status == GameStatus::Lost)
        .count();

    let result = json!({
        "seed": seed,
        "strategy": strategy,
        "rounds": summaries,
        "wins": wins,
        "losses": losses,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
