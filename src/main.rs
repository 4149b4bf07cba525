#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use solo_battleship::{
    init_logging, print_player_view, print_round_over, run_round, AiPlayer, CliPlayer, GameConfig,
    GameEngine, RoundControl, SunkDetection,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum SunkMode {
    PerShip,
    LengthScan,
}

#[cfg(feature = "std")]
impl From<SunkMode> for SunkDetection {
    fn from(mode: SunkMode) -> Self {
        match mode {
            SunkMode::PerShip => SunkDetection::PerShip,
            SunkMode::LengthScan => SunkDetection::LengthScan,
        }
    }
}

#[derive(Args, Debug)]
#[cfg(feature = "std")]
struct GameArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON file with a GameConfig; flags override its fields")]
    config: Option<PathBuf>,
    #[arg(long)]
    board_size: Option<usize>,
    #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. --fleet 1,3,3,4,5")]
    fleet: Option<Vec<usize>>,
    #[arg(long, value_enum)]
    sunk_detection: Option<SunkMode>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play rounds interactively from the terminal.
    Play {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Watch the AI play one round.
    Watch {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[cfg(feature = "std")]
fn load_config(args: &GameArgs) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
            serde_json::from_str(&text)
                .map_err(|e| anyhow::anyhow!("parsing {}: {}", path.display(), e))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(size) = args.board_size {
        config.board_size = size;
    }
    if let Some(fleet) = &args.fleet {
        config.fleet = fleet.clone();
    }
    if let Some(mode) = args.sunk_detection {
        config.sunk_detection = mode.into();
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "std")]
fn player_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { game } => {
            let config = load_config(&game)?;
            if let Some(s) = config.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = player_rng(config.seed);
            let mut engine = GameEngine::new(config)?;
            let mut player = CliPlayer::stdin();
            println!("Single Player Battleship. Type 'help' for commands.");
            loop {
                let summary = run_round(&mut player, &mut engine, &mut rng)?;
                if summary.quit {
                    println!("Goodbye!");
                    break;
                }
                print_round_over(&engine);
                let decision = player.ask_replay()?;
                match engine.decide_replay(decision)? {
                    RoundControl::NewRound => print_player_view(&engine),
                    RoundControl::Exit => {
                        println!("Goodbye!");
                        break;
                    }
                }
            }
        }
        Commands::Watch { game } => {
            let config = load_config(&game)?;
            let mut rng = player_rng(config.seed);
            let mut engine = GameEngine::new(config)?;
            let mut ai = AiPlayer::new();
            let summary = run_round(&mut ai, &mut engine, &mut rng)?;
            print_round_over(&engine);
            println!("{} shots resolved.", summary.shots);
        }
    }
    Ok(())
}
