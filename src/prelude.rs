//! Commonly used types and utilities for ease of import.

pub use crate::{
    run_round, AiPlayer, Event, GameApi, GameConfig, GameEngine, GameStatus, Outcome, Player,
    RandomPlayer, ReplayDecision, RoundControl, ShotError, ShotResult,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, print_player_view, print_round_over, CliPlayer};
