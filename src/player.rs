use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    api::GameApi,
    bitboard::BitBoard,
    common::{Counters, ShotError, ShotResult},
    config::Cells,
    game::GameStatus,
};

type BB = BitBoard<Cells>;

/// What the player can observe when choosing a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetView {
    pub hits: BB,
    pub misses: BB,
    pub remaining: Vec<usize>,
    pub counters: Counters,
}

impl TargetView {
    pub fn from_game<G: GameApi + ?Sized>(game: &G) -> Self {
        Self {
            hits: game.hits(),
            misses: game.misses(),
            remaining: game.remaining_lengths(),
            counters: game.counters(),
        }
    }

    pub fn size(&self) -> usize {
        self.hits.size()
    }

    pub fn is_fired(&self, row: usize, col: usize) -> bool {
        self.hits.get(row, col).unwrap_or(false) || self.misses.get(row, col).unwrap_or(false)
    }

    /// Cells not fired upon yet, row-major.
    pub fn unfired(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n * n)
            .map(move |i| (i / n, i % n))
            .filter(move |&(r, c)| !self.is_fired(r, c))
    }
}

/// A player's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fire(usize, usize),
    /// Abandon the current round and start a fresh one.
    NewRound,
    Quit,
}

/// Interface implemented by different player types.
pub trait Player {
    /// Choose the next action given the visible state of the round.
    fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _result: &ShotResult) {}

    /// Inform the player that the engine rejected its shot. Returning `false`
    /// aborts the round with that error.
    fn handle_rejected_shot(&mut self, _error: &ShotError) -> bool {
        false
    }
}

/// Fires uniformly at random among the cells not yet fired upon.
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action {
        let open: Vec<(usize, usize)> = view.unfired().collect();
        if open.is_empty() {
            return Action::Quit;
        }
        let (r, c) = open[rng.random_range(0..open.len())];
        Action::Fire(r, c)
    }
}

/// How a round driven by [`run_round`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSummary {
    pub status: GameStatus,
    pub counters: Counters,
    /// Shots resolved in the final round.
    pub shots: usize,
    /// The player quit before the round ended.
    pub quit: bool,
}

/// Drive `game` with `player` until the round ends or the player quits.
/// A `NewRound` action resets the engine and keeps playing.
pub fn run_round<G, P>(player: &mut P, game: &mut G, rng: &mut SmallRng) -> Result<RoundSummary, ShotError>
where
    G: GameApi + ?Sized,
    P: Player + ?Sized,
{
    let mut shots = 0;
    while !game.status().is_terminal() {
        let view = TargetView::from_game(&*game);
        match player.select_action(rng, &view) {
            Action::Fire(r, c) => match game.fire(r, c) {
                Ok(result) => {
                    shots += 1;
                    player.handle_shot_result(&result);
                }
                Err(err) => {
                    if !player.handle_rejected_shot(&err) {
                        return Err(err);
                    }
                }
            },
            Action::NewRound => {
                game.reset();
                shots = 0;
            }
            Action::Quit => {
                return Ok(RoundSummary {
                    status: game.status(),
                    counters: game.counters(),
                    shots,
                    quit: true,
                });
            }
        }
    }
    Ok(RoundSummary {
        status: game.status(),
        counters: game.counters(),
        shots,
        quit: false,
    })
}
