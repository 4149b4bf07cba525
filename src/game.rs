use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    board::Board,
    common::{Counters, Event, Outcome, PlacementError, ShotError, ShotResult},
    config::{ConfigError, GameConfig},
    ship::Orientation,
};

/// Current status of a round. `InProgress` is the non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Answer to the question asked once a round has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDecision {
    PlayAgain,
    Quit,
}

/// What the caller should do after a replay decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundControl {
    /// A fresh round has been laid out.
    NewRound,
    /// The caller should shut down; the engine was left untouched.
    Exit,
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(not(feature = "std"))]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    // no entropy source without std; embedders should pass a seed
    SmallRng::seed_from_u64(seed.unwrap_or(0x5EED_BA77_1E5B_1B5u64))
}

/// Single-player engine holding the hidden board and the round counters.
pub struct GameEngine {
    config: GameConfig,
    rng: SmallRng,
    board: Board,
    counters: Counters,
    status: GameStatus,
    sunk_lengths: Vec<usize>,
    round: u32,
}

impl GameEngine {
    /// Validate `config` and lay out the first round.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = seeded_rng(config.seed);
        Self::with_rng(config, rng)
    }

    /// Standard rules with a custom fleet and board size.
    pub fn new_game(fleet: &[usize], board_size: usize) -> Result<Self, ConfigError> {
        Self::new(GameConfig::new(fleet, board_size))
    }

    /// Like [`GameEngine::new`] but drawing placements from `rng`.
    pub fn with_rng(config: GameConfig, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::place_fleet(
            config.board_size,
            &config.fleet,
            &mut rng,
            config.placement_restarts,
        )?;
        log::info!(
            "new game: {}x{} board, fleet {:?}, {:?} sunk detection",
            config.board_size,
            config.board_size,
            config.fleet,
            config.sunk_detection
        );
        Ok(Self::from_parts(config, rng, board))
    }

    /// Start the first round from an explicit layout, one `(row, col,
    /// orientation)` per fleet ship in order. Later rounds are random.
    pub fn with_layout(
        config: GameConfig,
        layout: &[(usize, usize, Orientation)],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if layout.len() != config.fleet.len() {
            return Err(ConfigError::LayoutMismatch {
                expected: config.fleet.len(),
                got: layout.len(),
            });
        }
        let mut board = Board::new(config.board_size).map_err(PlacementError::from)?;
        for (&length, &(row, col, orientation)) in config.fleet.iter().zip(layout) {
            board
                .place(length, row, col, orientation)
                .map_err(PlacementError::from)?;
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::from_parts(config, rng, board))
    }

    fn from_parts(config: GameConfig, rng: SmallRng, board: Board) -> Self {
        Self {
            config,
            rng,
            board,
            counters: Counters::default(),
            status: GameStatus::InProgress,
            sunk_lengths: Vec::new(),
            round: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn fleet(&self) -> &[usize] {
        &self.config.fleet
    }

    /// Rounds played so far, counting the current one.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn consecutive_misses(&self) -> usize {
        self.counters.consecutive_misses
    }

    pub fn strikes(&self) -> usize {
        self.counters.strikes
    }

    pub fn total_hits(&self) -> usize {
        self.counters.total_hits
    }

    pub fn total_misses(&self) -> usize {
        self.counters.total_misses
    }

    pub fn ships_sunk(&self) -> usize {
        self.counters.ships_sunk
    }

    /// Fleet lengths not yet reported sunk this round.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        let mut remaining = self.config.fleet.clone();
        for sunk in &self.sunk_lengths {
            if let Some(pos) = remaining.iter().position(|l| l == sunk) {
                remaining.swap_remove(pos);
            }
        }
        remaining
    }

    /// Resolve a shot at (row, col). Rejected shots leave every counter
    /// untouched.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotResult, ShotError> {
        if self.status.is_terminal() {
            return Err(ShotError::InvalidTerminalOperation(self.status));
        }
        let size = self.config.board_size;
        if row >= size || col >= size {
            return Err(ShotError::OutOfBounds { row, col, size });
        }
        let hit = self
            .board
            .fire(row, col)
            .map_err(|_| ShotError::AlreadyFired { row, col })?;

        let mut events = Vec::new();
        let outcome = if hit {
            self.counters.total_hits += 1;
            self.counters.consecutive_misses = 0;
            let sunk = self
                .board
                .newly_sunk(row, col, self.config.sunk_detection, &self.config.fleet);
            for length in sunk {
                self.counters.ships_sunk += 1;
                self.sunk_lengths.push(length);
                log::info!("ship of length {} sunk at ({}, {})", length, row, col);
                events.push(Event::ShipSunk { length });
            }
            if self.counters.ships_sunk == self.config.fleet.len() {
                self.status = GameStatus::Won;
                log::info!("round {} won after {} hits", self.round, self.counters.total_hits);
                events.push(Event::GameWon);
            }
            Outcome::Hit
        } else {
            self.counters.total_misses += 1;
            self.counters.consecutive_misses += 1;
            if self.counters.consecutive_misses >= self.config.misses_per_strike {
                self.counters.strikes += 1;
                self.counters.consecutive_misses = 0;
                log::info!("strike {} recorded", self.counters.strikes);
                events.push(Event::StrikeRecorded);
                if self.counters.strikes >= self.config.strikes_to_lose {
                    self.status = GameStatus::Lost;
                    log::info!("round {} lost after {} misses", self.round, self.counters.total_misses);
                    events.push(Event::GameLost);
                }
            }
            Outcome::Miss
        };
        log::debug!("shot ({}, {}) -> {:?} {:?}", row, col, outcome, events);

        Ok(ShotResult {
            row,
            col,
            outcome,
            events,
            counters: self.counters,
        })
    }

    /// Discard the board and counters and lay out a fresh round.
    pub fn reset(&mut self) {
        self.board = self.place_until_success();
        self.counters = Counters::default();
        self.status = GameStatus::InProgress;
        self.sunk_lengths.clear();
        self.round += 1;
        log::info!("round {} started", self.round);
    }

    /// The configuration already produced one complete layout, so every
    /// attempt succeeds with positive probability.
    fn place_until_success(&mut self) -> Board {
        loop {
            match Board::place_fleet(
                self.config.board_size,
                &self.config.fleet,
                &mut self.rng,
                self.config.placement_restarts,
            ) {
                Ok(board) => return board,
                Err(e) => log::warn!("layout failed, retrying: {}", e),
            }
        }
    }

    /// Apply the caller's answer to the end-of-round question.
    pub fn decide_replay(&mut self, decision: ReplayDecision) -> Result<RoundControl, ShotError> {
        if !self.status.is_terminal() {
            return Err(ShotError::RoundInProgress);
        }
        match decision {
            ReplayDecision::PlayAgain => {
                self.reset();
                Ok(RoundControl::NewRound)
            }
            ReplayDecision::Quit => Ok(RoundControl::Exit),
        }
    }
}

impl crate::api::GameApi for GameEngine {
    fn fire(&mut self, row: usize, col: usize) -> Result<ShotResult, ShotError> {
        GameEngine::fire(self, row, col)
    }

    fn reset(&mut self) {
        GameEngine::reset(self)
    }

    fn decide_replay(&mut self, decision: ReplayDecision) -> Result<RoundControl, ShotError> {
        GameEngine::decide_replay(self, decision)
    }

    fn status(&self) -> GameStatus {
        GameEngine::status(self)
    }

    fn counters(&self) -> Counters {
        GameEngine::counters(self)
    }

    fn board_size(&self) -> usize {
        GameEngine::board_size(self)
    }

    fn hits(&self) -> crate::BitBoard<crate::Cells> {
        self.board.hits()
    }

    fn misses(&self) -> crate::BitBoard<crate::Cells> {
        self.board.misses()
    }

    fn remaining_lengths(&self) -> Vec<usize> {
        GameEngine::remaining_lengths(self)
    }
}
