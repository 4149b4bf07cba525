//! Default rules and the runtime game configuration.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::PlacementError;

/// Integer backing every board bitboard.
pub type Cells = u128;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [usize; NUM_SHIPS] = [1, 3, 3, 4, 5];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 1 + 3 + 3 + 4 + 5;

pub const MISSES_PER_STRIKE: usize = 5;
pub const STRIKES_TO_LOSE: usize = 3;

/// Whole-fleet restarts allowed when random placement reaches a dead end.
pub const DEFAULT_PLACEMENT_RESTARTS: usize = 256;

/// Largest board side a `Cells` bitboard can hold: 11, since a `u128`
/// stores at most 121 cells. [`GameConfig::validate`] rejects larger boards
/// with [`ConfigError::BoardTooLarge`].
pub fn max_board_size() -> usize {
    BitBoard::<Cells>::max_size()
}

/// How a hit is turned into a sunk ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum SunkDetection {
    /// Each ship keeps its own cell mask from placement.
    #[default]
    PerShip,
    /// Match fully fired segments through the hit against fleet lengths.
    /// A segment counts only when its cells are exactly one placed ship's,
    /// so crossing or touching ships are never merged. Ships of equal
    /// length are reported by length alone.
    LengthScan,
}

/// Rules and fleet for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub board_size: usize,
    /// Ship lengths, placed in this order.
    pub fleet: Vec<usize>,
    pub misses_per_strike: usize,
    pub strikes_to_lose: usize,
    pub sunk_detection: SunkDetection,
    pub placement_restarts: usize,
    /// Fixed RNG seed for reproducible rounds.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            misses_per_strike: MISSES_PER_STRIKE,
            strikes_to_lose: STRIKES_TO_LOSE,
            sunk_detection: SunkDetection::default(),
            placement_restarts: DEFAULT_PLACEMENT_RESTARTS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Standard rules with a custom fleet and board size.
    pub fn new(fleet: &[usize], board_size: usize) -> Self {
        Self {
            board_size,
            fleet: fleet.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sunk_detection(mut self, mode: SunkDetection) -> Self {
        self.sunk_detection = mode;
        self
    }

    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().sum()
    }

    /// Check the configuration can produce a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::BoardTooSmall);
        }
        let max = max_board_size();
        if self.board_size > max {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max,
            });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for (index, &length) in self.fleet.iter().enumerate() {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip { index });
            }
            if length > self.board_size {
                return Err(ConfigError::ShipTooLong {
                    length,
                    board_size: self.board_size,
                });
            }
        }
        let cells = self.total_ship_cells();
        let capacity = self.board_size * self.board_size;
        if cells > capacity {
            return Err(ConfigError::FleetTooLarge { cells, capacity });
        }
        if self.misses_per_strike == 0 || self.strikes_to_lose == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }
}

/// Reasons a configuration or explicit layout is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall,
    BoardTooLarge { size: usize, max: usize },
    EmptyFleet,
    ZeroLengthShip { index: usize },
    ShipTooLong { length: usize, board_size: usize },
    FleetTooLarge { cells: usize, capacity: usize },
    /// Strike or loss threshold of zero.
    ZeroThreshold,
    /// An explicit layout does not list one position per fleet ship.
    LayoutMismatch { expected: usize, got: usize },
    Placement(PlacementError),
}

impl From<PlacementError> for ConfigError {
    fn from(err: PlacementError) -> Self {
        ConfigError::Placement(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall => write!(f, "Board size must be at least 1"),
            ConfigError::BoardTooLarge { size, max } => {
                write!(f, "Board size {} exceeds the maximum of {}", size, max)
            }
            ConfigError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip { index } => {
                write!(f, "Ship #{} has length 0", index)
            }
            ConfigError::ShipTooLong { length, board_size } => write!(
                f,
                "Ship of length {} does not fit on a {}x{} board",
                length, board_size, board_size
            ),
            ConfigError::FleetTooLarge { cells, capacity } => write!(
                f,
                "Fleet needs {} cells but the board only has {}",
                cells, capacity
            ),
            ConfigError::ZeroThreshold => {
                write!(f, "Miss and strike thresholds must be at least 1")
            }
            ConfigError::LayoutMismatch { expected, got } => write!(
                f,
                "Layout lists {} positions for a fleet of {} ships",
                got, expected
            ),
            ConfigError::Placement(e) => write!(f, "Placement failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
