//! Common types for the engine: shot outcomes, events, counters and errors.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoardError;
use crate::game::GameStatus;

/// Whether a resolved shot struck a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Hit,
    Miss,
}

/// Consequences of a shot, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A ship of the given length had its last cell fired upon.
    ShipSunk { length: usize },
    /// The miss streak reached the strike threshold.
    StrikeRecorded,
    /// Every ship of the fleet is sunk.
    GameWon,
    /// The strike limit was reached.
    GameLost,
}

/// Round counters, visible to the caller after every shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// Misses since the last hit or the last strike.
    pub consecutive_misses: usize,
    pub strikes: usize,
    pub total_hits: usize,
    pub total_misses: usize,
    pub ships_sunk: usize,
}

/// Result of a resolved shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub row: usize,
    pub col: usize,
    pub outcome: Outcome,
    pub events: Vec<Event>,
    /// Counters after the shot was applied.
    pub counters: Counters,
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }

    /// Lengths of the ships sunk by this shot.
    pub fn sunk_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::ShipSunk { length } => Some(*length),
            _ => None,
        })
    }

    /// Returns `true` if this shot ended the round.
    pub fn ended_round(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, Event::GameWon | Event::GameLost))
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship does not fit inside the board.
    ShipOutOfBounds,
    /// Ships must cover at least one cell.
    ZeroLengthShip,
    /// The cell was already fired upon.
    AlreadyFired,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ZeroLengthShip => write!(f, "Ship length must be at least 1"),
            BoardError::AlreadyFired => write!(f, "Cell was already fired upon"),
        }
    }
}

/// Errors raised while laying out a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    Board(BoardError),
    /// Random placement kept reaching dead ends.
    Exhausted { restarts: usize },
}

impl From<BoardError> for PlacementError {
    fn from(err: BoardError) -> Self {
        PlacementError::Board(err)
    }
}

impl From<BitBoardError> for PlacementError {
    fn from(err: BitBoardError) -> Self {
        PlacementError::Board(BoardError::from(err))
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Board(e) => write!(f, "{}", e),
            PlacementError::Exhausted { restarts } => write!(
                f,
                "Unable to place fleet after {} restarts",
                restarts
            ),
        }
    }
}

/// Rejected shots and round transitions. None of these mutate engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// Coordinates outside `[0, size)`.
    OutOfBounds { row: usize, col: usize, size: usize },
    /// The cell was fired upon earlier this round.
    AlreadyFired { row: usize, col: usize },
    /// The round already ended with the carried status.
    InvalidTerminalOperation(GameStatus),
    /// A replay decision was submitted while the round is still running.
    RoundInProgress,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfBounds { row, col, size } => write!(
                f,
                "Shot ({}, {}) is outside the {}x{} board",
                row, col, size, size
            ),
            ShotError::AlreadyFired { row, col } => {
                write!(f, "Cell ({}, {}) was already fired upon", row, col)
            }
            ShotError::InvalidTerminalOperation(status) => {
                write!(f, "Round is over ({:?}); reset to play again", status)
            }
            ShotError::RoundInProgress => write!(f, "Round is still in progress"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
