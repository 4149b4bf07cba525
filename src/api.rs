//! Operation set consumed by front ends. Implementors own all game state;
//! callers only observe results.

use alloc::vec::Vec;

use crate::bitboard::BitBoard;
use crate::common::{Counters, ShotError, ShotResult};
use crate::config::Cells;
use crate::game::{GameStatus, ReplayDecision, RoundControl};

pub trait GameApi {
    fn fire(&mut self, row: usize, col: usize) -> Result<ShotResult, ShotError>;
    fn reset(&mut self);
    fn decide_replay(&mut self, decision: ReplayDecision) -> Result<RoundControl, ShotError>;
    fn status(&self) -> GameStatus;
    fn counters(&self) -> Counters;
    fn board_size(&self) -> usize;

    /// Fired cells that struck a ship.
    fn hits(&self) -> BitBoard<Cells>;
    /// Fired cells that found water.
    fn misses(&self) -> BitBoard<Cells>;
    /// Fleet lengths not yet reported sunk.
    fn remaining_lengths(&self) -> Vec<usize>;
}
