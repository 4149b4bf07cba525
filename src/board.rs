//! Hidden board: ship placement, fired cells and sunk detection.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, PlacementError};
use crate::config::{Cells, SunkDetection};
use crate::ship::{run_fits, Orientation, Ship};

type BB = BitBoard<Cells>;

/// State of a single cell. A fired cell keeps its occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub occupied: bool,
    pub fired: bool,
}

pub struct Board {
    size: usize,
    ships: Vec<Ship<Cells>>,
    sunk: Vec<bool>,
    /// Segments already reported by the length scan.
    counted_segments: Vec<BB>,
    ship_map: BB,
    fired: BB,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let empty = BB::new(size)?;
        Ok(Board {
            size,
            ships: Vec::new(),
            sunk: Vec::new(),
            counted_segments: Vec::new(),
            ship_map: empty,
            fired: empty,
        })
    }

    /// Lay out `fleet` in order with random placement. When a ship has no
    /// valid position left, the board is cleared and the fleet starts over,
    /// at most `restarts` times.
    pub fn place_fleet<R: Rng + ?Sized>(
        size: usize,
        fleet: &[usize],
        rng: &mut R,
        restarts: usize,
    ) -> Result<Self, PlacementError> {
        for attempt in 0..=restarts {
            let mut board = Board::new(size)?;
            let mut complete = true;
            for &length in fleet {
                match board.random_placement(rng, length) {
                    Some((r, c, o)) => {
                        board.place(length, r, c, o)?;
                    }
                    None => {
                        log::debug!(
                            "no room for ship of length {} (attempt {}), restarting layout",
                            length,
                            attempt
                        );
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                return Ok(board);
            }
        }
        Err(PlacementError::Exhausted { restarts })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship<Cells>] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Every cell fired upon so far.
    pub fn fired(&self) -> BB {
        self.fired
    }

    /// Fired cells that held a ship.
    pub fn hits(&self) -> BB {
        self.fired & self.ship_map
    }

    /// Fired cells that held water.
    pub fn misses(&self) -> BB {
        self.fired & !self.ship_map
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        Ok(Cell {
            occupied: self.ship_map.get(row, col)?,
            fired: self.fired.get(row, col)?,
        })
    }

    /// Number of ships marked sunk by per-ship detection.
    pub fn ships_sunk(&self) -> usize {
        self.sunk.iter().filter(|s| **s).count()
    }

    /// Returns `true` if a ship of `length` fits at (row, col) without
    /// touching an occupied cell.
    pub fn can_place(&self, length: usize, row: usize, col: usize, orientation: Orientation) -> bool {
        if !run_fits(self.size, length, row, col, orientation) {
            return false;
        }
        (0..length).all(|i| {
            let (r, c) = orientation.step(row, col, i);
            !self.ship_map.get(r, c).unwrap_or(true)
        })
    }

    /// Returns `true` if any position is still free for a ship of `length`.
    pub fn has_room_for(&self, length: usize) -> bool {
        (0..self.size).any(|r| {
            (0..self.size).any(|c| {
                self.can_place(length, r, c, Orientation::Horizontal)
                    || self.can_place(length, r, c, Orientation::Vertical)
            })
        })
    }

    /// Place a ship of `length` at (row, col), returning its id.
    pub fn place(
        &mut self,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<usize, BoardError> {
        let id = self.ships.len();
        let ship = Ship::<Cells>::new(id, length, orientation, row, col, self.size)?;
        // ensure no overlap
        if self.ship_map.intersects(&ship.mask()) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= ship.mask();
        self.ships.push(ship);
        self.sunk.push(false);
        log::debug!("placed {:?}", ship);
        Ok(id)
    }

    /// Sample uniformly random (row, col, orientation) triples until one fits.
    /// Returns `None` without sampling when no position is left.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Option<(usize, usize, Orientation)> {
        if !self.has_room_for(length) {
            return None;
        }
        loop {
            let r = rng.random_range(0..self.size);
            let c = rng.random_range(0..self.size);
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            if self.can_place(length, r, c, orient) {
                return Some((r, c, orient));
            }
        }
    }

    /// Mark (row, col) as fired, returning whether it held a ship.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        if self.fired.get(row, col)? {
            return Err(BoardError::AlreadyFired);
        }
        self.fired.set(row, col)?;
        Ok(self.ship_map.get(row, col)?)
    }

    /// Lengths of ships that became sunk through the hit at (row, col).
    /// `fleet` bounds what the length scan may report.
    pub fn newly_sunk(
        &mut self,
        row: usize,
        col: usize,
        mode: SunkDetection,
        fleet: &[usize],
    ) -> Vec<usize> {
        match mode {
            SunkDetection::PerShip => self.newly_sunk_per_ship(row, col),
            SunkDetection::LengthScan => self.newly_sunk_by_length(row, col, fleet),
        }
    }

    fn newly_sunk_per_ship(&mut self, row: usize, col: usize) -> Vec<usize> {
        let mut lengths = Vec::new();
        for (i, ship) in self.ships.iter().enumerate() {
            if ship.contains(row, col) && !self.sunk[i] && ship.is_sunk(&self.fired) {
                self.sunk[i] = true;
                lengths.push(ship.length());
            }
        }
        lengths
    }

    /// Fully fired segments through (row, col) whose cells are exactly those
    /// of a placed ship of the segment's length. Each segment is reported
    /// once, and no length more often than it appears in `fleet`.
    fn newly_sunk_by_length(&mut self, row: usize, col: usize, fleet: &[usize]) -> Vec<usize> {
        let mut candidates = fleet.to_vec();
        candidates.sort_unstable();
        candidates.dedup();

        let mut lengths = Vec::new();
        for length in candidates {
            let in_fleet = fleet.iter().filter(|&&l| l == length).count();
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                for offset in 0..length {
                    let Some(segment) = self.segment_through(row, col, length, orientation, offset)
                    else {
                        continue;
                    };
                    if !self.fired.contains_all(&segment) || self.counted_segments.contains(&segment) {
                        continue;
                    }
                    let counted = self
                        .counted_segments
                        .iter()
                        .filter(|m| m.count_ones() == length)
                        .count();
                    if counted >= in_fleet {
                        continue;
                    }
                    if self
                        .ships
                        .iter()
                        .any(|s| s.length() == length && s.mask() == segment)
                    {
                        self.counted_segments.push(segment);
                        lengths.push(length);
                    }
                }
            }
        }
        lengths
    }

    /// Cells of the `length`-long segment along `orientation` that covers
    /// (row, col) at position `offset`, if it stays on the board.
    fn segment_through(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
        offset: usize,
    ) -> Option<BB> {
        let (r0, c0) = match orientation {
            Orientation::Horizontal => (row, col.checked_sub(offset)?),
            Orientation::Vertical => (row.checked_sub(offset)?, col),
        };
        if !run_fits(self.size, length, r0, c0, orientation) {
            return None;
        }
        BB::from_cells(self.size, (0..length).map(|i| orientation.step(r0, c0, i))).ok()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  fired: {:?},\n  sunk: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.fired, self.sunk, self.ships
        )
    }
}
