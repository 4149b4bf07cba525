//! Ships as contiguous runs on a `BitBoard`.

use core::fmt;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::bitboard::BitBoard;
use crate::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from (`row`, `col`) along this orientation.
    #[inline]
    pub fn step(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + offset),
            Orientation::Vertical => (row + offset, col),
        }
    }
}

/// Returns `true` if a run of `length` cells from (`row`, `col`) stays on a
/// `size`×`size` board.
pub fn run_fits(size: usize, length: usize, row: usize, col: usize, orientation: Orientation) -> bool {
    if length == 0 || row >= size || col >= size {
        return false;
    }
    match orientation {
        Orientation::Horizontal => col + length <= size,
        Orientation::Vertical => row + length <= size,
    }
}

/// A ship placed on a board, identified by its fleet index.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    id: usize,
    length: usize,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: BitBoard<T>,
}

impl<T> Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Place ship `id` of `length` at (`row`, `col`) on a `size`×`size` board.
    pub fn new(
        id: usize,
        length: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
        size: usize,
    ) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::ZeroLengthShip);
        }
        if !run_fits(size, length, row, col, orientation) {
            return Err(BoardError::ShipOutOfBounds);
        }

        let mask = BitBoard::from_cells(size, (0..length).map(|i| orientation.step(row, col, i)))?;
        Ok(Ship {
            id,
            length,
            orientation,
            row,
            col,
            mask,
        })
    }

    /// Index of the ship in its fleet.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BitBoard<T> {
        self.mask
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Cells covered by the ship, from the origin outwards.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| self.orientation.step(self.row, self.col, i))
    }

    /// A ship is sunk once every one of its cells is in `fired`.
    pub fn is_sunk(&self, fired: &BitBoard<T>) -> bool {
        fired.contains_all(&self.mask)
    }
}

impl<T> fmt::Debug for Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, length: {}, origin: ({}, {}), orientation: {:?} }}",
            self.id, self.length, self.row, self.col, self.orientation,
        )
    }
}
