//! Square bitboards whose side is chosen at runtime.
//!
//! A board of side `size` packs its cells row-major into the low
//! `size * size` bits of an unsigned integer `T`. Nothing here allocates, so
//! the type works under `no_std`.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// `n * n` cells do not fit in the `capacity` bits of `T`.
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column outside `[0, size)`.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => write!(
                f,
                "a {}x{} board needs {} bits but only {} are available",
                n,
                n,
                n * n,
                capacity
            ),
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

/// A `size`×`size` set of cells stored in the bits of `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    size: usize,
}

#[inline]
fn capacity<T>() -> usize {
    mem::size_of::<T>() * 8
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Largest side length whose cells fit in `T`.
    pub fn max_size() -> usize {
        let bits = capacity::<T>();
        (0..=bits).take_while(|n| n * n <= bits).last().unwrap_or(0)
    }

    /// Empty board of side `size`.
    pub fn new(size: usize) -> Result<Self, BitBoardError> {
        let capacity = capacity::<T>();
        if size * size > capacity {
            return Err(BitBoardError::SizeTooLarge { n: size, capacity });
        }
        Ok(BitBoard {
            bits: T::zero(),
            size,
        })
    }

    /// Board with exactly the listed cells set.
    pub fn from_cells<I>(size: usize, cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new(size)?;
        for (r, c) in cells {
            board.set(r, c)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let bit = self.bit(row, col)?;
        Ok(!(self.bits & bit).is_zero())
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.bits = self.bits | self.bit(row, col)?;
        Ok(())
    }

    /// True when every cell set in `other` is also set here.
    pub fn contains_all(&self, other: &Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// True when the boards share at least one cell.
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    /// Set cells in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits {
            board: self,
            idx: 0,
        }
    }

    /// Single-bit mask for (row, col).
    #[inline]
    fn bit(&self, row: usize, col: usize) -> Result<T, BitBoardError> {
        if row >= self.size || col >= self.size {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        Ok(T::one() << (row * self.size + col))
    }

    /// All cells of a board of side `size`.
    #[inline]
    fn full(size: usize) -> T {
        let used = size * size;
        if used == capacity::<T>() {
            !T::zero()
        } else {
            (T::one() << used) - T::one()
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard({}x{})", self.size, self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = if self.get(r, c).unwrap_or(false) { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`BitBoard::iter_set_bits`].
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        if self.idx >= n * n {
            return None;
        }
        let remaining = self.board.bits >> self.idx;
        if remaining.is_zero() {
            self.idx = n * n;
            return None;
        }
        let idx = self.idx + remaining.trailing_zeros() as usize;
        self.idx = idx + 1;
        Some((idx / n, idx % n))
    }
}

// Binary operators assume both sides share a size; the result keeps the
// left-hand size and is masked to it.

impl<T> BitAnd for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        debug_assert_eq!(self.size, rhs.size);
        BitBoard {
            bits: self.bits & rhs.bits,
            size: self.size,
        }
    }
}

impl<T> BitOr for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        debug_assert_eq!(self.size, rhs.size);
        BitBoard {
            bits: (self.bits | rhs.bits) & Self::full(self.size),
            size: self.size,
        }
    }
}

impl<T> BitOrAssign for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Complement within the board's cells.
impl<T> Not for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::full(self.size),
            size: self.size,
        }
    }
}
