//! `Board`: the N×N cell array behind one flattened grid token.
//!
//! # Layout
//!
//! Cells are stored row-major, so `cells[y * size + x]` is the cell at
//! column `x`, row `y`. [`Board::flatten`] reproduces the wire string
//! exactly, which makes the flattened string a sound deduplication key.
//!
//! # Two-cell contract
//!
//! [`Board::apply_move`] judges a piece's orientation from the first two
//! coordinates in scan order and shifts the piece by vacating one endpoint
//! and occupying the cell beyond the other. For two-cell pieces the first two
//! coordinates are the true endpoints. Longer pieces happen to move correctly
//! when contiguous, but nothing here checks contiguity: the host's grid is
//! trusted.

use std::collections::BTreeSet;

use crate::board::cell::{Cell, Coord, Direction, GOAL_PIECE};

/// Typed failure while decoding a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The flattened grid length is not a (non-zero) perfect square.
    MalformedGrid { len: usize },
    /// The length does not match the declared side.
    SizeMismatch { len: usize, size: usize },
    /// A character outside the grid alphabet.
    InvalidCell { index: usize, found: char },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedGrid { len } => {
                write!(f, "grid length {len} is not a perfect square")
            }
            Self::SizeMismatch { len, size } => {
                write!(f, "grid length {len} does not fit a {size}x{size} board")
            }
            Self::InvalidCell { index, found } => {
                write!(f, "invalid cell {found:?} at index {index}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// An N×N board of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Parse a flattened row-major grid of a known side length.
    ///
    /// # Errors
    ///
    /// - [`GridError::SizeMismatch`] if `flat` does not hold `size * size` cells
    ///   (or `size` is zero).
    /// - [`GridError::InvalidCell`] for any character outside `o`, `x`, `A..=Z`.
    pub fn parse(flat: &str, size: usize) -> Result<Self, GridError> {
        let len = flat.chars().count();
        if size == 0 || size.checked_mul(size) != Some(len) {
            return Err(GridError::SizeMismatch { len, size });
        }
        let cells = flat
            .chars()
            .enumerate()
            .map(|(index, found)| {
                Cell::from_char(found).ok_or(GridError::InvalidCell { index, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { size, cells })
    }

    /// Parse a flattened grid, deriving the side as the integer square root
    /// of its length.
    ///
    /// # Errors
    ///
    /// [`GridError::MalformedGrid`] if the length is zero or not a perfect
    /// square; otherwise as [`Board::parse`].
    pub fn from_flat(flat: &str) -> Result<Self, GridError> {
        let len = flat.chars().count();
        let size = integer_sqrt(len);
        if size == 0 || size * size != len {
            return Err(GridError::MalformedGrid { len });
        }
        Self::parse(flat, size)
    }

    /// Side length N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.x >= self.size || coord.y >= self.size {
            return None;
        }
        self.cells.get(coord.y * self.size + coord.x).copied()
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = coord.y * self.size + coord.x;
        self.cells[idx] = cell;
    }

    fn is_free(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Cell::is_empty)
    }

    /// Row `y` as a slice, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.size {
            return None;
        }
        Some(&self.cells[y * self.size..(y + 1) * self.size])
    }

    /// Row-major wire string.
    #[must_use]
    pub fn flatten(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }

    /// All coordinates holding `letter`, in column-major scan order
    /// (outer `x`, inner `y`). Empty when the letter is absent.
    #[must_use]
    pub fn piece_coordinates(&self, letter: char) -> Vec<Coord> {
        let target = Cell::Piece(letter);
        let mut coords = Vec::with_capacity(2);
        for x in 0..self.size {
            for y in 0..self.size {
                if self.cells[y * self.size + x] == target {
                    coords.push(Coord::new(x, y));
                }
            }
        }
        coords
    }

    /// Distinct piece letters, sorted.
    #[must_use]
    pub fn piece_letters(&self) -> BTreeSet<char> {
        self.cells
            .iter()
            .filter_map(|c| match c {
                Cell::Piece(letter) => Some(*letter),
                _ => None,
            })
            .collect()
    }

    /// Distinct piece letters in order of first appearance (row-major).
    #[must_use]
    pub fn piece_letters_in_order(&self) -> Vec<char> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        for cell in &self.cells {
            if let Cell::Piece(letter) = cell {
                if seen.insert(*letter) {
                    ordered.push(*letter);
                }
            }
        }
        ordered
    }

    /// Shift `letter` one cell in `direction`.
    ///
    /// Returns `None` when the piece is absent or has fewer than two cells,
    /// when its orientation does not match the axis of `direction`, or when
    /// the destination cell is out of bounds or not empty. On success the
    /// trailing endpoint is vacated, the cell beyond the leading endpoint is
    /// occupied, and every other cell is unchanged.
    #[must_use]
    pub fn apply_move(&self, letter: char, direction: Direction) -> Option<Board> {
        let coords = self.piece_coordinates(letter);
        let (&first, &last) = (coords.first()?, coords.last()?);
        let second = *coords.get(1)?;

        if direction.is_horizontal() && first.y != second.y {
            return None;
        }
        if !direction.is_horizontal() && first.x != second.x {
            return None;
        }

        let (vacate, occupy) = match direction {
            Direction::Right => (first, Coord::new(last.x + 1, last.y)),
            Direction::Down => (first, Coord::new(last.x, last.y + 1)),
            Direction::Left => (last, Coord::new(first.x.checked_sub(1)?, first.y)),
            Direction::Up => (last, Coord::new(first.x, first.y.checked_sub(1)?)),
        };
        if !self.is_free(occupy) {
            return None;
        }

        let mut next = self.clone();
        next.set(vacate, Cell::Empty);
        next.set(occupy, Cell::Piece(letter));
        Some(next)
    }

    /// The goal piece's leading cell: last in scan order.
    #[must_use]
    pub fn goal_front(&self) -> Option<Coord> {
        self.piece_coordinates(GOAL_PIECE).last().copied()
    }

    /// The exit row (the goal piece's row).
    #[must_use]
    pub fn goal_row(&self) -> Option<usize> {
        self.goal_front().map(|c| c.y)
    }

    /// Whether the goal piece touches the last column in any row.
    #[must_use]
    pub fn is_goal(&self) -> bool {
        let goal = Cell::Piece(GOAL_PIECE);
        (0..self.size).any(|y| self.cells[y * self.size + self.size - 1] == goal)
    }

    /// Cells strictly between the goal piece's leading cell and the exit.
    fn lane_ahead(&self) -> Option<&[Cell]> {
        let front = self.goal_front()?;
        let row = self.row(front.y)?;
        Some(&row[front.x + 1..])
    }

    /// Whether every cell ahead of the goal piece in its row is empty.
    /// `false` when there is no goal piece.
    #[must_use]
    pub fn lane_is_clear(&self) -> bool {
        self.lane_ahead()
            .is_some_and(|lane| lane.iter().all(|c| c.is_empty()))
    }

    /// Number of non-empty cells ahead of the goal piece in its row.
    /// `None` when there is no goal piece.
    #[must_use]
    pub fn obstacles_ahead(&self) -> Option<usize> {
        self.lane_ahead()
            .map(|lane| lane.iter().filter(|c| !c.is_empty()).count())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            let line: String = self.cells[y * self.size..(y + 1) * self.size]
                .iter()
                .map(|c| c.to_char())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = 0usize;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
