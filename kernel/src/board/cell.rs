//! Cell values, grid coordinates and cardinal move directions.

/// The distinguished goal piece. Its row is the exit row.
pub const GOAL_PIECE: char = 'A';

/// Wire character for an empty cell.
pub const EMPTY_CHAR: char = 'o';

/// Wire character for an immovable wall cell.
pub const WALL_CHAR: char = 'x';

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Free cell (`'o'`).
    Empty,
    /// Cell occupied by the piece with this uppercase letter.
    Piece(char),
    /// Immovable obstacle (`'x'`). Never a piece, always blocks.
    Wall,
}

impl Cell {
    /// Decode a wire character. Returns `None` for characters outside the
    /// grid alphabet.
    ///
    /// Accepts any uppercase letter and the `x` wall, a superset of the
    /// host's `A`..=`P` pieces.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            EMPTY_CHAR => Some(Self::Empty),
            WALL_CHAR => Some(Self::Wall),
            'A'..='Z' => Some(Self::Piece(c)),
            _ => None,
        }
    }

    /// Encode back to the wire character.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Empty => EMPTY_CHAR,
            Self::Wall => WALL_CHAR,
            Self::Piece(c) => c,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// A grid coordinate: `x` is the column, `y` is the row.
///
/// Ordering is `(x, y)`, which is the column-major scan order used by
/// [`super::Board::piece_coordinates`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single-step cardinal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(1, 0)`
    Right,
    /// `(-1, 0)`
    Left,
    /// `(0, 1)`
    Down,
    /// `(0, -1)`
    Up,
}

impl Direction {
    /// Move generation order.
    pub const ALL: [Direction; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// The `(dx, dy)` displacement vector.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// Whether the move runs along the column axis (changes `x`).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}
