//! In-process game host.
//!
//! Applies received keys to a real board with the host's rules: the cursor
//! moves one cell per direction key, the toggle key selects the piece under
//! the cursor (or clears the selection), and while a piece is selected a
//! direction key drags it along with the cursor. Every `recv` is one tick
//! and returns the current state.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rushlane_agent::channel::{ChannelError, HostChannel, OutboundMessage};
use rushlane_agent::clock::Clock;
use rushlane_kernel::board::{Board, Cell as BoardCell, Coord, Direction};
use rushlane_kernel::host::HostStateV1;
use rushlane_search::keys::Key;

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl SteppedClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for SteppedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// A host that plays one board until it is solved or runs out of ticks.
pub struct SimHost {
    board: Board,
    cursor: Coord,
    selected: Option<char>,
    joined: Option<String>,
    keys: Vec<Key>,
    ticks_left: usize,
    tick: Duration,
    clock: SteppedClock,
    closing: bool,
    frozen: bool,
    next_level: Option<(usize, Board, Coord)>,
}

impl SimHost {
    /// # Panics
    ///
    /// Panics if `flat` is not a well-formed board (test-only).
    #[must_use]
    pub fn new(flat: &str, cursor: Coord, max_ticks: usize, clock: SteppedClock) -> Self {
        Self {
            board: Board::from_flat(flat).unwrap(),
            cursor,
            selected: None,
            joined: None,
            keys: Vec::new(),
            ticks_left: max_ticks,
            tick: Duration::from_millis(1),
            clock,
            closing: false,
            frozen: false,
            next_level: None,
        }
    }

    /// Replace the board with `flat` (cursor at `cursor`, nothing selected)
    /// once `after_keys` keys have been received.
    ///
    /// # Panics
    ///
    /// Panics if `flat` is not a well-formed board (test-only).
    #[must_use]
    pub fn switching_level(mut self, after_keys: usize, flat: &str, cursor: Coord) -> Self {
        self.next_level = Some((after_keys, Board::from_flat(flat).unwrap(), cursor));
        self
    }

    /// Time that passes on every tick (default 1ms).
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Record keys but never apply them, like a host that stopped listening.
    #[must_use]
    pub fn ignoring_keys(mut self) -> Self {
        self.frozen = true;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn joined_as(&self) -> Option<&str> {
        self.joined.as_deref()
    }

    /// Every key received, in order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn state(&self) -> HostStateV1 {
        let selected = self.selected.map(String::from).unwrap_or_default();
        HostStateV1::from_value(serde_json::json!({
            "grid": format!("1 {} 0", self.board.flatten()),
            "cursor": [self.cursor.x, self.cursor.y],
            "selected": selected,
        }))
        .unwrap_or_else(|e| panic!("simulated state is invalid: {e}"))
    }

    fn press(&mut self, key: Key) {
        self.keys.push(key);
        if !self.frozen {
            self.apply(key);
        }
        if self
            .next_level
            .as_ref()
            .is_some_and(|(after, _, _)| *after == self.keys.len())
        {
            if let Some((_, board, cursor)) = self.next_level.take() {
                self.board = board;
                self.cursor = cursor;
                self.selected = None;
            }
        }
    }

    fn apply(&mut self, key: Key) {
        let direction = match key {
            Key::Toggle => {
                self.selected = match (self.selected, self.board.get(self.cursor)) {
                    (None, Some(BoardCell::Piece(letter))) => Some(letter),
                    _ => None,
                };
                return;
            }
            Key::Up => Direction::Up,
            Key::Left => Direction::Left,
            Key::Down => Direction::Down,
            Key::Right => Direction::Right,
        };
        let Some(target) = step(self.cursor, direction, self.board.size()) else {
            return;
        };
        match self.selected {
            None => self.cursor = target,
            Some(letter) => {
                if let Some(next) = self.board.apply_move(letter, direction) {
                    self.board = next;
                    self.cursor = target;
                }
            }
        }
    }
}

fn step(from: Coord, direction: Direction, size: usize) -> Option<Coord> {
    let to = match direction {
        Direction::Right => Coord::new(from.x + 1, from.y),
        Direction::Down => Coord::new(from.x, from.y + 1),
        Direction::Left => Coord::new(from.x.checked_sub(1)?, from.y),
        Direction::Up => Coord::new(from.x, from.y.checked_sub(1)?),
    };
    (to.x < size && to.y < size).then_some(to)
}

impl HostChannel for SimHost {
    fn send(&mut self, message: &OutboundMessage) -> Result<(), ChannelError> {
        match message {
            OutboundMessage::Join { name } => self.joined = Some(name.clone()),
            OutboundMessage::Key(key) => self.press(*key),
        }
        Ok(())
    }

    /// Closes the session one tick after the board is solved.
    fn recv(&mut self) -> Result<HostStateV1, ChannelError> {
        if self.closing || self.ticks_left == 0 {
            return Err(ChannelError::Closed);
        }
        self.ticks_left -= 1;
        self.clock.advance(self.tick);
        self.closing = self.board.is_goal();
        Ok(self.state())
    }
}
