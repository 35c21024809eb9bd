//! `HostStateV1`: the inbound state message, kept as an opaque JSON object.
//!
//! Only three fields are interpreted: `grid` (three whitespace-separated
//! tokens, the middle one being the flattened board), `cursor` (`[x, y]`)
//! and `selected` (a piece letter or the empty string). Every other field is
//! carried through [`HostStateV1::patched`] untouched.

use serde_json::{Map, Value};

use crate::board::{Board, Coord, GridError};

/// Typed failure while decoding a host state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostStateError {
    /// The message was not valid JSON.
    Decode { detail: String },
    /// The message was valid JSON but not an object.
    NotAnObject,
    /// A required field is absent.
    MissingField { field: &'static str },
    /// A field is present but has the wrong shape.
    InvalidField { field: &'static str, detail: String },
    /// The board token failed to parse.
    Grid(GridError),
}

impl std::fmt::Display for HostStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { detail } => write!(f, "host state is not valid JSON: {detail}"),
            Self::NotAnObject => write!(f, "host state is not a JSON object"),
            Self::MissingField { field } => write!(f, "host state is missing `{field}`"),
            Self::InvalidField { field, detail } => {
                write!(f, "host state field `{field}` is invalid: {detail}")
            }
            Self::Grid(e) => write!(f, "host grid is invalid: {e}"),
        }
    }
}

impl std::error::Error for HostStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for HostStateError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// The `grid` field split into its three tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridToken {
    prefix: String,
    flat: String,
    suffix: String,
}

impl GridToken {
    /// Split a `grid` field value.
    ///
    /// # Errors
    ///
    /// [`HostStateError::InvalidField`] unless there are exactly three
    /// whitespace-separated tokens.
    pub fn parse(grid: &str) -> Result<Self, HostStateError> {
        let tokens: Vec<&str> = grid.split_whitespace().collect();
        let [prefix, flat, suffix] = tokens.as_slice() else {
            return Err(HostStateError::InvalidField {
                field: "grid",
                detail: format!("expected 3 tokens, found {}", tokens.len()),
            });
        };
        Ok(Self {
            prefix: (*prefix).to_string(),
            flat: (*flat).to_string(),
            suffix: (*suffix).to_string(),
        })
    }

    /// The flattened board token.
    #[must_use]
    pub fn flat(&self) -> &str {
        &self.flat
    }

    /// Decode the board token.
    ///
    /// # Errors
    ///
    /// Any [`GridError`] from [`Board::from_flat`].
    pub fn board(&self) -> Result<Board, GridError> {
        Board::from_flat(&self.flat)
    }

    /// Rebuild the field value around a different board.
    #[must_use]
    pub fn render(&self, board: &Board) -> String {
        format!("{} {} {}", self.prefix, board.flatten(), self.suffix)
    }
}

/// The echoed fields the dispatch loop watches to tell that a key landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub cursor: Option<Value>,
    pub selected: Option<Value>,
}

/// One host state message.
#[derive(Debug, Clone, PartialEq)]
pub struct HostStateV1 {
    fields: Map<String, Value>,
    grid: GridToken,
}

impl HostStateV1 {
    /// Decode a JSON text message.
    ///
    /// # Errors
    ///
    /// [`HostStateError::Decode`] for invalid JSON; otherwise as
    /// [`HostStateV1::from_value`].
    pub fn from_json(text: &str) -> Result<Self, HostStateError> {
        let value: Value = serde_json::from_str(text).map_err(|e| HostStateError::Decode {
            detail: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Wrap a decoded JSON value.
    ///
    /// # Errors
    ///
    /// - [`HostStateError::NotAnObject`] if `value` is not an object.
    /// - [`HostStateError::MissingField`] / [`HostStateError::InvalidField`]
    ///   if `grid` is absent, not a string, or not three tokens.
    pub fn from_value(value: Value) -> Result<Self, HostStateError> {
        let Value::Object(fields) = value else {
            return Err(HostStateError::NotAnObject);
        };
        let grid = match fields.get("grid") {
            None => return Err(HostStateError::MissingField { field: "grid" }),
            Some(Value::String(s)) => GridToken::parse(s)?,
            Some(other) => {
                return Err(HostStateError::InvalidField {
                    field: "grid",
                    detail: format!("expected string, found {other}"),
                })
            }
        };
        Ok(Self { fields, grid })
    }

    /// The parsed `grid` field.
    #[must_use]
    pub fn grid(&self) -> &GridToken {
        &self.grid
    }

    /// Decode the board carried by this state.
    ///
    /// # Errors
    ///
    /// Any [`GridError`] from the board token.
    pub fn board(&self) -> Result<Board, GridError> {
        self.grid.board()
    }

    /// The `cursor` field as a coordinate, if present and well-formed.
    #[must_use]
    pub fn cursor(&self) -> Option<Coord> {
        let pair = self.fields.get("cursor")?.as_array()?;
        let [x, y] = pair.as_slice() else {
            return None;
        };
        let x = usize::try_from(x.as_u64()?).ok()?;
        let y = usize::try_from(y.as_u64()?).ok()?;
        Some(Coord::new(x, y))
    }

    /// The `selected` piece letter; the empty string means no selection.
    #[must_use]
    pub fn selected(&self) -> Option<char> {
        self.fields
            .get("selected")
            .and_then(Value::as_str)
            .and_then(|s| s.chars().next())
    }

    /// Raw `cursor` / `selected` values for change detection.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            cursor: self.fields.get("cursor").cloned(),
            selected: self.fields.get("selected").cloned(),
        }
    }

    /// A hypothetical successor: copy of this state with `grid`, `cursor`
    /// and `selected` replaced.
    #[must_use]
    pub fn patched(&self, board: &Board, cursor: Coord, selected: char) -> Self {
        let mut fields = self.fields.clone();
        fields.insert("grid".into(), Value::String(self.grid.render(board)));
        fields.insert("cursor".into(), serde_json::json!([cursor.x, cursor.y]));
        fields.insert("selected".into(), Value::String(selected.to_string()));
        let grid = GridToken {
            prefix: self.grid.prefix.clone(),
            flat: board.flatten(),
            suffix: self.grid.suffix.clone(),
        };
        Self { fields, grid }
    }

    /// The full message as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
