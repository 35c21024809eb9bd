//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only: a policy that cannot
//! run, or a host state whose board cannot be decoded. Running out of
//! frontier or budget is not an error; it is reported through
//! [`crate::tree::TerminationReasonV1`] and surfaces as "no plan".

use rushlane_kernel::board::GridError;
use rushlane_kernel::host::HostStateError;

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy has an option value that cannot run.
    InvalidPolicy { detail: String },
    /// The host state could not be interpreted.
    Host(HostStateError),
    /// The board token is malformed (e.g. not a perfect square).
    Grid(GridError),
    /// The board has no goal piece, so no exit row exists.
    MissingGoalPiece,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Host(e) => write!(f, "{e}"),
            Self::Grid(e) => write!(f, "malformed grid: {e}"),
            Self::MissingGoalPiece => write!(f, "board has no goal piece"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<HostStateError> for SearchError {
    fn from(e: HostStateError) -> Self {
        match e {
            HostStateError::Grid(g) => Self::Grid(g),
            other => Self::Host(other),
        }
    }
}
