//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Invalid grid configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// State id outside of the grid.
    #[error("State id {id} is out of range (number of states: {n_states})")]
    OutOfRange {
        /// The offending state id.
        id: usize,

        /// Number of states of the grid.
        n_states: usize,
    },

    /// Action index outside of the four cardinal moves.
    #[error("Invalid action: {0}")]
    InvalidAction(usize),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKey(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueType(String),
}
