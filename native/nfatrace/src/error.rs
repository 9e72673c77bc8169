use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a simulation from being run.
///
/// An input that simply reaches no state is not an error; see
/// [`crate::trace::Termination::Stuck`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{field}: `{value}` is not a valid state number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid transition format on line {line_no}: `{line}` (expected `from symbol to`)")]
    MalformedTransition { line_no: usize, line: String },
    #[error("{field}: state {state} is out of range (the automaton has {num_states} states)")]
    StateOutOfRange {
        field: &'static str,
        state: u32,
        num_states: u32,
    },
    #[error("state count: {num_states} exceeds the supported maximum of {max}")]
    TooManyStates { num_states: u32, max: u32 },
    #[error("alphabet: `{0}` is reserved for λ transitions")]
    ReservedSymbol(String),
    #[error("input string: symbol {position} is the λ marker `#`, which cannot be consumed")]
    EpsilonInInput { position: usize },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("an error occurred: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
