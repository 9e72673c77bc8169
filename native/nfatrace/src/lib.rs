//! Epsilon-NFA simulation with a layered provenance trace.
//!
//! [`config::SimulationInput`] holds the raw definition, validation turns it
//! into an [`automaton::Automaton`], and [`trace::TraceBuilder`] records every
//! configuration reached while consuming the input, one layer per symbol.

pub mod automaton;
pub mod config;
pub mod error;
pub mod export;
#[cfg(feature = "python")]
mod python_bindings;
pub mod simulation;
pub mod trace;

pub use config::SimulationInput;
pub use error::{Error, Result};
pub use simulation::{SimulationReport, simulate};
