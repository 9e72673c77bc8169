//! Epsilon-NFA building blocks: states, symbols and the transition table.

mod state;
mod symbol;
mod transition_table;

pub use state::{StateId, StateSet};
pub use symbol::{EPSILON, EPSILON_MARKER, SymbolId, SymbolTable, is_epsilon};
pub use transition_table::{Destinations, TransitionTable};

/// A validated automaton together with the input it should be run on.
///
/// Produced by [`crate::config::SimulationInput::validate`]; everything in it
/// is owned by one simulation run.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub num_states: StateId,
    pub symbols: SymbolTable,
    pub transitions: TransitionTable,
    pub start_states: StateSet,
    pub final_states: StateSet,
    /// The input as interned symbols, in order.
    pub input: Vec<SymbolId>,
}

impl Automaton {
    /// Tokens of the input, for labelling.
    pub fn input_tokens(&self) -> Vec<String> {
        self.input
            .iter()
            .map(|&sym| self.symbols.resolve(sym).unwrap_or_default().to_owned())
            .collect()
    }
}
