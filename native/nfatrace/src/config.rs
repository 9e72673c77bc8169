//! Raw simulation input and its validation.
//!
//! The fields mirror what a data-entry form collects: plain text, checked for
//! syntax only. [`SimulationInput::validate`] turns them into an
//! [`Automaton`] or fails on the first malformed field.

use crate::automaton::{
    Automaton, EPSILON_MARKER, StateId, StateSet, SymbolId, SymbolTable, TransitionTable,
    is_epsilon,
};
use crate::error::{Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted state count. Start and final sets are bit sets spanning
/// every state id up to the largest member.
pub const MAX_STATES: StateId = 1 << 16;

/// One simulation request, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Whitespace separated alphabet symbols.
    pub alphabet: String,
    /// Number of states; states are `0..num_states`.
    pub num_states: String,
    /// One `from symbol to` triple per line, `#` for λ.
    pub transitions: String,
    /// Whitespace separated start states.
    pub start_states: String,
    /// Whitespace separated final states.
    pub final_states: String,
    /// The string to run. Split on whitespace if it contains any, otherwise
    /// one symbol per character.
    pub input_string: String,
}

impl SimulationInput {
    /// The built-in testing example: strings over `{a, b}` containing `bb` or
    /// `bab`, run on `ababba`.
    pub fn example() -> Self {
        Self {
            alphabet: "a b".into(),
            num_states: "4".into(),
            transitions: "0 a 0\n0 b 0\n0 b 1\n1 a 2\n1 # 2\n2 b 3\n3 a 3\n3 b 3".into(),
            start_states: "0".into(),
            final_states: "3".into(),
            input_string: "ababba".into(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Replace the input string, keeping the automaton.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input_string = input.into();
        self
    }

    /// Validate every field and build the automaton for one run.
    pub fn validate(&self) -> Result<Automaton> {
        let num_states = parse_state("state count", self.num_states.trim())?;
        if num_states > MAX_STATES {
            return Err(Error::TooManyStates {
                num_states,
                max: MAX_STATES,
            });
        }

        let mut symbols = SymbolTable::new();
        for token in self.alphabet.split_whitespace() {
            if token == EPSILON_MARKER {
                return Err(Error::ReservedSymbol(token.to_owned()));
            }
            symbols.declare(token);
        }

        let start_states = parse_state_set("start states", &self.start_states, num_states)?;
        let final_states = parse_state_set("final states", &self.final_states, num_states)?;
        let transitions = parse_transitions(&self.transitions, num_states, &mut symbols)?;

        let mut input: Vec<SymbolId> = Vec::new();
        for (position, token) in input_tokens(&self.input_string).enumerate() {
            // λ never consumes input, so it cannot appear in the string
            if token == EPSILON_MARKER {
                return Err(Error::EpsilonInInput { position });
            }
            let symbol = symbols.intern(token);
            if !symbols.in_alphabet(symbol) {
                warn!("input symbol `{token}` is not in the alphabet");
            }
            input.push(symbol);
        }

        Ok(Automaton {
            num_states,
            symbols,
            transitions,
            start_states,
            final_states,
            input,
        })
    }
}

fn parse_state(field: &'static str, token: &str) -> Result<StateId> {
    token.parse().map_err(|_| Error::InvalidNumber {
        field,
        value: token.to_owned(),
    })
}

fn check_range(field: &'static str, state: StateId, num_states: StateId) -> Result<StateId> {
    if state < num_states {
        Ok(state)
    } else {
        Err(Error::StateOutOfRange {
            field,
            state,
            num_states,
        })
    }
}

fn parse_state_set(field: &'static str, text: &str, num_states: StateId) -> Result<StateSet> {
    text.split_whitespace()
        .map(|token| check_range(field, parse_state(field, token)?, num_states))
        .collect()
}

fn parse_transitions(
    text: &str,
    num_states: StateId,
    symbols: &mut SymbolTable,
) -> Result<TransitionTable> {
    const FIELD: &str = "transitions";

    let mut table = TransitionTable::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let &[from, symbol, to] = parts.as_slice() else {
            return Err(Error::MalformedTransition {
                line_no: idx + 1,
                line: line.to_owned(),
            });
        };
        let from = check_range(FIELD, parse_state(FIELD, from)?, num_states)?;
        let to = check_range(FIELD, parse_state(FIELD, to)?, num_states)?;
        let symbol_id = symbols.intern(symbol);
        if !is_epsilon(symbol_id) && !symbols.in_alphabet(symbol_id) {
            warn!("transition `{line}` uses `{symbol}`, which is not in the alphabet");
        }
        table.add(from, symbol_id, to);
    }
    Ok(table)
}

fn input_tokens(input: &str) -> Box<dyn Iterator<Item = &str> + '_> {
    let input = input.trim();
    if input.contains(char::is_whitespace) {
        Box::new(input.split_whitespace())
    } else {
        Box::new(input.char_indices().map(move |(i, c)| &input[i..i + c.len_utf8()]))
    }
}
