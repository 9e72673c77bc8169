//! One complete run: validate, build the table, trace, decide acceptance.

use crate::automaton::{Automaton, StateId, StateSet};
use crate::config::SimulationInput;
use crate::error::{Error, Result};
use crate::trace::{Termination, Trace, TraceBuilder};
use log::{debug, info};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// Everything a renderer needs to draw one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// The input string exactly as submitted, for labelling.
    pub input_string: String,
    /// Input symbols in order; `symbols[i]` leads from layer `i` to `i + 1`.
    pub symbols: Vec<String>,
    pub num_states: StateId,
    pub final_states: StateSet,
    pub trace: Trace,
    pub accepted: bool,
    /// Final states present in the last layer of an exhausted run.
    pub accepting_states: Vec<StateId>,
}

impl SimulationReport {
    pub fn termination(&self) -> Termination {
        self.trace.termination()
    }

    /// Whether `state` should be drawn as a final state.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }
}

/// Run the automaton described by `input` over its input string.
///
/// Validation errors are returned before anything is built. A run that gets
/// stuck is a normal, rejected result. A panic inside the core is caught here
/// and reported as [`Error::Internal`].
pub fn simulate(input: &SimulationInput) -> Result<SimulationReport> {
    let automaton = input.validate()?;
    panic::catch_unwind(AssertUnwindSafe(|| run(&input.input_string, &automaton)))
        .map_err(|payload| Error::Internal(panic_message(payload.as_ref())))
}

/// Trace an already validated automaton.
pub fn run(input_string: &str, automaton: &Automaton) -> SimulationReport {
    debug!(
        "simulating {} state(s), {} start state(s), {} transition(s) over {} symbol(s)",
        automaton.num_states,
        automaton.start_states.len(),
        automaton.transitions.len(),
        automaton.input.len()
    );

    let trace = TraceBuilder::new(&automaton.transitions)
        .build(&automaton.start_states, &automaton.input);
    let accepted = trace.is_accepted(&automaton.final_states);
    let accepting_states = trace.accepting_states(&automaton.final_states);

    match trace.termination() {
        Termination::Exhausted if accepted => {
            info!("`{input_string}` accepted in {accepting_states:?}")
        }
        Termination::Exhausted => info!("`{input_string}` rejected: no final state reached"),
        Termination::Stuck { step } => {
            info!("`{input_string}` rejected: no state reachable at step {step}")
        }
    }

    SimulationReport {
        input_string: input_string.to_owned(),
        symbols: automaton.input_tokens(),
        num_states: automaton.num_states,
        final_states: automaton.final_states.clone(),
        trace,
        accepted,
        accepting_states,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown internal failure".to_owned()
    }
}
