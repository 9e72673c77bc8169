//! Layer-by-layer construction of the provenance graph.

use crate::automaton::{StateId, StateSet, SymbolId, TransitionTable};
use crate::trace::node::{Layer, NodeRef};
use crate::trace::{Termination, Trace};
use log::{debug, trace};

/// Expand `layer` to its epsilon-closure in place.
///
/// Every pass walks all nodes present at the start of the pass, adds nodes
/// for unseen λ destinations and records λ parents. Passes repeat until one
/// adds neither a node nor an edge. Returns the number of nodes plus edges
/// added, so a converged layer yields 0.
pub fn expand_epsilon_closure(layer: &mut Layer, table: &TransitionTable) -> usize {
    let step = layer.step;
    let mut added = 0;
    loop {
        let mut changed = 0;
        let sources: Vec<StateId> = layer.states().collect();
        for source in sources {
            let parent = NodeRef::new(source, step);
            for &dest in table.epsilon(source) {
                if !layer.contains(dest) {
                    changed += 1;
                }
                if layer.node_mut(dest).add_lambda_parent(parent) {
                    trace!("step {step}: {source} -λ-> {dest}");
                    changed += 1;
                }
            }
        }
        if changed == 0 {
            return added;
        }
        added += changed;
    }
}

/// Consume `symbol` from every node of `current`, producing the next layer
/// before its epsilon-closure. The result may be empty.
pub fn step_layer(current: &Layer, symbol: SymbolId, table: &TransitionTable) -> Layer {
    let mut next = Layer::new(current.step + 1);
    for node in current.nodes() {
        for &dest in table.lookup(node.state, symbol) {
            next.node_mut(dest).input_parents.push(node.id());
        }
    }
    next
}

/// Runs one simulation over a borrowed transition table.
pub struct TraceBuilder<'a> {
    table: &'a TransitionTable,
}

impl<'a> TraceBuilder<'a> {
    pub fn new(table: &'a TransitionTable) -> Self {
        Self { table }
    }

    /// Build the trace for `input` starting from `starts`.
    ///
    /// Stops early, without appending the empty layer, as soon as a step
    /// reaches no state.
    pub fn build(&self, starts: &StateSet, input: &[SymbolId]) -> Trace {
        let mut first = Layer::from_states(0, starts.iter());
        expand_epsilon_closure(&mut first, self.table);
        debug!("layer 0: {} node(s)", first.len());

        if first.is_empty() {
            return Trace::new(vec![first], Termination::Stuck { step: 0 });
        }

        let mut layers = vec![first];
        for &symbol in input {
            let Some(current) = layers.last() else {
                break;
            };
            let mut next = step_layer(current, symbol, self.table);
            if next.is_empty() {
                debug!("layer {} is empty, stopping", next.step);
                let step = next.step;
                return Trace::new(layers, Termination::Stuck { step });
            }
            expand_epsilon_closure(&mut next, self.table);
            debug!("layer {}: {} node(s)", next.step, next.len());
            layers.push(next);
        }

        Trace::new(layers, Termination::Exhausted)
    }
}
