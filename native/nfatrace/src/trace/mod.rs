//! The provenance graph produced by simulating an automaton over one input.

mod builder;
mod node;

pub use builder::{TraceBuilder, expand_epsilon_closure, step_layer};
pub use node::{Layer, NodeRef, Step, TraceNode};

use crate::automaton::{StateId, StateSet};
use serde::Serialize;

/// How the builder stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Every input symbol was consumed with a non-empty layer after each.
    Exhausted,
    /// Consuming the symbol that leads to layer `step` reached no state.
    /// Layer 0 being empty is reported as `step: 0`.
    Stuck { step: Step },
}

/// Ordered layers plus the terminal state of the run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    layers: Vec<Layer>,
    termination: Termination,
}

impl Trace {
    pub(crate) fn new(layers: Vec<Layer>, termination: Termination) -> Self {
        Self {
            layers,
            termination,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Look up a node by identity.
    pub fn node(&self, id: NodeRef) -> Option<&TraceNode> {
        self.layers.get(id.step).and_then(|layer| layer.get(id.state))
    }

    /// Nodes of the final layer whose state is final, in layer order.
    ///
    /// Empty unless the run was exhausted: a stuck run accepts nothing,
    /// whatever it passed through on the way.
    pub fn accepting_nodes<'a>(
        &'a self,
        final_states: &'a StateSet,
    ) -> impl Iterator<Item = &'a TraceNode> + 'a {
        let last = match self.termination {
            Termination::Exhausted => self.layers.last(),
            Termination::Stuck { .. } => None,
        };
        last.into_iter()
            .flat_map(Layer::nodes)
            .filter(|node| final_states.contains(node.state))
    }

    pub fn accepting_states(&self, final_states: &StateSet) -> Vec<StateId> {
        self.accepting_nodes(final_states)
            .map(|node| node.state)
            .collect()
    }

    pub fn is_accepted(&self, final_states: &StateSet) -> bool {
        self.accepting_nodes(final_states).next().is_some()
    }
}
