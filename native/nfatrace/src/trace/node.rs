//! Trace nodes and layers.

use crate::automaton::StateId;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Number of input symbols consumed to reach a layer.
pub type Step = usize;

/// Identity of a trace node. At most one node exists per `(state, step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeRef {
    pub state: StateId,
    pub step: Step,
}

impl NodeRef {
    pub fn new(state: StateId, step: Step) -> Self {
        Self { state, step }
    }
}

/// One reachable configuration and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceNode {
    pub state: StateId,
    pub step: Step,
    /// Nodes of the previous layer that reach this one by consuming a symbol.
    pub input_parents: Vec<NodeRef>,
    /// Nodes of the same layer that reach this one by a single λ transition.
    pub lambda_parents: Vec<NodeRef>,
}

impl TraceNode {
    pub fn new(state: StateId, step: Step) -> Self {
        Self {
            state,
            step,
            input_parents: Vec::new(),
            lambda_parents: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeRef {
        NodeRef::new(self.state, self.step)
    }

    /// Record a λ edge from `parent`. Self loops and repeated edges are
    /// ignored; returns whether an edge was added.
    pub fn add_lambda_parent(&mut self, parent: NodeRef) -> bool {
        if parent == self.id() || self.lambda_parents.contains(&parent) {
            return false;
        }
        self.lambda_parents.push(parent);
        true
    }
}

/// All nodes reached after consuming `step` symbols, keyed by state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub step: Step,
    #[serde(serialize_with = "serialize_nodes")]
    pub nodes: IndexMap<StateId, TraceNode>,
}

fn serialize_nodes<S: Serializer>(
    nodes: &IndexMap<StateId, TraceNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.values())
}

impl Layer {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            nodes: IndexMap::new(),
        }
    }

    /// A layer holding one parentless node per state, in the given order.
    pub fn from_states(step: Step, states: impl IntoIterator<Item = StateId>) -> Self {
        let mut layer = Self::new(step);
        for state in states {
            layer.node_mut(state);
        }
        layer
    }

    /// The node for `state`, created if it does not exist yet.
    pub fn node_mut(&mut self, state: StateId) -> &mut TraceNode {
        let step = self.step;
        self.nodes
            .entry(state)
            .or_insert_with(|| TraceNode::new(state, step))
    }

    pub fn get(&self, state: StateId) -> Option<&TraceNode> {
        self.nodes.get(&state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.nodes.contains_key(&state)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &TraceNode> + '_ {
        self.nodes.values()
    }

    /// States in insertion order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.nodes.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambda_parent_rules() {
        let mut node = TraceNode::new(2, 1);
        assert!(!node.add_lambda_parent(NodeRef::new(2, 1)));
        assert!(node.add_lambda_parent(NodeRef::new(1, 1)));
        assert!(!node.add_lambda_parent(NodeRef::new(1, 1)));
        assert_eq!(node.lambda_parents, vec![NodeRef::new(1, 1)]);
    }

    #[test]
    fn test_layer_dedups_states() {
        let mut layer = Layer::from_states(0, [3, 1, 3]);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.states().collect::<Vec<_>>(), vec![3, 1]);

        layer.node_mut(1).input_parents.push(NodeRef::new(0, 0));
        layer.node_mut(1);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.get(1).map(|n| n.input_parents.len()), Some(1));
        assert_eq!(layer.get(1).map(TraceNode::id), Some(NodeRef::new(1, 0)));
    }
}
