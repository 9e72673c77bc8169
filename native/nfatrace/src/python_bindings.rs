//! PyO3 bindings so a Python renderer can draw the trace directly.

use crate::config::SimulationInput;
use crate::error::Error;
use crate::export;
use crate::simulation::{SimulationReport, simulate as run_simulation};
use crate::trace::{NodeRef, Termination, TraceNode};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        match err {
            Error::Internal(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn node_refs(refs: &[NodeRef]) -> Vec<(u32, usize)> {
    refs.iter().map(|r| (r.state, r.step)).collect()
}

/// One configuration of the trace. Parents are `(state, step)` pairs.
#[pyclass(name = "TraceNode", module = "nfatrace", frozen)]
pub struct PyTraceNode {
    node: TraceNode,
}

#[pymethods]
impl PyTraceNode {
    #[getter]
    fn state(&self) -> u32 {
        self.node.state
    }

    #[getter]
    fn step(&self) -> usize {
        self.node.step
    }

    #[getter]
    fn input_parents(&self) -> Vec<(u32, usize)> {
        node_refs(&self.node.input_parents)
    }

    #[getter]
    fn lambda_parents(&self) -> Vec<(u32, usize)> {
        node_refs(&self.node.lambda_parents)
    }

    fn __repr__(&self) -> String {
        format!("TraceNode(state={}, step={})", self.node.state, self.node.step)
    }
}

/// The outcome of one simulation.
#[pyclass(name = "SimulationResult", module = "nfatrace", frozen)]
pub struct PySimulationResult {
    report: SimulationReport,
}

#[pymethods]
impl PySimulationResult {
    #[getter]
    fn accepted(&self) -> bool {
        self.report.accepted
    }

    #[getter]
    fn input_string(&self) -> String {
        self.report.input_string.clone()
    }

    #[getter]
    fn symbols(&self) -> Vec<String> {
        self.report.symbols.clone()
    }

    #[getter]
    fn final_states(&self) -> Vec<u32> {
        self.report.final_states.to_vec()
    }

    #[getter]
    fn accepting_states(&self) -> Vec<u32> {
        self.report.accepting_states.clone()
    }

    /// The step whose layer came out empty, or `None` if the input was consumed.
    #[getter]
    fn stuck_at(&self) -> Option<usize> {
        match self.report.termination() {
            Termination::Exhausted => None,
            Termination::Stuck { step } => Some(step),
        }
    }

    /// Layers in order, each a list of nodes.
    #[getter]
    fn layers(&self) -> Vec<Vec<PyTraceNode>> {
        self.report
            .trace
            .layers()
            .iter()
            .map(|layer| {
                layer
                    .nodes()
                    .map(|node| PyTraceNode { node: node.clone() })
                    .collect()
            })
            .collect()
    }

    /// The node for `state` at `step`, if that configuration was reached.
    /// Parent pairs returned by `TraceNode` can be resolved with this.
    fn node(&self, state: u32, step: usize) -> Option<PyTraceNode> {
        self.report
            .trace
            .node(NodeRef::new(state, step))
            .map(|node| PyTraceNode { node: node.clone() })
    }

    #[pyo3(signature = (pretty = false))]
    fn to_json(&self, pretty: bool) -> PyResult<String> {
        Ok(export::to_json(&self.report, pretty)?)
    }

    fn to_dot(&self) -> String {
        export::to_dot(&self.report)
    }

    fn __str__(&self) -> String {
        export::to_text(&self.report)
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationResult(input={:?}, {})",
            self.report.input_string,
            export::verdict(&self.report)
        )
    }
}

/// Validate the form fields and simulate. Raises `ValueError` on malformed input.
#[pyfunction]
#[pyo3(signature = (alphabet, num_states, transitions, start_states, final_states, input_string))]
fn simulate(
    alphabet: String,
    num_states: String,
    transitions: String,
    start_states: String,
    final_states: String,
    input_string: String,
) -> PyResult<PySimulationResult> {
    let input = SimulationInput {
        alphabet,
        num_states,
        transitions,
        start_states,
        final_states,
        input_string,
    };
    let report = run_simulation(&input)?;
    Ok(PySimulationResult { report })
}

/// Simulate the built-in testing example, optionally on another input.
#[pyfunction]
#[pyo3(signature = (input_string = None))]
fn simulate_example(input_string: Option<String>) -> PyResult<PySimulationResult> {
    let mut input = SimulationInput::example();
    if let Some(input_string) = input_string {
        input = input.with_input(input_string);
    }
    let report = run_simulation(&input)?;
    Ok(PySimulationResult { report })
}

#[pymodule]
fn nfatrace(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTraceNode>()?;
    m.add_class::<PySimulationResult>()?;
    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_example, m)?)?;
    Ok(())
}
