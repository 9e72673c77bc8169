//! Serialized views of a [`SimulationReport`]: JSON, Graphviz dot and a
//! plain text summary. None of them compute coordinates.

use crate::automaton::StateSet;
use crate::error::Result;
use crate::simulation::SimulationReport;
use crate::trace::{NodeRef, Termination};
use std::fmt::Write;

pub fn to_json(report: &SimulationReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// `"verdict"` line shared by the text and dot output.
pub fn verdict(report: &SimulationReport) -> String {
    match (report.accepted, report.termination()) {
        (true, _) => "ACCEPTED".to_owned(),
        (false, Termination::Exhausted) => "REJECTED".to_owned(),
        (false, Termination::Stuck { step }) => format!("REJECTED (stuck at step {step})"),
    }
}

fn node_name(id: NodeRef) -> String {
    format!("\"{}@{}\"", id.state, id.step)
}

fn layer_label(report: &SimulationReport, step: usize) -> String {
    match step.checked_sub(1).and_then(|i| report.symbols.get(i)) {
        Some(symbol) => format!("{step}: {symbol}"),
        None => "start".to_owned(),
    }
}

/// Render the provenance graph in the graphviz dot language.
///
/// One cluster per layer; solid edges are input transitions, dashed edges are
/// λ transitions inside a layer.
pub fn to_dot(report: &SimulationReport) -> String {
    let accepting: StateSet = report.accepting_states.iter().copied().collect();
    let last_step = report.trace.layers().len().saturating_sub(1);

    let mut out = String::new();
    out.push_str("digraph trace {\n\trankdir = TB;\n\tnode [shape = circle];\n");
    let _ = writeln!(
        out,
        "\tlabel = \"Input: {} ({})\";",
        escape(&report.input_string),
        verdict(report)
    );

    for layer in report.trace.layers() {
        let _ = writeln!(out, "\n\tsubgraph cluster_{} {{", layer.step);
        let _ = writeln!(
            out,
            "\t\tlabel = \"{}\";",
            escape(&layer_label(report, layer.step))
        );
        for node in layer.nodes() {
            let mut attrs = vec![format!("label = \"{}\"", node.state)];
            if report.is_final(node.state) {
                attrs.push("shape = doublecircle".to_owned());
            }
            if layer.step == last_step && accepting.contains(node.state) {
                attrs.push("style = filled, fillcolor = \"#ccffcc\", color = green".to_owned());
            }
            let _ = writeln!(out, "\t\t{} [{}];", node_name(node.id()), attrs.join(", "));
        }
        out.push_str("\t}\n");
    }

    out.push('\n');
    for layer in report.trace.layers() {
        for node in layer.nodes() {
            for &parent in &node.input_parents {
                let _ = writeln!(out, "\t{} -> {};", node_name(parent), node_name(node.id()));
            }
            for &parent in &node.lambda_parents {
                let _ = writeln!(
                    out,
                    "\t{} -> {} [style = dashed, color = red, label = \"λ\"];",
                    node_name(parent),
                    node_name(node.id())
                );
            }
        }
    }
    out.push_str("}\n");
    out
}

/// One line per layer followed by the verdict.
pub fn to_text(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "input: {}", report.input_string);
    for layer in report.trace.layers() {
        let states: StateSet = layer.states().collect();
        let _ = writeln!(
            out,
            "layer {} ({}): {}",
            layer.step,
            layer_label(report, layer.step),
            states
        );
    }
    out.push_str(&verdict(report));
    if !report.accepting_states.is_empty() {
        let states: StateSet = report.accepting_states.iter().copied().collect();
        let _ = write!(out, ", final states reached: {states}");
    }
    out.push('\n');
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationInput;
    use crate::simulation::simulate;

    #[test]
    fn test_text_summary_of_example() {
        let report = simulate(&SimulationInput::example()).unwrap();
        let text = to_text(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "input: ababba");
        assert_eq!(lines[1], "layer 0 (start): {0}");
        assert_eq!(lines[3], "layer 2 (2: b): {0, 1, 2}");
        assert_eq!(lines[7], "layer 6 (6: a): {0, 2, 3}");
        assert_eq!(lines[8], "ACCEPTED, final states reached: {3}");
    }

    #[test]
    fn test_verdict_when_stuck() {
        let input = SimulationInput {
            alphabet: "a b".into(),
            num_states: "2".into(),
            transitions: "0 a 1".into(),
            start_states: "0".into(),
            final_states: "1".into(),
            input_string: "b".into(),
        };
        let report = simulate(&input).unwrap();
        assert_eq!(verdict(&report), "REJECTED (stuck at step 1)");
    }

    #[test]
    fn test_dot_edges() {
        let report = simulate(&SimulationInput::example().with_input("b")).unwrap();
        let dot = to_dot(&report);
        assert!(dot.starts_with("digraph trace {"));
        assert!(dot.contains("label = \"Input: b (REJECTED)\";"));
        assert!(dot.contains("\t\"0@0\" -> \"1@1\";"));
        assert!(dot.contains("\t\"1@1\" -> \"2@1\" [style = dashed, color = red, label = \"λ\"];"));
        assert!(dot.contains("subgraph cluster_1 {"));
        assert!(dot.contains("label = \"1: b\";"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_marks_accepting_nodes() {
        let report = simulate(&SimulationInput::example()).unwrap();
        let dot = to_dot(&report);
        assert!(dot.contains(
            "\"3@6\" [label = \"3\", shape = doublecircle, style = filled, fillcolor = \"#ccffcc\", color = green];"
        ));
        // final but not in the last layer
        assert!(dot.contains("\"3@4\" [label = \"3\", shape = doublecircle];"));
    }

    #[test]
    fn test_json_export() {
        let report = simulate(&SimulationInput::example().with_input("")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&report, false).unwrap()).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["trace"]["termination"]["kind"], "exhausted");
        assert_eq!(json["trace"]["layers"][0]["nodes"][0]["state"], 0);
        assert_eq!(json["final_states"], serde_json::json!([3]));
    }
}
