//! Graphviz DOT export.

use crate::formlang::finite_automaton::FiniteAutomaton;
use std::fmt;

/// Graphviz rendering of an automaton, produced by [`FiniteAutomaton::dot`].
///
/// Nodes are `s<id>` labelled with the state name; final states are drawn as
/// double circles and an invisible `entry` node points at the start state.
pub struct Dot<'a>(&'a FiniteAutomaton);

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let automaton = self.0;
        writeln!(f, "digraph automaton {{")?;
        writeln!(f, "    rankdir=LR;")?;
        writeln!(f, "    entry [label = \"\" shape = plaintext];")?;

        for (state, name) in automaton.states() {
            let shape = if automaton.is_final(state) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(
                f,
                "    s{state} [label = \"{}\" shape = {shape}];",
                escape(name)
            )?;
        }

        writeln!(
            f,
            "    entry -> s{} [label = \"start\"];",
            automaton.start_state()
        )?;

        let (_, edges) = automaton.to_graph();
        for (src, dst, label) in edges {
            writeln!(f, "    s{src} -> s{dst} [label = \"{}\"];", escape(&label))?;
        }

        writeln!(f, "}}")
    }
}

impl FiniteAutomaton {
    /// Display this automaton as a Graphviz digraph.
    pub fn dot(&self) -> Dot<'_> {
        Dot(self)
    }

    /// Render this automaton as a Graphviz digraph.
    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
