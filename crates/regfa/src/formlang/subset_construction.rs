//! Subset construction algorithm for converting an NFA to a DFA.

use crate::formlang::finite_automaton::FiniteAutomaton;
use crate::formlang::state::{StateId, StateSet};
use indexmap::IndexMap;
use tracing::{debug, trace};

impl FiniteAutomaton {
    /// Determinize this automaton.
    ///
    /// An automaton that is already deterministic comes back as an equal
    /// copy, which makes the operation idempotent.
    pub fn to_dfa(&self) -> FiniteAutomaton {
        if self.is_deterministic() {
            debug!(states = self.num_states(), "automaton already deterministic");
            return self.clone();
        }
        subset_construction(self)
    }
}

/// Convert an NFA to a DFA using the powerset construction algorithm.
///
/// Every DFA state is the epsilon closure of a set of NFA states and is named
/// after it, e.g. `{q0, q1}`. Composite states are keyed by their ascending
/// member list, so discovery order never creates duplicates.
pub fn subset_construction(nfa: &FiniteAutomaton) -> FiniteAutomaton {
    // Maps sets of NFA states to DFA state ids
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut worklist: Vec<StateSet> = Vec::new();
    let mut visited = StateSet::default();

    let initial_set = nfa.epsilon_closure(&StateSet::singleton(
        nfa.start_state(),
        nfa.num_states(),
    ));

    let mut dfa = FiniteAutomaton::with_epsilon_marker(
        &composite_name(nfa, &initial_set, None),
        nfa.epsilon_marker(),
    );
    dfa.alphabet = nfa.alphabet.clone();
    let initial_dfa_state = dfa.start_state();
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);

    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state);
    }

    debug!(
        nfa_states = nfa.num_states(),
        start = %nfa.state_name(nfa.start_state()).unwrap_or_default(),
        "starting subset construction"
    );

    worklist.push(initial_set);

    let symbols: Vec<_> = nfa.working_alphabet().collect();

    while let Some(current_nfa_set) = worklist.pop() {
        let Some(&current_dfa_state) = state_mapping.get(&current_nfa_set.to_vec()) else {
            continue;
        };
        if !visited.insert(current_dfa_state) {
            continue;
        }

        for &symbol in &symbols {
            let moved = nfa.step(&current_nfa_set, symbol);

            if moved.is_empty() {
                // No transition on this symbol; the DFA has no entry either
                continue;
            }

            let next_nfa_set = nfa.epsilon_closure(&moved);
            let next_vec = next_nfa_set.to_vec();

            let next_dfa_state = if let Some(&existing) = state_mapping.get(&next_vec) {
                existing
            } else {
                let name = composite_name(nfa, &next_nfa_set, Some(&dfa));
                let new_state = dfa.add_state(&name);
                state_mapping.insert(next_vec, new_state);

                if next_nfa_set.intersects(nfa.final_states()) {
                    dfa.add_final_state(new_state);
                }

                trace!(state = %name, "discovered composite state");
                worklist.push(next_nfa_set);
                new_state
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    dfa.state_mapping = state_mapping
        .into_iter()
        .map(|(nfa_states, dfa_state)| (dfa_state, nfa_states))
        .collect();

    debug!(
        dfa_states = dfa.num_states(),
        final_states = dfa.final_states().len(),
        "subset construction finished"
    );

    dfa
}

/// Name a composite state after its members.
///
/// NFA state names are unique, so labels of distinct sets only collide when a
/// name itself looks like a set; primes are appended until the name is free.
fn composite_name(nfa: &FiniteAutomaton, set: &StateSet, dfa: Option<&FiniteAutomaton>) -> String {
    let mut name = set.label(|state| nfa.state_name(state).unwrap_or_default());
    if let Some(dfa) = dfa {
        while dfa.state_id(&name).is_some() {
            name.push('\'');
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    /// q0 -a-> {q0, q1}, q1 -b-> q1, q1 -a-> q2, q2 -c-> q3, q3 -c-> q3; final q3.
    fn branching_nfa() -> FiniteAutomaton {
        let mut nfa = FiniteAutomaton::new("q0");
        for name in ["q1", "q2", "q3"] {
            nfa.add_state(name);
        }
        nfa.add_named_transition("q0", "a", "q0");
        nfa.add_named_transition("q0", "a", "q1");
        nfa.add_named_transition("q1", "b", "q1");
        nfa.add_named_transition("q1", "a", "q2");
        nfa.add_named_transition("q2", "c", "q3");
        nfa.add_named_transition("q3", "c", "q3");
        let q3 = nfa.state_id("q3").unwrap();
        nfa.add_final_state(q3);
        nfa
    }

    fn state_names(dfa: &FiniteAutomaton) -> Vec<String> {
        let mut names: Vec<String> = dfa.states().map(|(_, name)| name.to_owned()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_subset_construction_basic() {
        let nfa = branching_nfa();
        assert!(!nfa.is_deterministic());

        let dfa = nfa.to_dfa();

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.state_name(dfa.start_state()), Some("{q0}"));
        assert_eq!(
            state_names(&dfa),
            vec!["{q0, q1, q2}", "{q0, q1}", "{q0}", "{q1}", "{q2}", "{q3}"]
        );

        let finals: Vec<_> = dfa
            .final_states()
            .iter()
            .filter_map(|s| dfa.state_name(s))
            .collect();
        assert_eq!(finals, vec!["{q3}"]);

        assert!(dfa.accepts(&["a", "a", "c"]));
        assert!(dfa.accepts(&["a", "b", "a", "c", "c"]));
        assert!(!dfa.accepts(&["a", "c"]));
        assert!(!dfa.accepts(&["a", "a"]));
    }

    #[test]
    fn test_state_mapping_records_members() {
        let nfa = branching_nfa();
        let dfa = subset_construction(&nfa);

        let id = dfa.state_id("{q0, q1, q2}").unwrap();
        assert_eq!(dfa.state_mapping().get(&id), Some(&vec![0, 1, 2]));
        assert_eq!(dfa.state_mapping().len(), dfa.num_states());
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // s -ε-> t, s -a-> u, t -a-> v (final)
        let mut nfa = FiniteAutomaton::new("s");
        nfa.add_named_transition("s", "eps", "t");
        nfa.add_named_transition("s", "a", "u");
        nfa.add_named_transition("t", "a", "v");
        let v = nfa.state_id("v").unwrap();
        nfa.add_final_state(v);

        let dfa = subset_construction(&nfa);

        assert_eq!(dfa.state_name(dfa.start_state()), Some("{s, t}"));
        assert!(dfa.accepts(&["a"]));
        assert!(!dfa.accepts::<&str>(&[]));
        assert!(!dfa.has_epsilon_transitions());
        assert_eq!(dfa.working_alphabet().count(), 1);
    }

    #[test]
    fn test_start_state_final_when_closure_accepts() {
        let mut nfa = FiniteAutomaton::new("s");
        nfa.add_named_transition("s", "eps", "f");
        nfa.add_named_transition("s", "a", "s");
        nfa.add_named_transition("s", "a", "f");
        let f = nfa.state_id("f").unwrap();
        nfa.add_final_state(f);

        let dfa = nfa.to_dfa();
        assert!(dfa.is_final(dfa.start_state()));
        assert!(dfa.accepts::<&str>(&[]));
        assert!(dfa.accepts(&["a", "a"]));
    }

    #[test]
    fn test_missing_transitions_are_absent() {
        let mut nfa = FiniteAutomaton::new("q0");
        nfa.add_named_transition("q0", "a", "q1");
        nfa.add_named_transition("q0", "a", "q2");
        nfa.add_symbol("b");

        let dfa = nfa.to_dfa();
        let b = dfa.symbol_id("b").unwrap();
        for (state, _) in dfa.states() {
            assert!(dfa.transition(state, b).is_none());
        }
        assert_eq!(dfa.num_states(), 2);
    }

    #[test]
    fn test_determinize_is_idempotent() {
        let dfa = branching_nfa().to_dfa();
        assert_eq!(dfa.to_dfa(), dfa);
    }

    #[test]
    fn test_deterministic_input_is_returned_unchanged() {
        let mut dfa = FiniteAutomaton::new("p");
        dfa.add_named_transition("p", "a", "q");
        dfa.add_named_transition("q", "b", "p");
        let q = dfa.state_id("q").unwrap();
        dfa.add_final_state(q);

        assert_eq!(dfa.to_dfa(), dfa);
    }

    #[test]
    fn test_single_state_nfa() {
        let nfa = FiniteAutomaton::new("q0");
        let dfa = subset_construction(&nfa);

        assert_eq!(dfa.num_states(), 1);
        assert!(dfa.final_states().is_empty());
        assert!(dfa.is_empty());
    }
}
