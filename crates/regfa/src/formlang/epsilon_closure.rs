//! Epsilon closure and symbol moves over state sets.

use crate::formlang::finite_automaton::FiniteAutomaton;
use crate::formlang::state::StateSet;
use crate::formlang::symbol::SymbolId;

impl FiniteAutomaton {
    /// Get the epsilon closure of a set of states.
    ///
    /// The result always contains `states` and is closed under epsilon moves.
    /// Each state enters the worklist at most once.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut worklist: Vec<_> = states.iter().collect();

        while let Some(state) = worklist.pop() {
            let Some(destinations) = self.epsilon_successors(state) else {
                continue;
            };
            for dest in destinations.iter() {
                if closure.insert(dest) {
                    worklist.push(dest);
                }
            }
        }

        closure
    }

    /// Get the states reachable from a set of states on a given symbol,
    /// without following epsilon moves afterwards.
    pub fn step(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states());

        for state in states.iter() {
            if let Some(destinations) = self.transition(state, symbol) {
                reached.union_with(destinations);
            }
        }

        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> FiniteAutomaton {
        // q0 -ε-> q1 -ε-> q2, q3 -ε-> q3, q1 -a-> q3
        let mut nfa = FiniteAutomaton::new("q0");
        let q1 = nfa.add_state("q1");
        let q2 = nfa.add_state("q2");
        let q3 = nfa.add_state("q3");
        nfa.add_epsilon_transition(0, q1);
        nfa.add_epsilon_transition(q1, q2);
        nfa.add_epsilon_transition(q3, q3);
        nfa.add_named_transition("q1", "a", "q3");
        nfa
    }

    #[test]
    fn test_epsilon_closure() {
        let nfa = chain();

        let closure = nfa.epsilon_closure(&StateSet::singleton(0, 4));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);

        let closure = nfa.epsilon_closure(&StateSet::singleton(3, 4));
        assert_eq!(closure.to_vec(), vec![3]);
    }

    #[test]
    fn test_epsilon_closure_is_extensive_and_idempotent() {
        let nfa = chain();

        for seed in [vec![], vec![0], vec![2, 3], vec![1, 3], vec![0, 1, 2, 3]] {
            let seed: StateSet = seed.into_iter().collect();
            let once = nfa.epsilon_closure(&seed);
            assert!(seed.is_subset(&once));
            assert_eq!(nfa.epsilon_closure(&once), once);
        }
    }

    #[test]
    fn test_epsilon_closure_is_monotone() {
        let nfa = chain();
        let seeds: Vec<StateSet> = [vec![], vec![0], vec![2], vec![0, 2], vec![1, 3], vec![0, 1, 2, 3]]
            .into_iter()
            .map(|seed| seed.into_iter().collect())
            .collect();

        for smaller in &seeds {
            for larger in seeds.iter().filter(|larger| smaller.is_subset(larger)) {
                assert!(
                    nfa.epsilon_closure(smaller)
                        .is_subset(&nfa.epsilon_closure(larger)),
                    "{smaller:?} within {larger:?}"
                );
            }
        }
    }

    #[test]
    fn test_closure_identity_ignores_discovery_order() {
        let nfa = chain();

        let forward = nfa.epsilon_closure(&[0, 1].into_iter().collect());
        let backward = nfa.epsilon_closure(&[2, 1, 0].into_iter().collect());
        assert_eq!(forward, backward);
        assert_eq!(forward.to_vec(), backward.to_vec());
    }

    #[test]
    fn test_step() {
        let nfa = chain();
        let a = nfa.symbol_id("a").unwrap();

        let from_q0 = nfa.step(&StateSet::singleton(0, 4), a);
        assert!(from_q0.is_empty());

        let closure = nfa.epsilon_closure(&StateSet::singleton(0, 4));
        assert_eq!(nfa.step(&closure, a).to_vec(), vec![3]);
    }
}
