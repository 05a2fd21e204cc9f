//! Finite automaton shared by NFAs and the DFAs derived from them.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::{EPSILON, Interner, SymbolId};
use std::collections::{HashMap, VecDeque};

/// A labeled edge in the graph representation: (source, destination, label).
pub type GraphEdge = (StateId, StateId, String);

/// A finite automaton over named states and named symbols.
///
/// The same type describes both NFAs and DFAs: a transition maps a
/// (state, symbol) pair to a set of successors, and an automaton is
/// deterministic when every such set has at most one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiniteAutomaton {
    /// State names; a state's id is its index
    pub(crate) states: Interner,
    /// Symbol names; a symbol's id is its index
    pub(crate) alphabet: Interner,
    /// Symbol name treated as the silent move
    pub(crate) epsilon_marker: String,
    /// (source, symbol) -> set of destination states
    pub(crate) transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// source -> states reachable by one silent move
    pub(crate) epsilon_transitions: HashMap<StateId, StateSet>,
    pub(crate) start_state: StateId,
    pub(crate) final_states: StateSet,
    /// DFA state -> NFA states it stands for (empty unless built by subset construction)
    pub(crate) state_mapping: HashMap<StateId, Vec<StateId>>,
}

impl FiniteAutomaton {
    /// Create an automaton holding only its start state.
    pub fn new(start_state: &str) -> Self {
        Self::with_epsilon_marker(start_state, EPSILON)
    }

    /// Create an automaton whose silent-move symbol is `epsilon_marker`.
    pub fn with_epsilon_marker(start_state: &str, epsilon_marker: &str) -> Self {
        let mut states = Interner::new();
        let start_state = states.intern(start_state);
        Self {
            states,
            alphabet: Interner::new(),
            epsilon_marker: epsilon_marker.to_owned(),
            transitions: HashMap::new(),
            epsilon_transitions: HashMap::new(),
            start_state,
            final_states: StateSet::with_capacity(16),
            state_mapping: HashMap::new(),
        }
    }

    /// Add a state (or look up an existing one) and return its id.
    pub fn add_state(&mut self, name: &str) -> StateId {
        self.states.intern(name)
    }

    /// Add a symbol to the alphabet (or look up an existing one) and return its id.
    pub fn add_symbol(&mut self, name: &str) -> SymbolId {
        self.alphabet.intern(name)
    }

    /// Ensure a state exists, adding placeholder states `s<id>` if needed.
    fn ensure_state(&mut self, state: StateId) {
        self.states.ensure(state, "s");
    }

    /// Ensure a symbol exists, adding placeholder symbols `#<id>` if needed.
    fn ensure_symbol(&mut self, symbol: SymbolId) {
        self.alphabet.ensure(symbol, "#");
    }

    /// Add a transition from source to destination on the given symbol.
    ///
    /// Ids not obtained from this automaton are given placeholder names, so
    /// every endpoint and symbol stays a member of `states` and the alphabet.
    /// A transition on the epsilon marker is recorded as an epsilon transition.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);
        self.ensure_symbol(symbol);

        if self.is_epsilon(symbol) {
            self.add_epsilon_transition(source, destination);
            return;
        }

        let capacity = self.states.len();
        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
    }

    /// Add a transition by name, creating states and symbols as needed.
    pub fn add_named_transition(&mut self, source: &str, symbol: &str, destination: &str) {
        let source = self.add_state(source);
        let destination = self.add_state(destination);
        let symbol = self.add_symbol(symbol);
        self.add_transition(source, symbol, destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);

        let capacity = self.states.len();
        self.epsilon_transitions
            .entry(source)
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Iterate over `(id, name)` for every state.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &str)> + '_ {
        self.states.iter()
    }

    /// Get the name of a state.
    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.states.name(state)
    }

    /// Look up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.id(name)
    }

    /// Iterate over `(id, name)` for every symbol, the epsilon marker included.
    pub fn alphabet(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.alphabet.iter()
    }

    /// Look up a symbol by name.
    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.alphabet.id(name)
    }

    /// Get the name of a symbol.
    pub fn symbol_name(&self, symbol: SymbolId) -> Option<&str> {
        self.alphabet.name(symbol)
    }

    /// Get the symbol name treated as the silent move.
    pub fn epsilon_marker(&self) -> &str {
        &self.epsilon_marker
    }

    /// Check if `symbol` is the epsilon marker.
    pub fn is_epsilon(&self, symbol: SymbolId) -> bool {
        self.alphabet.name(symbol) == Some(self.epsilon_marker.as_str())
    }

    /// The symbols determinization runs over: the alphabet minus the epsilon marker.
    pub fn working_alphabet(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.alphabet
            .iter()
            .filter(|(_, name)| *name != self.epsilon_marker)
            .map(|(id, _)| id)
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check if a state is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Successors of `source` on `symbol`, if any.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// States one silent move away from `source`, if any.
    pub fn epsilon_successors(&self, source: StateId) -> Option<&StateSet> {
        self.epsilon_transitions.get(&source)
    }

    /// Check if any epsilon transition exists.
    pub fn has_epsilon_transitions(&self) -> bool {
        !self.epsilon_transitions.is_empty()
    }

    /// NFA states a subset-construction state stands for.
    pub fn state_mapping(&self) -> &HashMap<StateId, Vec<StateId>> {
        &self.state_mapping
    }

    /// Get all symbol transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Get all epsilon transitions as an iterator.
    pub fn epsilon_transitions(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.epsilon_transitions
            .iter()
            .flat_map(|(&src, dests)| dests.iter().map(move |dst| (src, dst)))
    }

    /// Check that no (state, symbol) pair has more than one successor.
    ///
    /// Only symbol transitions are considered; the epsilon map is not.
    pub fn is_deterministic(&self) -> bool {
        (0..self.states.len() as StateId).all(|state| {
            self.alphabet.iter().all(|(symbol, _)| {
                self.transition(state, symbol)
                    .is_none_or(|targets| targets.len() <= 1)
            })
        })
    }

    /// Run the automaton over a word given as symbol names.
    ///
    /// A symbol outside the alphabet rejects the word. The epsilon marker
    /// consumes nothing.
    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut current = self.epsilon_closure(&StateSet::singleton(
            self.start_state,
            self.states.len(),
        ));

        for symbol in word {
            let Some(symbol) = self.symbol_id(symbol.as_ref()) else {
                return false;
            };
            if self.is_epsilon(symbol) {
                continue;
            }
            current = self.epsilon_closure(&self.step(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(&self.final_states)
    }

    /// Check if the automaton accepts no string at all.
    /// Uses BFS from the start state following all transitions.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self
            .epsilon_closure(&StateSet::singleton(self.start_state, self.states.len()))
            .iter()
            .collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for symbol in self.working_alphabet() {
                if let Some(destinations) = self.transition(state, symbol) {
                    let closure = self.epsilon_closure(destinations);
                    queue.extend(closure.iter().filter(|dest| !visited.contains(*dest)));
                }
            }
        }

        true
    }

    /// Convert to a graph representation (edges with labels).
    /// Returns: (nodes, edges) where edges are (src, dst, label), sorted.
    /// Epsilon edges carry the epsilon marker as label.
    pub fn to_graph(&self) -> (Vec<StateId>, Vec<GraphEdge>) {
        let nodes: Vec<StateId> = (0..self.states.len() as StateId).collect();
        let mut edges: Vec<GraphEdge> = self
            .transitions()
            .map(|(src, sym, dst)| {
                let label = self.symbol_name(sym).unwrap_or_default().to_owned();
                (src, dst, label)
            })
            .chain(
                self.epsilon_transitions()
                    .map(|(src, dst)| (src, dst, self.epsilon_marker.clone())),
            )
            .collect();
        edges.sort();

        (nodes, edges)
    }
}
