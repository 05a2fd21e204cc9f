//! Translation of a right-linear grammar into an NFA.

use tracing::{debug, trace};

use crate::error::GrammarError;
use crate::formlang::{FiniteAutomaton, StateId, SymbolId};
use crate::grammar::{Grammar, Rule};
use crate::options::{BuildOptions, Completion};

/// Name of the state standing for the start symbol.
pub const INITIAL_STATE: &str = "initial";
/// Name of the accepting state used by [`Completion::AcceptState`].
pub const ACCEPT_STATE: &str = "accept";

impl Grammar {
    /// Build an NFA with the default [`BuildOptions`].
    pub fn to_nfa(&self) -> Result<FiniteAutomaton, GrammarError> {
        self.to_nfa_with(&BuildOptions::default())
    }

    /// Build an NFA recognising this grammar.
    ///
    /// The automaton has an `initial` state for the start symbol and one
    /// `state_<i>` per production index; the non-terminal at position `k` is
    /// represented by `state_<k>`.
    pub fn to_nfa_with(&self, options: &BuildOptions) -> Result<FiniteAutomaton, GrammarError> {
        if options.validate() {
            self.check_regular()?;
        }

        let mut builder = NfaBuilder::new(self, options.completion());
        for production in self.productions() {
            builder.add_production(production)?;
        }
        let nfa = builder.finish();

        debug!(
            productions = self.productions().len(),
            states = nfa.num_states(),
            final_states = nfa.final_states().len(),
            "built NFA from grammar"
        );
        Ok(nfa)
    }
}

struct NfaBuilder<'g> {
    grammar: &'g Grammar,
    completion: Completion,
    nfa: FiniteAutomaton,
}

impl<'g> NfaBuilder<'g> {
    fn new(grammar: &'g Grammar, completion: Completion) -> Self {
        let mut nfa = FiniteAutomaton::with_epsilon_marker(INITIAL_STATE, grammar.epsilon_marker());
        for terminal in grammar.terminals() {
            nfa.add_symbol(terminal);
        }
        for index in 0..grammar.productions().len() {
            nfa.add_state(&state_name(index));
        }

        Self {
            grammar,
            completion,
            nfa,
        }
    }

    fn add_production(&mut self, production: &str) -> Result<(), GrammarError> {
        let rule = self.grammar.rule(production)?;
        trace!(production, ?rule, "adding production");

        match rule {
            Rule::Terminal { lhs, terminal } => {
                let source = self.resolve(production, lhs)?;
                let symbol = self.terminal(production, terminal)?;
                let target = self.completion_target();
                self.nfa.add_transition(source, symbol, target);
            }
            Rule::Epsilon { lhs } => {
                let source = self.resolve(production, lhs)?;
                let target = self.completion_target();
                self.nfa.add_epsilon_transition(source, target);
            }
            Rule::Step { lhs, terminal, rhs } => {
                let source = self.resolve(production, lhs)?;
                let symbol = self.terminal(production, terminal)?;
                let target = self.resolve(production, rhs)?;
                self.nfa.add_transition(source, symbol, target);
            }
            Rule::Unit { lhs, rhs } => {
                let source = self.resolve(production, lhs)?;
                let target = self.resolve(production, rhs)?;
                self.nfa.add_epsilon_transition(source, target);
            }
        }

        Ok(())
    }

    /// The state a non-terminal stands for.
    fn resolve(&mut self, production: &str, symbol: &str) -> Result<StateId, GrammarError> {
        if symbol == self.grammar.start_symbol() {
            return Ok(self.nfa.start_state());
        }
        match self.grammar.non_terminal_index(symbol) {
            // Creates the state when there are fewer productions than non-terminals
            Some(index) => Ok(self.nfa.add_state(&state_name(index))),
            None => Err(unknown(production, symbol)),
        }
    }

    fn terminal(&self, production: &str, symbol: &str) -> Result<SymbolId, GrammarError> {
        if !self.grammar.is_terminal(symbol) {
            return Err(unknown(production, symbol));
        }
        self.nfa
            .symbol_id(symbol)
            .ok_or_else(|| unknown(production, symbol))
    }

    /// Where a completing production leads; the target is marked accepting.
    fn completion_target(&mut self) -> StateId {
        let target = match self.completion {
            Completion::ReturnToStart => self.nfa.start_state(),
            Completion::AcceptState => self.nfa.add_state(ACCEPT_STATE),
        };
        self.nfa.add_final_state(target);
        target
    }

    fn finish(self) -> FiniteAutomaton {
        self.nfa
    }
}

fn state_name(index: usize) -> String {
    format!("state_{index}")
}

fn unknown(production: &str, symbol: &str) -> GrammarError {
    GrammarError::UnknownSymbol {
        production: production.to_owned(),
        symbol: symbol.to_owned(),
    }
}
