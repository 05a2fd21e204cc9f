//! Right-linear grammars to finite automata.
//!
//! A [`Grammar`] is translated into an NFA with [`Grammar::to_nfa`], and any
//! [`FiniteAutomaton`] can be determinized with
//! [`FiniteAutomaton::to_dfa`], which runs epsilon closure and subset
//! construction.
//!
//! ```
//! use regfa::Grammar;
//!
//! let grammar = Grammar::new(["S", "A"], ["a", "b"], ["SaA", "AbA", "Aa", "Sb"], "S");
//! assert!(grammar.is_regular());
//!
//! let dfa = grammar.to_nfa()?.to_dfa();
//! assert!(dfa.accepts(&["a", "b", "a"]));
//! assert!(!dfa.accepts(&["a", "c"]));
//! # Ok::<(), regfa::GrammarError>(())
//! ```

mod builder;
mod error;
pub mod formlang;
mod grammar;
mod options;

pub use builder::{ACCEPT_STATE, INITIAL_STATE};
pub use error::GrammarError;
pub use formlang::{FiniteAutomaton, StateId, StateSet, SymbolId, subset_construction};
pub use grammar::{Grammar, Rule};
pub use options::{BuildOptions, Completion};
