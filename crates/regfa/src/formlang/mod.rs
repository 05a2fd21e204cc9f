//! Finite automata over named states and symbols.
//!
//! This module provides a single automaton type used for both NFAs and DFAs:
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - Word acceptance and language emptiness checks
//! - Graph and Graphviz DOT export

mod dot;
mod epsilon_closure;
mod finite_automaton;
mod state;
mod subset_construction;
mod symbol;

pub use dot::Dot;
pub use finite_automaton::{FiniteAutomaton, GraphEdge};
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EPSILON, Interner, SymbolId};
