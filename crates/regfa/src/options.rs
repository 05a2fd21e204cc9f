//! Options for turning a grammar into an automaton.

/// Where a production that ends a derivation (`A -> a`, `A -> eps`) leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// Completions return to the initial state, which becomes accepting once
    /// the first completion targets it.
    #[default]
    ReturnToStart,
    /// Completions lead to a dedicated `accept` state, the only accepting
    /// state. The automaton then recognizes exactly the grammar's language.
    AcceptState,
}

/// Options for [`Grammar::to_nfa_with`](crate::Grammar::to_nfa_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    completion: Completion,
    validate: bool,
}

impl BuildOptions {
    /// Default options: return to start, validate first.
    pub fn new() -> Self {
        Self {
            completion: Completion::default(),
            validate: true,
        }
    }

    /// Choose where completing productions lead.
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    /// Check the whole grammar for right-linearity before building.
    ///
    /// Without validation, productions are trusted as long as they can be
    /// resolved, which additionally admits unit productions written `A eps B`.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Get the completion mode.
    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Check if the grammar is validated before building.
    pub fn validate(&self) -> bool {
        self.validate
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}
