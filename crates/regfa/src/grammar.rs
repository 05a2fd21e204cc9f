use std::fmt;

use tracing::debug;

use crate::error::GrammarError;
use crate::formlang::EPSILON;

/// A regular grammar described by symbol names and production strings.
///
/// Productions are written as a left-hand non-terminal followed by the
/// right-hand side, e.g. `"SaA"`, `"S a A"` or `"S -> a A"` for `S → aA`,
/// and `"A eps"` for `A → ε`. Symbols are recognised by longest match against
/// the declared names, so multi-character names work as long as they are not
/// ambiguous. Nothing is validated at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    non_terminals: Vec<String>,
    terminals: Vec<String>,
    productions: Vec<String>,
    start_symbol: String,
    epsilon_marker: String,
}

/// A production split into its symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule<'g> {
    /// `A → a`
    Terminal { lhs: &'g str, terminal: &'g str },
    /// `A → ε`
    Epsilon { lhs: &'g str },
    /// `A → aB`
    Step {
        lhs: &'g str,
        terminal: &'g str,
        rhs: &'g str,
    },
    /// `A → B`, written `A eps B`; only accepted without validation.
    Unit { lhs: &'g str, rhs: &'g str },
}

impl Grammar {
    /// Create a grammar; productions are not checked until asked to.
    pub fn new<N, T, P>(
        non_terminals: N,
        terminals: T,
        productions: P,
        start_symbol: impl Into<String>,
    ) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            non_terminals: non_terminals.into_iter().map(Into::into).collect(),
            terminals: terminals.into_iter().map(Into::into).collect(),
            productions: productions.into_iter().map(Into::into).collect(),
            start_symbol: start_symbol.into(),
            epsilon_marker: EPSILON.to_owned(),
        }
    }

    /// Use `marker` instead of `eps` to write empty right-hand sides.
    pub fn with_epsilon_marker(mut self, marker: impl Into<String>) -> Self {
        self.epsilon_marker = marker.into();
        self
    }

    /// Get the declared non-terminals.
    pub fn non_terminals(&self) -> &[String] {
        &self.non_terminals
    }

    /// Get the declared terminals.
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// Get the production strings.
    pub fn productions(&self) -> &[String] {
        &self.productions
    }

    /// Get the start symbol.
    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// Get the name written for an empty right-hand side.
    pub fn epsilon_marker(&self) -> &str {
        &self.epsilon_marker
    }

    /// Check if a symbol is a declared non-terminal or the start symbol.
    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        symbol == self.start_symbol || self.non_terminals.iter().any(|nt| nt == symbol)
    }

    /// Check if a symbol is a declared terminal.
    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terminals.iter().any(|t| t == symbol)
    }

    /// Check if a symbol is the epsilon marker.
    pub fn is_epsilon(&self, symbol: &str) -> bool {
        symbol == self.epsilon_marker
    }

    /// Position of a non-terminal among the declared non-terminals.
    pub fn non_terminal_index(&self, symbol: &str) -> Option<usize> {
        self.non_terminals.iter().position(|nt| nt == symbol)
    }

    /// Split a production string into symbols.
    ///
    /// Whitespace and a `->` separator are skipped; at each position the
    /// longest declared name wins.
    pub fn symbols<'p>(&self, production: &'p str) -> Result<Vec<&'p str>, GrammarError> {
        let mut symbols = Vec::new();
        let mut rest = production.trim_start();

        while !rest.is_empty() {
            let longest = self
                .known_names()
                .filter(|name| !name.is_empty() && rest.starts_with(*name))
                .map(str::len)
                .max();

            if let Some(len) = longest {
                symbols.push(&rest[..len]);
                rest = &rest[len..];
            } else if let Some(after_arrow) = rest.strip_prefix("->") {
                rest = after_arrow;
            } else {
                let symbol = rest.split_whitespace().next().unwrap_or(rest);
                return Err(GrammarError::UnknownSymbol {
                    production: production.to_owned(),
                    symbol: symbol.to_owned(),
                });
            }

            rest = rest.trim_start();
        }

        Ok(symbols)
    }

    fn known_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.non_terminals
            .iter()
            .chain(&self.terminals)
            .map(String::as_str)
            .chain([self.start_symbol.as_str(), self.epsilon_marker.as_str()])
    }

    /// Split a production into its rule without checking symbol kinds beyond
    /// the epsilon marker.
    pub fn rule<'p>(&self, production: &'p str) -> Result<Rule<'p>, GrammarError> {
        match self.symbols(production)?.as_slice() {
            &[lhs, rhs] if self.is_epsilon(rhs) => Ok(Rule::Epsilon { lhs }),
            &[lhs, terminal] => Ok(Rule::Terminal { lhs, terminal }),
            &[lhs, middle, rhs] if self.is_epsilon(middle) => Ok(Rule::Unit { lhs, rhs }),
            &[lhs, terminal, rhs] => Ok(Rule::Step { lhs, terminal, rhs }),
            symbols => Err(GrammarError::MalformedProduction {
                production: production.to_owned(),
                symbols: symbols.len(),
            }),
        }
    }

    /// Split a production into its rule, requiring the right-linear shape.
    pub fn regular_rule<'p>(&self, production: &'p str) -> Result<Rule<'p>, GrammarError> {
        let rule = self.rule(production)?;
        let not_regular = |reason: String| GrammarError::NotRegular {
            production: production.to_owned(),
            reason,
        };

        let lhs = match rule {
            Rule::Terminal { lhs, .. }
            | Rule::Epsilon { lhs }
            | Rule::Step { lhs, .. }
            | Rule::Unit { lhs, .. } => lhs,
        };
        if !self.is_non_terminal(lhs) {
            return Err(not_regular(format!(
                "left-hand side `{lhs}` is not a non-terminal"
            )));
        }

        match rule {
            Rule::Terminal { terminal, .. } | Rule::Step { terminal, .. }
                if !self.is_terminal(terminal) =>
            {
                Err(not_regular(format!("`{terminal}` is not a terminal")))
            }
            Rule::Step { rhs, .. } if !self.is_non_terminal(rhs) => Err(not_regular(format!(
                "trailing symbol `{rhs}` is not a non-terminal"
            ))),
            Rule::Unit { .. } => Err(not_regular(format!(
                "`{}` cannot stand between two non-terminals",
                self.epsilon_marker
            ))),
            rule => Ok(rule),
        }
    }

    /// Return the first production that breaks the right-linear shape.
    pub fn check_regular(&self) -> Result<(), GrammarError> {
        for production in &self.productions {
            self.regular_rule(production)?;
        }
        Ok(())
    }

    /// Check that every production is `A → a`, `A → ε` or `A → aB`.
    pub fn is_regular(&self) -> bool {
        match self.check_regular() {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "grammar is not regular");
                false
            }
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Non-terminals: [{}]", self.non_terminals.join(", "))?;
        writeln!(f, "Terminals: [{}]", self.terminals.join(", "))?;
        writeln!(f, "Productions:")?;
        for production in &self.productions {
            writeln!(f, "{production}")?;
        }
        write!(f, "Start symbol: {}", self.start_symbol)
    }
}
