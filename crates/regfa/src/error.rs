use std::error;
use std::fmt::{self, Display};

/// Why a grammar could not be checked or turned into an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The production does not consist of two or three symbols.
    MalformedProduction { production: String, symbols: usize },
    /// The production names a symbol the grammar does not declare.
    UnknownSymbol { production: String, symbol: String },
    /// The production is not of the form `A -> a`, `A -> eps` or `A -> aB`.
    NotRegular { production: String, reason: String },
}

impl GrammarError {
    /// The production the error was raised for.
    pub fn production(&self) -> &str {
        match self {
            GrammarError::MalformedProduction { production, .. }
            | GrammarError::UnknownSymbol { production, .. }
            | GrammarError::NotRegular { production, .. } => production,
        }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::MalformedProduction {
                production,
                symbols,
            } => write!(
                f,
                "malformed production `{production}`: expected 2 or 3 symbols, found {symbols}"
            ),
            GrammarError::UnknownSymbol { production, symbol } => {
                write!(f, "unknown symbol `{symbol}` in production `{production}`")
            }
            GrammarError::NotRegular { production, reason } => {
                write!(f, "production `{production}` is not right-linear: {reason}")
            }
        }
    }
}

impl error::Error for GrammarError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GrammarError::MalformedProduction {
            production: "SaAb".to_owned(),
            symbols: 4,
        };
        assert_eq!(
            err.to_string(),
            "malformed production `SaAb`: expected 2 or 3 symbols, found 4"
        );
        assert_eq!(err.production(), "SaAb");

        let err = GrammarError::UnknownSymbol {
            production: "Sx".to_owned(),
            symbol: "x".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown symbol `x` in production `Sx`");
    }
}
