use std::fmt;

use super::{END_MARK, EPSILON};

/// A grammar symbol, or one of the two markers that only show up in sets.
///
/// The derived order puts terminals first, then non-terminals, then `ε`,
/// then `$`, which is the order sets are enumerated in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(String),
    Epsilon,
    EndOfInput,
}

impl Symbol {
    pub fn t(c: char) -> Self {
        Symbol::Terminal(c)
    }

    pub fn nt(id: &str) -> Self {
        Symbol::NonTerminal(id.to_string())
    }

    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Whether the symbol may appear inside a production body.
    pub fn is_grammar_symbol(&self) -> bool {
        matches!(self, Symbol::Terminal(_) | Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::NonTerminal(id) => f.write_str(id),
            Symbol::Epsilon => f.write_str(EPSILON),
            Symbol::EndOfInput => f.write_str(END_MARK),
        }
    }
}
