use std::collections::BTreeSet;
use std::fmt;

use super::Symbol;

/// Terminals plus the `ε` and `$` markers. Never holds a non-terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    symbols: BTreeSet<Symbol>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `symbol`, returning whether the set changed.
    ///
    /// Panics on a non-terminal: that is a modeling bug, not bad input.
    pub fn add(&mut self, symbol: Symbol) -> bool {
        assert!(
            symbol.non_terminal().is_none(),
            "non-terminal {} added to a symbol set",
            symbol
        );
        self.symbols.insert(symbol)
    }

    /// Adds every element of `other`, returning whether anything changed.
    pub fn union_from(&mut self, other: &SymbolSet) -> bool {
        let before = self.symbols.len();
        self.symbols.extend(other.symbols.iter().cloned());
        self.symbols.len() != before
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn without_epsilon(&self) -> SymbolSet {
        SymbolSet {
            symbols: self
                .symbols
                .iter()
                .filter(|s| **s != Symbol::Epsilon)
                .cloned()
                .collect(),
        }
    }

    pub fn is_subset(&self, other: &SymbolSet) -> bool {
        self.symbols.is_subset(&other.symbols)
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for s in iter {
            set.add(s);
        }
        set
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for s in &self.symbols {
            write!(f, "{} ", s)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_change_once() {
        let mut set = SymbolSet::new();
        assert!(set.is_empty());
        assert!(set.add(Symbol::t('a')));
        assert!(!set.add(Symbol::t('a')));
        assert!(set.add(Symbol::Epsilon));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Symbol::t('a')));
        assert!(!set.contains(&Symbol::EndOfInput));
    }

    #[test]
    fn union_reports_change() {
        let mut a: SymbolSet = vec![Symbol::t('a')].into_iter().collect();
        let b: SymbolSet = vec![Symbol::t('a'), Symbol::EndOfInput].into_iter().collect();
        assert!(a.union_from(&b));
        assert!(!a.union_from(&b));
        assert!(b.is_subset(&a));
    }

    #[test]
    fn without_epsilon_and_display() {
        let set: SymbolSet = vec![Symbol::Epsilon, Symbol::t('+'), Symbol::t('*')]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "{ * + ε }");
        assert_eq!(set.without_epsilon().to_string(), "{ * + }");
        assert_eq!(SymbolSet::new().to_string(), "{ }");
    }

    #[test]
    #[should_panic]
    fn rejects_non_terminal() {
        SymbolSet::new().add(Symbol::nt("A"));
    }
}
