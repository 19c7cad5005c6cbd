use std::collections::BTreeMap;

use super::{Grammar, GrammarError, Symbol, SymbolSet};

/// FIRST set of every non-terminal, keyed by rule id.
///
/// Only `compute_first_sets` hands these out, so a `FirstMap` seen by a caller
/// has always reached its fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstMap {
    sets: BTreeMap<String, SymbolSet>,
}

impl FirstMap {
    fn empty(grammar: &Grammar) -> Self {
        Self {
            sets: grammar
                .rules()
                .map(|r| (r.id.clone(), SymbolSet::new()))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&SymbolSet> {
        self.sets.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether `id` can derive the empty string.
    pub fn is_nullable(&self, id: &str) -> bool {
        self.get(id).map_or(false, |s| s.contains(&Symbol::Epsilon))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// FIRST of a symbol string, scanning left to right while symbols are nullable.
///
/// Yields `ε` when every symbol can vanish, including for the empty string.
/// Non-terminals missing from `first` count as empty sets.
pub fn first_of_string(symbols: &[Symbol], first: &FirstMap) -> SymbolSet {
    let mut result = SymbolSet::new();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(_) => {
                result.add(symbol.clone());
                return result;
            }
            Symbol::NonTerminal(id) => {
                let nullable = match first.get(id) {
                    Some(set) => {
                        result.union_from(&set.without_epsilon());
                        set.contains(&Symbol::Epsilon)
                    }
                    None => false,
                };
                if !nullable {
                    return result;
                }
            }
            Symbol::Epsilon => {}
            Symbol::EndOfInput => {
                result.add(Symbol::EndOfInput);
                return result;
            }
        }
    }
    result.add(Symbol::Epsilon);
    result
}

pub fn compute_first_sets(grammar: &Grammar) -> Result<FirstMap, GrammarError> {
    compute_first_sets_observed(grammar, |_, _| {})
}

/// Like `compute_first_sets`, calling `on_pass` with the working map after every pass.
pub fn compute_first_sets_observed<F>(
    grammar: &Grammar,
    on_pass: F,
) -> Result<FirstMap, GrammarError>
where
    F: FnMut(usize, &FirstMap),
{
    // Every pass but the last adds at least one symbol.
    let max_passes = grammar.len() * (grammar.terminals().len() + 1) + 2;
    first_fixed_point(grammar, max_passes, on_pass)
}

fn first_fixed_point<F>(
    grammar: &Grammar,
    max_passes: usize,
    mut on_pass: F,
) -> Result<FirstMap, GrammarError>
where
    F: FnMut(usize, &FirstMap),
{
    let mut first = FirstMap::empty(grammar);

    let mut passes = 0;
    let mut changed = true;
    while changed {
        if passes == max_passes {
            return Err(GrammarError::Convergence {
                engine: "FIRST",
                passes,
            });
        }
        passes += 1;
        changed = false;

        for rule in grammar.rules() {
            let mut contribution = SymbolSet::new();
            for production in &rule.productions {
                contribution.union_from(&first_of_string(production.symbols(), &first));
            }
            if let Some(set) = first.sets.get_mut(&rule.id) {
                if set.union_from(&contribution) {
                    log::trace!("FIRST({}) = {}", rule.id, set);
                    changed = true;
                }
            }
        }

        log::debug!("FIRST pass {} done, changed: {}", passes, changed);
        on_pass(passes, &first);
    }

    log::debug!("FIRST sets converged after {} passes", passes);
    Ok(first)
}
