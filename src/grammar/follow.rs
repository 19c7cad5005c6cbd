use std::collections::BTreeMap;

use super::{first_of_string, FirstMap, Grammar, GrammarError, Symbol, SymbolSet};

/// FOLLOW set of every non-terminal, keyed by rule id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowMap {
    sets: BTreeMap<String, SymbolSet>,
}

impl FollowMap {
    fn seeded(grammar: &Grammar) -> Self {
        let mut sets: BTreeMap<String, SymbolSet> = grammar
            .rules()
            .map(|r| (r.id.clone(), SymbolSet::new()))
            .collect();
        if let Some(set) = grammar.start().and_then(|start| sets.get_mut(start)) {
            set.add(Symbol::EndOfInput);
        }
        Self { sets }
    }

    pub fn get(&self, id: &str) -> Option<&SymbolSet> {
        self.sets.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Unions FOLLOW(`from`) into FOLLOW(`to`).
    fn propagate(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        let source = match self.sets.get(from) {
            Some(set) => set.clone(),
            None => return false,
        };
        match self.sets.get_mut(to) {
            Some(set) => set.union_from(&source),
            None => false,
        }
    }

    fn extend(&mut self, id: &str, symbols: &SymbolSet) -> bool {
        match self.sets.get_mut(id) {
            Some(set) => set.union_from(symbols),
            None => false,
        }
    }
}

pub fn compute_follow_sets(grammar: &Grammar, first: &FirstMap) -> Result<FollowMap, GrammarError> {
    compute_follow_sets_observed(grammar, first, |_, _| {})
}

/// Like `compute_follow_sets`, calling `on_pass` with the working map after every pass.
pub fn compute_follow_sets_observed<F>(
    grammar: &Grammar,
    first: &FirstMap,
    on_pass: F,
) -> Result<FollowMap, GrammarError>
where
    F: FnMut(usize, &FollowMap),
{
    let max_passes = grammar.len() * (grammar.terminals().len() + 1) + 2;
    follow_fixed_point(grammar, first, max_passes, on_pass)
}

fn follow_fixed_point<F>(
    grammar: &Grammar,
    first: &FirstMap,
    max_passes: usize,
    mut on_pass: F,
) -> Result<FollowMap, GrammarError>
where
    F: FnMut(usize, &FollowMap),
{
    let mut follow = FollowMap::seeded(grammar);

    let mut passes = 0;
    let mut changed = true;
    while changed {
        if passes == max_passes {
            return Err(GrammarError::Convergence {
                engine: "FOLLOW",
                passes,
            });
        }
        passes += 1;
        changed = false;

        for rule in grammar.rules() {
            for production in &rule.productions {
                let symbols = production.symbols();
                for (k, symbol) in symbols.iter().enumerate() {
                    let b = match symbol.non_terminal() {
                        Some(id) => id,
                        None => continue,
                    };
                    let beta = &symbols[k + 1..];

                    let mut grew = false;
                    if beta.is_empty() {
                        grew |= follow.propagate(&rule.id, b);
                    } else {
                        let first_beta = first_of_string(beta, first);
                        grew |= follow.extend(b, &first_beta.without_epsilon());
                        if first_beta.contains(&Symbol::Epsilon) {
                            grew |= follow.propagate(&rule.id, b);
                        }
                    }

                    if grew {
                        if let Some(set) = follow.get(b) {
                            log::trace!("FOLLOW({}) = {}", b, set);
                        }
                        changed = true;
                    }
                }
            }
        }

        log::debug!("FOLLOW pass {} done, changed: {}", passes, changed);
        on_pass(passes, &follow);
    }

    log::debug!("FOLLOW sets converged after {} passes", passes);
    Ok(follow)
}
