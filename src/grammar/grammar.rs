use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::{GrammarError, Symbol, EPSILON};

/// One alternative of a rule. An empty body is an `ε` production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn epsilon() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<Vec<Symbol>> for Production {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminalRule {
    pub id: String,
    pub productions: Vec<Production>,
}

impl NonTerminalRule {
    pub fn new(id: &str, productions: Vec<Production>) -> Self {
        Self {
            id: id.to_string(),
            productions,
        }
    }
}

/// Maps rule ids to positions, checking every production against the declared rules.
fn rule_table(rules: &[NonTerminalRule]) -> Result<HashMap<String, usize>, GrammarError> {
    let mut table = HashMap::new();
    for (i, rule) in rules.iter().enumerate() {
        if table.insert(rule.id.clone(), i).is_some() {
            return Err(GrammarError::DuplicateNonTerminal(rule.id.clone()));
        }
    }

    for rule in rules {
        for symbol in rule.productions.iter().flat_map(|p| p.symbols()) {
            if !symbol.is_grammar_symbol() {
                return Err(GrammarError::InvalidProductionSymbol {
                    rule: rule.id.clone(),
                    symbol: symbol.to_string(),
                });
            }
            if let Some(id) = symbol.non_terminal() {
                if !table.contains_key(id) {
                    return Err(GrammarError::UnknownSymbol(id.to_string()));
                }
            }
        }
    }
    Ok(table)
}

/// A validated, read-only context-free grammar. The first rule is the start symbol.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<NonTerminalRule>,
    rule_table: HashMap<String, usize>,
}

impl Grammar {
    pub fn new(rules: Vec<NonTerminalRule>) -> Result<Self, GrammarError> {
        let rule_table = rule_table(&rules)?;
        log::debug!("grammar validated: {} rules", rules.len());
        Ok(Self { rules, rule_table })
    }

    /// The arithmetic expression grammar used as a worked example.
    pub fn expression() -> Result<Self, GrammarError> {
        let t = Symbol::t;
        let nt = Symbol::nt;
        let rules = vec![
            NonTerminalRule::new("E", vec![vec![nt("T"), nt("X")].into()]),
            NonTerminalRule::new(
                "X",
                vec![vec![t('+'), nt("T"), nt("X")].into(), Production::epsilon()],
            ),
            NonTerminalRule::new("T", vec![vec![nt("F"), nt("Y")].into()]),
            NonTerminalRule::new(
                "Y",
                vec![vec![t('*'), nt("F"), nt("Y")].into(), Production::epsilon()],
            ),
            NonTerminalRule::new(
                "F",
                vec![vec![t('('), nt("E"), t(')')].into(), vec![t('i')].into()],
            ),
        ];
        Self::new(rules)
    }

    pub fn rules(&self) -> impl Iterator<Item = &NonTerminalRule> {
        self.rules.iter()
    }

    pub fn rule(&self, id: &str) -> Result<&NonTerminalRule, GrammarError> {
        self.rule_table
            .get(id)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| GrammarError::UnknownSymbol(id.to_string()))
    }

    pub fn start(&self) -> Option<&str> {
        self.rules.first().map(|r| r.id.as_str())
    }

    pub fn terminals(&self) -> BTreeSet<char> {
        self.rules
            .iter()
            .flat_map(|r| r.productions.iter())
            .flat_map(|p| p.symbols())
            .filter_map(|s| match s {
                Symbol::Terminal(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return f.write_str(EPSILON);
        }
        let parts: Vec<String> = self.symbols.iter().map(|s| s.to_string()).collect();
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            let rights: Vec<String> = rule.productions.iter().map(|p| p.to_string()).collect();
            writeln!(f, "{} -> {}", rule.id, rights.join(" | "))?;
        }
        Ok(())
    }
}
