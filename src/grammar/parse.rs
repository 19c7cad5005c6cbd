use std::collections::HashMap;

use super::{Grammar, GrammarError, NonTerminalRule, Production, Symbol, END_MARK, EPSILON};

fn parse_error(line: usize, message: &str) -> GrammarError {
    GrammarError::Parse {
        line,
        message: message.to_string(),
    }
}

fn is_epsilon_token(token: &str) -> bool {
    token == EPSILON || token == "epsilon"
}

impl Grammar {
    /// Reads `A -> x B | ε` style rules, one per line.
    ///
    /// A line starting with `|` continues the previous rule and a repeated left
    /// side adds alternatives to the existing rule. Tokens naming a declared rule
    /// or starting with an uppercase letter are non-terminals; everything else
    /// must be a single-character terminal.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut ids: Vec<&str> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut raw_productions: Vec<(usize, usize, &str)> = Vec::new();

        let mut previous_left: Option<usize> = None;
        for (i, line) in grammar.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(parse_error(line_no, "too many \"->\""));
            }
            let (left, rights): (usize, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(parse_error(line_no, "empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(parse_error(line_no, "left side contains whitespace"));
                }
                let left = *index.entry(left_str).or_insert_with(|| {
                    ids.push(left_str);
                    ids.len() - 1
                });
                (left, parts[1].trim())
            } else if let Some(rest) = line.strip_prefix('|') {
                match previous_left {
                    Some(idx) => (idx, rest.trim()),
                    None => return Err(parse_error(line_no, "cannot find left side")),
                }
            } else {
                return Err(parse_error(line_no, "missing \"->\""));
            };

            previous_left = Some(left);
            raw_productions.push((line_no, left, rights));
        }

        let mut productions: Vec<Vec<Production>> = vec![Vec::new(); ids.len()];
        for (line_no, left, rights) in raw_productions {
            for right in rights.split('|') {
                let mut symbols = Vec::new();
                for token in right.split_whitespace() {
                    if is_epsilon_token(token) {
                        continue;
                    }
                    symbols.push(parse_symbol(line_no, token, &index)?);
                }
                productions[left].push(Production::new(symbols));
            }
        }

        let rules: Vec<NonTerminalRule> = ids
            .iter()
            .zip(productions)
            .map(|(id, productions)| NonTerminalRule::new(id, productions))
            .collect();
        log::debug!(
            "parsed {} rules, {} productions",
            rules.len(),
            rules.iter().map(|r| r.productions.len()).sum::<usize>()
        );
        Self::new(rules)
    }
}

fn parse_symbol(
    line: usize,
    token: &str,
    index: &HashMap<&str, usize>,
) -> Result<Symbol, GrammarError> {
    if index.contains_key(token) || token.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Ok(Symbol::nt(token));
    }
    if token == END_MARK {
        return Err(GrammarError::Parse {
            line,
            message: format!("\"{}\" is reserved for the end of input", END_MARK),
        });
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Symbol::t(c)),
        _ => Err(GrammarError::Parse {
            line,
            message: format!("terminal \"{}\" must be a single character", token),
        }),
    }
}
