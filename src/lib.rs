extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{
    compute_first_sets, compute_follow_sets, first_of_string, FirstMap, FollowMap, Grammar,
    GrammarError, NonTerminalRule, Production, Symbol, SymbolSet,
};

/// Converged FIRST and FOLLOW sets of one grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub first: FirstMap,
    pub follow: FollowMap,
}

/// Runs the FIRST engine, then the FOLLOW engine on its result.
pub fn analyze(grammar: &Grammar) -> Result<Analysis, GrammarError> {
    let first = compute_first_sets(grammar)?;
    let follow = compute_follow_sets(grammar, &first)?;
    Ok(Analysis { first, follow })
}

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    let result = crate::Grammar::parse(grammar).and_then(|g| {
        let analysis = analyze(&g)?;
        let json = g.to_non_terminal_output_vec(&analysis).to_json();
        Ok(json)
    });
    let error = match result {
        Ok(Ok(json)) => return json,
        Ok(Err(e)) => e.to_string(),
        Err(e) => e.to_string(),
    };
    serde_json::json!({ "error": error }).to_string()
}



#[cfg(test)]
mod first_follow_tests {
    use crate::{analyze, compute_first_sets, compute_follow_sets, Grammar, GrammarError, Symbol, SymbolSet};

    fn set(s: &str) -> SymbolSet {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'ε' => Symbol::Epsilon,
                '$' => Symbol::EndOfInput,
                c => Symbol::Terminal(c),
            })
            .collect()
    }

    #[test]
    fn expression_first_sets() {
        let first = compute_first_sets(&Grammar::expression().unwrap()).unwrap();
        assert_eq!(first.get("F"), Some(&set("( i")));
        assert_eq!(first.get("T"), Some(&set("( i")));
        assert_eq!(first.get("Y"), Some(&set("* ε")));
        assert_eq!(first.get("E"), Some(&set("( i")));
        assert_eq!(first.get("X"), Some(&set("+ ε")));
    }

    #[test]
    fn expression_follow_sets() {
        let g = Grammar::expression().unwrap();
        let first = compute_first_sets(&g).unwrap();
        let follow = compute_follow_sets(&g, &first).unwrap();
        assert_eq!(follow.get("E"), Some(&set(") $")));
        assert_eq!(follow.get("X"), Some(&set(") $")));
        assert_eq!(follow.get("T"), Some(&set("+ ) $")));
        assert_eq!(follow.get("Y"), Some(&set("+ ) $")));
        assert_eq!(follow.get("F"), Some(&set("* + ) $")));
    }

    #[test]
    fn deterministic() {
        let g = Grammar::expression().unwrap();
        assert_eq!(analyze(&g).unwrap(), analyze(&g).unwrap());
    }

    #[test]
    fn left_recursion_terminates() {
        let g = Grammar::parse("A -> A a | b").unwrap();
        let a = analyze(&g).unwrap();
        assert_eq!(a.first.get("A"), Some(&set("b")));
        assert_eq!(a.follow.get("A"), Some(&set("a $")));
    }

    #[test]
    fn mutual_follow_dependency_terminates() {
        let g = Grammar::parse("A -> a B\nB -> b A").unwrap();
        let a = analyze(&g).unwrap();
        assert_eq!(a.first.get("A"), Some(&set("a")));
        assert_eq!(a.first.get("B"), Some(&set("b")));
        assert_eq!(a.follow.get("A"), Some(&set("$")));
        assert_eq!(a.follow.get("B"), Some(&set("$")));
    }

    #[test]
    fn mutual_follow_cycle_with_nullable_tails() {
        // FOLLOW(A) and FOLLOW(B) feed each other and both see c
        let g = Grammar::parse("S -> A c\nA -> a B | ε\nB -> b A | ε").unwrap();
        let a = analyze(&g).unwrap();
        assert_eq!(a.follow.get("A"), Some(&set("c")));
        assert_eq!(a.follow.get("B"), Some(&set("c")));
        assert_eq!(a.follow.get("S"), Some(&set("$")));
    }

    #[test]
    fn nullable_closure() {
        let g = Grammar::parse("S -> A B\nA -> ε | a\nB -> A A").unwrap();
        let a = analyze(&g).unwrap();
        for id in ["S", "A", "B"] {
            assert!(a.first.is_nullable(id), "{} should be nullable", id);
        }
        assert_eq!(a.first.get("S"), Some(&set("a ε")));
        assert_eq!(a.follow.get("A"), Some(&set("a $")));
    }

    #[test]
    fn start_symbol_always_has_end_mark() {
        for text in ["S -> a", "S -> S a | ε", "S -> ( S ) S | ε"] {
            let g = Grammar::parse(text).unwrap();
            let a = analyze(&g).unwrap();
            assert!(a.follow.get("S").unwrap().contains(&Symbol::EndOfInput));
        }
    }

    #[test]
    fn empty_grammar() {
        let a = analyze(&Grammar::parse("").unwrap()).unwrap();
        assert!(a.first.is_empty());
        assert!(a.follow.is_empty());
    }

    #[test]
    fn invalid_grammar_produces_no_maps() {
        let result = Grammar::parse("E -> T + E\nT -> i").and_then(|g| analyze(&g));
        assert!(result.is_ok());
        let result = Grammar::parse("E -> T + Z\nT -> i").and_then(|g| analyze(&g));
        assert_eq!(result, Err(GrammarError::UnknownSymbol("Z".to_string())));
    }
}

#[cfg(test)]
mod report_tests {
    use crate::{analyze, first_follow_to_json, Grammar};

    #[test]
    fn sets_plaintext() {
        let g = Grammar::expression().unwrap();
        let a = analyze(&g).unwrap();
        let out = g.to_non_terminal_output_vec(&a).to_sets_plaintext();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "FIRST(E) = { ( i }");
        assert_eq!(lines[3], "FIRST(Y) = { * ε }");
        assert_eq!(lines[5], "FOLLOW(E) = { ) $ }");
        assert_eq!(lines[9], "FOLLOW(F) = { ) * + $ }");
    }

    #[test]
    fn json_output() {
        let json = first_follow_to_json("S -> a S | ε");
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = &v["data"][0];
        assert_eq!(row["name"], "S");
        assert_eq!(row["nullable"], true);
        assert_eq!(row["first"], serde_json::json!(["a", "ε"]));
        assert_eq!(row["follow"], serde_json::json!(["$"]));
    }

    #[test]
    fn json_error() {
        let json = first_follow_to_json("S -> a B");
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(v["error"].as_str().unwrap().contains("'B'"));
    }
}
