use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, SymbolSet, EPSILON};
use crate::Analysis;

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<String>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .split(' ')
                    .map(|s| escape::tex(s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        (left + &right).replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .rules()
            .map(|rule| ProductionOutput {
                left: rule.id.as_str(),
                rights: rule.productions.iter().map(|p| p.to_string()).collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

fn set_to_vec(set: Option<&SymbolSet>) -> Vec<String> {
    set.map(|s| s.iter().map(|symbol| symbol.to_string()).collect())
        .unwrap_or_default()
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<String>,
    follow: Vec<String>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_sets_plaintext(&self) -> (String, String) {
        fn f(a: &[String]) -> String {
            a.iter().map(|s| format!("{} ", s)).collect()
        }
        (
            format!("FIRST({}) = {{ {}}}", self.name, f(&self.first)),
            format!("FOLLOW({}) = {{ {}}}", self.name, f(&self.follow)),
        )
    }

    fn to_latex(&self) -> String {
        fn f(a: &[String]) -> String {
            a.iter()
                .map(|s| escape::tex(s.as_str()))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// `FIRST(X) = { ... }` lines for every rule, then the `FOLLOW(X)` lines.
    pub fn to_sets_plaintext(&self) -> String {
        let (first, follow): (Vec<String>, Vec<String>) =
            self.data.iter().map(|s| s.to_sets_plaintext()).unzip();
        first
            .into_iter()
            .chain(follow)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_first_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_sets_plaintext().0)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_follow_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_sets_plaintext().1)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    /// Rows in declaration order, whatever order the maps keep internally.
    pub fn to_non_terminal_output_vec<'a>(
        &'a self,
        analysis: &Analysis,
    ) -> NonTerminalOutputVec<'a> {
        let data = self
            .rules()
            .map(|rule| NonTerminalOutput {
                name: rule.id.as_str(),
                nullable: analysis.first.is_nullable(&rule.id),
                first: set_to_vec(analysis.first.get(&rule.id)),
                follow: set_to_vec(analysis.follow.get(&rule.id)),
            })
            .collect();
        NonTerminalOutputVec { data }
    }
}

#[cfg(test)]
mod tests {
    use crate::{analyze, Grammar};

    #[test]
    fn productions_plaintext() {
        let g = Grammar::parse("S -> a S\n | ε\nLong -> b").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "   S -> a S\n      | ε\nLong -> b"
        );
    }

    #[test]
    fn productions_latex_uses_epsilon_macro() {
        let g = Grammar::parse("S -> a | ε").unwrap();
        let latex = g.to_production_output_vec().to_latex();
        assert!(latex.contains("a \\mid \\epsilon"));
    }

    #[test]
    fn nff_table_plaintext() {
        let g = Grammar::expression().unwrap();
        let a = analyze(&g).unwrap();
        let table = g.to_non_terminal_output_vec(&a).to_plaintext();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "E | false | (, i | ), $");
        assert_eq!(lines[1], "X | true | +, ε | ), $");
    }

    #[test]
    fn nff_table_latex() {
        let g = Grammar::expression().unwrap();
        let a = analyze(&g).unwrap();
        let latex = g.to_non_terminal_output_vec(&a).to_latex();
        assert!(latex.starts_with("\\begin{tabular}{c|c|c|c}"));
        assert!(latex.ends_with("\\end{tabular}"));
        assert!(latex.contains("$\\epsilon$"));
    }
}
