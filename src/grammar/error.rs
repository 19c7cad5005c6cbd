use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("'{0}' is used as a non-terminal but has no rule")]
    UnknownSymbol(String),
    #[error("'{0}' appears twice in the list of rules; use | to separate alternatives")]
    DuplicateNonTerminal(String),
    #[error("'{symbol}' cannot appear in a production of '{rule}'")]
    InvalidProductionSymbol { rule: String, symbol: String },
    #[error("{engine} sets did not converge after {passes} passes")]
    Convergence { engine: &'static str, passes: usize },
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}
