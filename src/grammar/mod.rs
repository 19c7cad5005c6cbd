pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub mod symbol;
pub mod symbol_set;

pub use error::GrammarError;
pub use first::{compute_first_sets, compute_first_sets_observed, first_of_string, FirstMap};
pub use follow::{compute_follow_sets, compute_follow_sets_observed, FollowMap};
pub use grammar::{Grammar, NonTerminalRule, Production};
pub use symbol::Symbol;
pub use symbol_set::SymbolSet;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";
