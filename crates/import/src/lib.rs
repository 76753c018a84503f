pub mod csv;
pub mod rules;

pub use csv::{read_statement, CsvError};
pub use rules::{
    all_satisfied, any_satisfied, AmountPattern, CategoryRule, MatchClauses, RuleEngine, Signal,
};
