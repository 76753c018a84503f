use crate::month::Month;

/// Literal prefix every monthly statement file carries, e.g. `BP_january.csv`.
pub const STATEMENT_PREFIX: &str = "BP";

/// A candidate filename that classified as a valid monthly statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementName {
    pub month: Month,
}

impl StatementName {
    /// Classifies a filename of the shape `<PREFIX>_<monthname>.<ext>`.
    ///
    /// The month token is case-insensitive and the extension (everything from
    /// the first `.` after the month token) is ignored. Returns `None` for any
    /// filename that does not fit the shape; this is a pure classifier and
    /// never errors.
    pub fn parse(filename: &str) -> Option<StatementName> {
        let lower = filename.to_lowercase();
        let rest = lower.strip_prefix(&format!("{}_", STATEMENT_PREFIX.to_lowercase()))?;
        let token = rest.split('.').next()?;
        let month = Month::parse(token)?;
        Some(StatementName { month })
    }
}
