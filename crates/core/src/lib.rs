pub mod filename;
pub mod month;
pub mod period;
pub mod transaction;

pub use filename::{StatementName, STATEMENT_PREFIX};
pub use month::Month;
pub use period::FiscalYear;
pub use transaction::{CategorizedRecord, RawRecord};
