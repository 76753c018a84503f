use serde::{Deserialize, Serialize};
use std::fmt;

use crate::month::Month;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear(pub i32);

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FY{}", self.0)
    }
}

impl FiscalYear {
    pub fn new(year: i32) -> Self {
        FiscalYear(year)
    }

    pub fn year(self) -> i32 {
        self.0
    }

    /// Attributes a statement to a fiscal year. A December statement is filed
    /// in arrears, so it belongs to the year before the current one.
    pub fn for_statement(month: Month, current_year: i32) -> Self {
        if month == Month::December {
            FiscalYear(current_year - 1)
        } else {
            FiscalYear(current_year)
        }
    }
}
