use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw statement row as supplied by the CSV collaborator. The date is an
/// opaque string, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
}

/// A statement row after rule evaluation. The source row is never mutated;
/// categorization always produces a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecord {
    pub date: String,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
}

impl RawRecord {
    pub fn with_category(&self, category: String) -> CategorizedRecord {
        CategorizedRecord {
            date: self.date.clone(),
            name: self.name.clone(),
            category,
            amount: self.amount,
        }
    }
}
