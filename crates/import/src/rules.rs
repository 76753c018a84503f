use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use bankstat_core::{CategorizedRecord, RawRecord};

/// The optional clause kinds a rule may declare. An absent clause is an empty
/// list; it contributes no signal and must never be read as a failed match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchClauses {
    #[serde(default)]
    pub name_contains: Vec<String>,
    #[serde(default)]
    pub category_equals: Vec<String>,
    #[serde(default)]
    pub amount_equals: Vec<AmountPattern>,
}

impl MatchClauses {
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_empty()
            && self.category_equals.is_empty()
            && self.amount_equals.is_empty()
    }
}

/// An amount-equals entry. Configuration may spell amounts as JSON numbers or
/// strings; a string that fails to parse as a number is a non-match for that
/// one entry, not a rule failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountPattern {
    Number(Decimal),
    Text(String),
}

impl AmountPattern {
    fn matches(&self, amount: Decimal) -> bool {
        match self {
            AmountPattern::Number(n) => *n == amount,
            AmountPattern::Text(s) => Decimal::from_str(s.trim()).is_ok_and(|n| n == amount),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    #[serde(rename = "match", default)]
    pub clauses: MatchClauses,
    #[serde(default)]
    pub match_any: bool,
    pub category: String,
}

/// The tri-state evaluation result of one clause against one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    True,
    False,
    Absent,
}

/// ANY mode: at least one declared clause matched.
pub fn any_satisfied(signals: &[Signal]) -> bool {
    signals.contains(&Signal::True)
}

/// ALL mode: no declared clause failed. Undeclared clauses are vacuously
/// satisfied; callers must not feed an all-absent rule through this.
pub fn all_satisfied(signals: &[Signal]) -> bool {
    !signals.contains(&Signal::False)
}

pub struct RuleEngine {
    rules: Vec<CategoryRule>,
}

impl RuleEngine {
    /// Validates rules eagerly. A rule with no clauses at all would vacuously
    /// match everything under ALL mode, so it is dropped here instead of being
    /// consulted per transaction.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter(|rule| {
                if rule.clauses.is_empty() {
                    tracing::warn!(category = %rule.category, "dropping rule with no match clauses");
                    false
                } else {
                    true
                }
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the rules in declaration order; the first rule that fires
    /// wins. Name and category are compared as trimmed lowercase, but the
    /// fallback returns `raw_category` exactly as supplied.
    pub fn categorize(&self, name: &str, raw_category: &str, amount: Option<Decimal>) -> String {
        let name = name.trim().to_lowercase();
        let category = raw_category.trim().to_lowercase();

        for rule in &self.rules {
            let signals = [
                name_signal(&rule.clauses.name_contains, &name),
                category_signal(&rule.clauses.category_equals, &category),
                amount_signal(&rule.clauses.amount_equals, amount),
            ];
            let fired = if rule.match_any {
                any_satisfied(&signals)
            } else {
                all_satisfied(&signals)
            };
            if fired {
                return rule.category.clone();
            }
        }

        raw_category.to_string()
    }

    pub fn categorize_record(&self, record: &RawRecord) -> CategorizedRecord {
        let category = self.categorize(&record.name, &record.category, Some(record.amount));
        record.with_category(category)
    }
}

fn name_signal(subs: &[String], name: &str) -> Signal {
    if subs.is_empty() {
        return Signal::Absent;
    }
    if subs.iter().any(|sub| name.contains(&sub.trim().to_lowercase())) {
        Signal::True
    } else {
        Signal::False
    }
}

fn category_signal(values: &[String], category: &str) -> Signal {
    if values.is_empty() {
        return Signal::Absent;
    }
    if values.iter().any(|v| v.trim().to_lowercase() == category) {
        Signal::True
    } else {
        Signal::False
    }
}

fn amount_signal(patterns: &[AmountPattern], amount: Option<Decimal>) -> Signal {
    if patterns.is_empty() {
        return Signal::Absent;
    }
    // A declared amount clause cannot be satisfied by a row with no amount.
    match amount {
        None => Signal::False,
        Some(amount) => {
            if patterns.iter().any(|p| p.matches(amount)) {
                Signal::True
            } else {
                Signal::False
            }
        }
    }
}
