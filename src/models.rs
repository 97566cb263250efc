use chrono::NaiveDate;

/// Name of the category every transaction starts in. Always present in the
/// store and never given keywords by the matcher.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("debit") {
            Some(Self::Debit)
        } else if raw.eq_ignore_ascii_case("credit") {
            Some(Self::Credit)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub details: String,
    pub amount: f64,
    pub direction: Direction,
    pub category: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, details: String, amount: f64, direction: Direction) -> Self {
        Self {
            date,
            details,
            amount,
            direction,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }
}
