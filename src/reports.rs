use std::collections::HashMap;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    pub count: usize,
}

pub struct PaymentsSummary<'a> {
    pub total: f64,
    pub rows: Vec<&'a Transaction>,
}

/// Debit amounts summed per category, largest first.
pub fn expense_summary(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_debit()) {
        let entry = totals.entry(txn.category.as_str()).or_insert((0.0, 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let mut summary: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, (total, count))| CategoryTotal {
            name: name.to_string(),
            total,
            count,
        })
        .collect();
    summary.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
    });
    summary
}

pub fn payments_summary(transactions: &[Transaction]) -> PaymentsSummary<'_> {
    let rows: Vec<&Transaction> = transactions.iter().filter(|t| t.is_credit()).collect();
    let total = rows.iter().map(|t| t.amount).sum();
    PaymentsSummary { total, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::NaiveDate;

    fn txn(details: &str, amount: f64, direction: Direction, category: &str) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            details.into(),
            amount,
            direction,
        );
        t.category = category.into();
        t
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Supermarket", 1200.0, Direction::Debit, "Food"),
            txn("Cafe X", 300.0, Direction::Debit, "Food"),
            txn("Rent", 15000.0, Direction::Debit, "Housing"),
            txn("Airtime", 50.0, Direction::Debit, "Uncategorized"),
            txn("Salary", 60000.0, Direction::Credit, "Uncategorized"),
            txn("Refund", 250.5, Direction::Credit, "Uncategorized"),
        ]
    }

    #[test]
    fn test_expense_summary_sorted_descending() {
        let summary = expense_summary(&sample());
        let names: Vec<&str> = summary.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Housing", "Food", "Uncategorized"]);
        assert_eq!(summary[1].total, 1500.0);
        assert_eq!(summary[1].count, 2);
        // credits never count as expenses
        assert_eq!(summary[2].total, 50.0);
    }

    #[test]
    fn test_expense_summary_ties_break_by_name() {
        let rows = vec![
            txn("B", 100.0, Direction::Debit, "Zeta"),
            txn("A", 100.0, Direction::Debit, "Alpha"),
        ];
        let summary = expense_summary(&rows);
        assert_eq!(summary[0].name, "Alpha");
    }

    #[test]
    fn test_payments_summary() {
        let rows = sample();
        let payments = payments_summary(&rows);
        assert_eq!(payments.rows.len(), 2);
        assert_eq!(payments.total, 60250.5);
    }

    #[test]
    fn test_empty_input() {
        assert!(expense_summary(&[]).is_empty());
        let payments = payments_summary(&[]);
        assert_eq!(payments.total, 0.0);
        assert!(payments.rows.is_empty());
    }
}
