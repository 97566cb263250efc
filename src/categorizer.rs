use std::collections::HashMap;

use log::debug;

use crate::models::{Transaction, UNCATEGORIZED};
use crate::store::CategoryStore;

/// Case- and whitespace-insensitive form used on both sides of a match.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized keyword -> category, built once per store version.
///
/// Categories are inserted in store order, so when one keyword sits under
/// several categories the last one wins.
pub struct KeywordIndex {
    by_keyword: HashMap<String, String>,
}

impl KeywordIndex {
    pub fn build(store: &CategoryStore) -> Self {
        let mut by_keyword = HashMap::new();
        for (category, keywords) in store.iter() {
            if category == UNCATEGORIZED || keywords.is_empty() {
                continue;
            }
            for keyword in keywords {
                by_keyword.insert(normalize(keyword), category.to_string());
            }
        }
        Self { by_keyword }
    }

    pub fn lookup(&self, details: &str) -> Option<&str> {
        self.by_keyword.get(&normalize(details)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_keyword.len()
    }
}

pub struct CategorizeResult {
    pub categorized: usize,
    pub uncategorized: usize,
}

/// Reset every transaction to the reserved category, then assign the
/// category whose keyword equals the transaction's details.
pub fn categorize_transactions(
    transactions: &mut [Transaction],
    store: &CategoryStore,
) -> CategorizeResult {
    let index = KeywordIndex::build(store);
    let mut categorized = 0usize;
    let mut uncategorized = 0usize;

    for txn in transactions.iter_mut() {
        match index.lookup(&txn.details) {
            Some(category) => {
                txn.category = category.to_string();
                categorized += 1;
            }
            None => {
                txn.category = UNCATEGORIZED.to_string();
                uncategorized += 1;
            }
        }
    }

    debug!(
        "categorized {categorized} of {} transactions using {} keywords",
        transactions.len(),
        index.len()
    );
    CategorizeResult {
        categorized,
        uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::NaiveDate;

    fn store_with(pairs: &[(&str, &str)]) -> (tempfile::TempDir, CategoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CategoryStore::new(&dir.path().join("categories.json"));
        for (category, keyword) in pairs {
            store.add_category(category);
            store.add_keyword(category, keyword).unwrap();
        }
        (dir, store)
    }

    fn txns(details: &[&str]) -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        details
            .iter()
            .map(|d| Transaction::new(date, d.to_string(), 100.0, Direction::Debit))
            .collect()
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let (_dir, store) = store_with(&[("Food", "supermarket")]);
        let mut rows = txns(&["Supermarket"]);
        let result = categorize_transactions(&mut rows, &store);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(result.categorized, 1);
        assert_eq!(result.uncategorized, 0);
    }

    #[test]
    fn test_details_are_trimmed() {
        let (_dir, store) = store_with(&[("Transport", "Uber Trip")]);
        let mut rows = txns(&["  UBER TRIP  "]);
        categorize_transactions(&mut rows, &store);
        assert_eq!(rows[0].category, "Transport");
    }

    #[test]
    fn test_match_is_exact_not_substring() {
        let (_dir, store) = store_with(&[("Food", "cafe")]);
        let mut rows = txns(&["Cafe X", "cafe"]);
        let result = categorize_transactions(&mut rows, &store);
        assert_eq!(rows[0].category, UNCATEGORIZED);
        assert_eq!(rows[1].category, "Food");
        assert_eq!(result.uncategorized, 1);
    }

    #[test]
    fn test_later_category_wins() {
        let (_dir, store) = store_with(&[("Food", "Naivas"), ("Household", "naivas")]);
        let mut rows = txns(&["NAIVAS"]);
        categorize_transactions(&mut rows, &store);
        assert_eq!(rows[0].category, "Household");
    }

    #[test]
    fn test_previous_category_is_reset() {
        let (_dir, store) = store_with(&[("Food", "supermarket")]);
        let mut rows = txns(&["Airtime"]);
        rows[0].category = "Food".into();
        categorize_transactions(&mut rows, &store);
        assert_eq!(rows[0].category, UNCATEGORIZED);
    }

    #[test]
    fn test_empty_store_leaves_everything_uncategorized() {
        let (_dir, mut store) = store_with(&[]);
        store.add_category("Food");
        let mut rows = txns(&["Supermarket", "Rent"]);
        let result = categorize_transactions(&mut rows, &store);
        assert!(rows.iter().all(|t| t.category == UNCATEGORIZED));
        assert_eq!(result.uncategorized, 2);
    }

    #[test]
    fn test_index_lookup() {
        let (_dir, store) = store_with(&[("Bills", "KPLC Prepaid"), ("Bills", "Zuku")]);
        let index = KeywordIndex::build(&store);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("kplc prepaid"), Some("Bills"));
        assert_eq!(index.lookup("Safaricom"), None);
    }
}
