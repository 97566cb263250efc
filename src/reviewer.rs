use std::collections::BTreeMap;

use log::info;

use crate::error::{PesaError, Result};
use crate::models::{Transaction, UNCATEGORIZED};
use crate::store::CategoryStore;

/// Loaded transactions plus category edits that have not been applied yet.
pub struct ReviewSession {
    transactions: Vec<Transaction>,
    pending: BTreeMap<usize, String>,
}

pub struct ApplyResult {
    pub changed: usize,
    pub keywords_added: usize,
}

impl ReviewSession {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            pending: BTreeMap::new(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Category shown for `row`: the staged edit if any, else the current one.
    pub fn category_of(&self, row: usize) -> Option<&str> {
        self.pending
            .get(&row)
            .map(String::as_str)
            .or_else(|| self.transactions.get(row).map(|t| t.category.as_str()))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Stage a category change for `row` (0-based). Staging the row's current
    /// category drops any earlier edit.
    pub fn edit(&mut self, store: &CategoryStore, row: usize, category: &str) -> Result<()> {
        let txn = self
            .transactions
            .get(row)
            .ok_or(PesaError::InvalidRow(row))?;
        if !store.contains(category) {
            return Err(PesaError::UnknownCategory(category.to_string()));
        }
        if txn.category == category {
            self.pending.remove(&row);
        } else {
            self.pending.insert(row, category.to_string());
        }
        Ok(())
    }

    pub fn discard(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Commit staged edits. Each changed row teaches the store its details
    /// string as a keyword of the new category.
    ///
    /// Keywords are learned on a copy of the store which is saved before
    /// anything is committed. On error the rows, the staged edits and `store`
    /// are left as they were, so the apply can be retried.
    pub fn apply(&mut self, store: &mut CategoryStore) -> Result<ApplyResult> {
        let mut updated = store.clone();
        let mut changes = Vec::new();
        let mut keywords_added = 0usize;

        for (&row, category) in &self.pending {
            let Some(txn) = self.transactions.get(row) else {
                continue;
            };
            if txn.category == *category {
                continue;
            }
            if category != UNCATEGORIZED && updated.add_keyword(category, &txn.details)? {
                keywords_added += 1;
            }
            changes.push((row, category.clone()));
        }

        if keywords_added > 0 {
            updated.save()?;
        }

        *store = updated;
        self.pending.clear();
        let changed = changes.len();
        for (row, category) in changes {
            self.transactions[row].category = category;
        }
        info!("applied {changed} edits, learned {keywords_added} keywords");
        Ok(ApplyResult {
            changed,
            keywords_added,
        })
    }
}

/// Create a category and persist the store. Returns false if it already
/// existed.
pub fn add_category(store: &mut CategoryStore, name: &str) -> Result<bool> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PesaError::Other("Category name is required".into()));
    }
    if !store.add_category(name) {
        return Ok(false);
    }
    if let Err(e) = store.save() {
        store.remove_category(name)?;
        return Err(e);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::categorize_transactions;
    use crate::models::Direction;
    use chrono::NaiveDate;

    fn setup() -> (tempfile::TempDir, CategoryStore, ReviewSession) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CategoryStore::new(&dir.path().join("categories.json"));
        store.add_category("Food");
        store.add_category("Transport");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let txns = vec![
            Transaction::new(date, "Cafe X".into(), 250.0, Direction::Debit),
            Transaction::new(date, "Uber".into(), 400.0, Direction::Debit),
        ];
        (dir, store, ReviewSession::new(txns))
    }

    #[test]
    fn test_apply_learns_keyword_and_persists() {
        let (_dir, mut store, mut session) = setup();
        session.edit(&store, 0, "Food").unwrap();
        let result = session.apply(&mut store).unwrap();
        assert_eq!(result.changed, 1);
        assert_eq!(result.keywords_added, 1);
        assert_eq!(session.transactions()[0].category, "Food");
        assert_eq!(store.keywords("Food").unwrap(), &["Cafe X"]);

        // learned keyword is on disk and matches case-insensitively
        let reloaded = CategoryStore::open(store.path()).unwrap();
        assert_eq!(reloaded.keywords("Food").unwrap(), &["Cafe X"]);
        let mut fresh = vec![Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "cafe x".into(),
            90.0,
            Direction::Debit,
        )];
        categorize_transactions(&mut fresh, &reloaded);
        assert_eq!(fresh[0].category, "Food");
    }

    #[test]
    fn test_edit_rejects_unknown_category_and_row() {
        let (_dir, store, mut session) = setup();
        assert!(matches!(
            session.edit(&store, 0, "Rent").unwrap_err(),
            PesaError::UnknownCategory(_)
        ));
        assert!(matches!(
            session.edit(&store, 9, "Food").unwrap_err(),
            PesaError::InvalidRow(9)
        ));
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn test_unchanged_edit_is_dropped() {
        let (_dir, mut store, mut session) = setup();
        session.edit(&store, 0, "Food").unwrap();
        assert_eq!(session.category_of(0), Some("Food"));
        session.edit(&store, 0, UNCATEGORIZED).unwrap();
        assert_eq!(session.pending_count(), 0);
        let result = session.apply(&mut store).unwrap();
        assert_eq!(result.changed, 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_moving_back_to_uncategorized_learns_nothing() {
        let (_dir, mut store, mut session) = setup();
        session.edit(&store, 1, "Transport").unwrap();
        session.apply(&mut store).unwrap();
        session.edit(&store, 1, UNCATEGORIZED).unwrap();
        let result = session.apply(&mut store).unwrap();
        assert_eq!(result.changed, 1);
        assert_eq!(result.keywords_added, 0);
        assert_eq!(store.keywords(UNCATEGORIZED).unwrap().len(), 0);
    }

    #[test]
    fn test_repeat_keyword_not_duplicated() {
        let (_dir, mut store, mut session) = setup();
        store.add_keyword("Food", "Cafe X").unwrap();
        session.edit(&store, 0, "Food").unwrap();
        let result = session.apply(&mut store).unwrap();
        assert_eq!(result.changed, 1);
        assert_eq!(result.keywords_added, 0);
        assert_eq!(store.keywords("Food").unwrap().len(), 1);
    }

    /// Store path whose parent is a regular file, so every save fails.
    fn unwritable_store(dir: &tempfile::TempDir) -> CategoryStore {
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut store = CategoryStore::new(&blocker.join("categories.json"));
        store.add_category("Food");
        store
    }

    #[test]
    fn test_failed_save_leaves_session_and_store_untouched() {
        let (dir, _store, mut session) = setup();
        let mut store = unwritable_store(&dir);
        session.edit(&store, 0, "Food").unwrap();

        assert!(session.apply(&mut store).is_err());
        assert_eq!(session.transactions()[0].category, UNCATEGORIZED);
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.category_of(0), Some("Food"));
        assert!(store.keywords("Food").unwrap().is_empty());

        // a retry still has the edit to apply and still tries to save
        assert!(session.apply(&mut store).is_err());
        assert_eq!(session.pending_count(), 1);
    }

    #[test]
    fn test_failed_save_does_not_add_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = unwritable_store(&dir);
        assert!(add_category(&mut store, "Rent").is_err());
        assert!(!store.contains("Rent"));
    }

    #[test]
    fn test_discard_pending() {
        let (_dir, store, mut session) = setup();
        session.edit(&store, 0, "Food").unwrap();
        session.edit(&store, 1, "Food").unwrap();
        assert_eq!(session.discard(), 2);
        assert_eq!(session.category_of(1), Some(UNCATEGORIZED));
    }

    #[test]
    fn test_add_category_persists() {
        let (_dir, mut store, _session) = setup();
        assert!(add_category(&mut store, "  Rent ").unwrap());
        assert!(!add_category(&mut store, "Rent").unwrap());
        assert!(add_category(&mut store, "   ").is_err());
        let reloaded = CategoryStore::open(store.path()).unwrap();
        assert!(reloaded.contains("Rent"));
    }
}
