use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::error::{PesaError, Result};
use crate::models::UNCATEGORIZED;

/// Category name -> keyword list, mirrored to a JSON file.
///
/// Categories keep insertion order. The matcher walks them in that order and
/// the JSON file preserves it, so the "later category wins" tie-break is
/// stable across restarts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStore {
    path: PathBuf,
    categories: Vec<(String, Vec<String>)>,
}

impl CategoryStore {
    /// Empty store holding only the reserved category.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            categories: vec![(UNCATEGORIZED.to_string(), Vec::new())],
        }
    }

    /// Read the store at `path`, falling back to the default store when the
    /// file is missing, unreadable or not valid JSON.
    pub fn load(path: &Path) -> Self {
        match Self::open(path) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "could not read category store {}: {e}; starting with defaults",
                    path.display()
                );
                Self::new(path)
            }
        }
    }

    /// Like [`CategoryStore::load`] but reports read and parse failures.
    /// A missing file is not an error.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no category store at {}, using defaults", path.display());
            return Ok(Self::new(path));
        }
        let content = std::fs::read_to_string(path)?;
        let mut categories = parse_categories(&content)?;
        if !categories.iter().any(|(name, _)| name == UNCATEGORIZED) {
            categories.insert(0, (UNCATEGORIZED.to_string(), Vec::new()));
        }
        info!(
            "loaded {} categories from {}",
            categories.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            categories,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full mapping to disk. The JSON goes to a sibling temp file
    /// first and is renamed over the target, so a crash never leaves a
    /// truncated store behind.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.to_json())?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, format!("{json}\n"))?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("saved {} categories to {}", self.len(), self.path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn keywords(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kws)| kws.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(n, kws)| (n.as_str(), kws.as_slice()))
    }

    /// Insert an empty keyword list under `name`. Returns false if the
    /// category already exists.
    pub fn add_category(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.categories.push((name.to_string(), Vec::new()));
        true
    }

    /// Delete a category and its keywords. The reserved category stays.
    pub fn remove_category(&mut self, name: &str) -> Result<bool> {
        if name == UNCATEGORIZED {
            return Err(PesaError::ReservedCategory(name.to_string()));
        }
        let before = self.categories.len();
        self.categories.retain(|(n, _)| n != name);
        Ok(self.categories.len() != before)
    }

    /// Append a trimmed keyword to `category`. Blank keywords and keywords
    /// already stored verbatim are ignored (returns false). Memory only; the
    /// caller decides when to [`save`](CategoryStore::save).
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<bool> {
        if category == UNCATEGORIZED {
            return Err(PesaError::ReservedCategory(category.to_string()));
        }
        let keywords = self.keywords_mut(category)?;
        let keyword = keyword.trim();
        if keyword.is_empty() || keywords.iter().any(|k| k == keyword) {
            return Ok(false);
        }
        keywords.push(keyword.to_string());
        Ok(true)
    }

    pub fn remove_keyword(&mut self, category: &str, keyword: &str) -> Result<bool> {
        let keywords = self.keywords_mut(category)?;
        let keyword = keyword.trim();
        let before = keywords.len();
        keywords.retain(|k| k != keyword);
        Ok(keywords.len() != before)
    }

    fn keywords_mut(&mut self, category: &str) -> Result<&mut Vec<String>> {
        self.categories
            .iter_mut()
            .find(|(n, _)| n == category)
            .map(|(_, kws)| kws)
            .ok_or_else(|| PesaError::UnknownCategory(category.to_string()))
    }

    fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .categories
            .iter()
            .map(|(name, kws)| {
                let list = kws.iter().cloned().map(Value::String).collect();
                (name.clone(), Value::Array(list))
            })
            .collect();
        Value::Object(map)
    }
}

fn parse_categories(content: &str) -> Result<Vec<(String, Vec<String>)>> {
    let Value::Object(map) = serde_json::from_str::<Value>(content)? else {
        return Err(PesaError::Store("expected a JSON object".into()));
    };
    let mut categories = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Value::Array(items) = value else {
            return Err(PesaError::Store(format!(
                "keywords for '{name}' must be a list"
            )));
        };
        let keywords = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(PesaError::Store(format!(
                    "keyword under '{name}' is not a string: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        categories.push((name, keywords));
    }
    Ok(categories)
}
