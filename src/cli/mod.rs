pub mod categories;
pub mod dashboard;
pub mod edit;
pub mod init;
pub mod keywords;
#[cfg(feature = "tui")]
pub mod review;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{PesaError, Result};
use crate::importer::import_file;
use crate::models::Transaction;
use crate::settings::{load_settings, shellexpand_path, Settings};
use crate::store::CategoryStore;

#[derive(Parser)]
#[command(
    name = "pesa",
    about = "Keyword-categorized spending dashboard for bank and mobile-money CSV exports."
)]
pub struct Cli {
    /// Category store to use instead of <data_dir>/categories.json
    #[arg(long, global = true)]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create an empty category store.
    Init {
        /// Path for pesa data (default: ~/Documents/pesa)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Currency label shown next to amounts, e.g. KSh or AED
        #[arg(long)]
        currency: Option<String>,
    },
    /// Categorize a CSV export and print expense and payment summaries.
    Show {
        /// CSV with Date, Details, Amount and Debit/Credit columns
        file: String,
    },
    /// Interactively recategorize expenses from a CSV export.
    #[cfg(feature = "tui")]
    Review {
        /// CSV with Date, Details, Amount and Debit/Credit columns
        file: String,
    },
    /// Recategorize rows of a CSV export and learn their details as keywords.
    Edit {
        /// CSV with Date, Details, Amount and Debit/Credit columns
        file: String,
        /// ROW=CATEGORY, using the row numbers printed by `pesa show`
        #[arg(long = "set", value_name = "ROW=CATEGORY", required = true)]
        set: Vec<String>,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage the keywords that map transaction details to a category.
    Keywords {
        #[command(subcommand)]
        command: KeywordsCommands,
    },
    /// Show settings and category store statistics.
    Status,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List categories and their keyword counts.
    List,
    /// Add a new, empty category.
    Add {
        /// Category name, e.g. 'Food'
        name: String,
    },
    /// Remove a category and all of its keywords.
    Remove {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum KeywordsCommands {
    /// List keywords, optionally for a single category.
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Teach a category a transaction details string.
    Add {
        /// Category name
        category: String,
        /// Details text to match (case-insensitive, whole string)
        keyword: String,
    },
    /// Forget a keyword.
    Remove {
        /// Category name
        category: String,
        /// Keyword as stored
        keyword: String,
    },
}

/// Settings plus the resolved category store location for one invocation.
pub struct Context {
    pub settings: Settings,
    pub store_path: PathBuf,
}

impl Context {
    pub fn new(store_override: Option<&str>) -> Self {
        let settings = load_settings();
        let store_path = match store_override {
            Some(path) => PathBuf::from(shellexpand_path(path)),
            None => settings.store_path(),
        };
        Self {
            settings,
            store_path,
        }
    }

    /// Read-only view of the store; an unreadable file yields the defaults.
    pub fn store(&self) -> CategoryStore {
        CategoryStore::load(&self.store_path)
    }

    /// Store for commands that save it back. An unreadable file is an error
    /// here, so it is never overwritten with the defaults.
    pub fn store_for_update(&self) -> Result<CategoryStore> {
        CategoryStore::open(&self.store_path).map_err(|e| {
            PesaError::Store(format!(
                "cannot read {}: {e}; fix or move it before making changes",
                self.store_path.display()
            ))
        })
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency
    }
}

/// Load and categorize a CSV, or fail with a single message.
pub(crate) fn load_file(file: &str, store: &CategoryStore) -> Result<Vec<Transaction>> {
    import_file(&PathBuf::from(file), store)
}
