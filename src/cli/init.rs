use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::CategoryStore;

pub fn run(
    data_dir: Option<String>,
    currency: Option<String>,
    store_override: Option<&str>,
) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(label) = currency {
        settings.currency = label.trim().to_string();
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let store_path = match store_override {
        Some(path) => PathBuf::from(shellexpand_path(path)),
        None => settings.store_path(),
    };
    let existed = store_path.exists();
    // Re-saving normalizes the file and restores a missing reserved category.
    let store = CategoryStore::open(&store_path)?;
    store.save()?;

    if existed {
        println!(
            "Using existing category store at {} ({} categories)",
            store_path.display(),
            store.len()
        );
    } else {
        println!("Initialized pesa at {}", resolved.display());
        println!("Category store: {}", store_path.display());
    }
    Ok(())
}
