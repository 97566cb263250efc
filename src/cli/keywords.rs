use comfy_table::{Cell, Table};

use crate::cli::Context;
use crate::error::{PesaError, Result};

pub fn list(ctx: &Context, category: Option<&str>) -> Result<()> {
    let store = ctx.store();
    let selected: Vec<(&str, &[String])> = match category {
        Some(name) => {
            let keywords = store
                .keywords(name)
                .ok_or_else(|| PesaError::UnknownCategory(name.to_string()))?;
            vec![(name, keywords)]
        }
        None => store.iter().collect(),
    };

    let mut table = Table::new();
    table.set_header(vec!["Keyword", "Category"]);
    for (name, keywords) in selected {
        for keyword in keywords {
            table.add_row(vec![Cell::new(keyword), Cell::new(name)]);
        }
    }
    println!("Keywords\n{table}");
    Ok(())
}

pub fn add(ctx: &Context, category: &str, keyword: &str) -> Result<()> {
    let mut store = ctx.store_for_update()?;
    if store.add_keyword(category, keyword)? {
        store.save()?;
        println!("Added keyword: '{}' \u{2192} {category}", keyword.trim());
    } else {
        println!("Nothing to add: '{}' is blank or already under {category}", keyword.trim());
    }
    Ok(())
}

pub fn remove(ctx: &Context, category: &str, keyword: &str) -> Result<()> {
    let mut store = ctx.store_for_update()?;
    if !store.remove_keyword(category, keyword)? {
        return Err(PesaError::Other(format!(
            "'{}' is not a keyword of {category}",
            keyword.trim()
        )));
    }
    store.save()?;
    println!("Removed keyword: '{}' from {category}", keyword.trim());
    Ok(())
}
