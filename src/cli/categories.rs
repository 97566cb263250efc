use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::Context;
use crate::error::{PesaError, Result};
use crate::reviewer::add_category;

pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.store();

    let mut table = Table::new();
    table.set_header(vec!["Name", "Keywords"]);
    for (name, keywords) in store.iter() {
        table.add_row(vec![Cell::new(name), Cell::new(keywords.len())]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn add(ctx: &Context, name: &str) -> Result<()> {
    let mut store = ctx.store_for_update()?;
    if add_category(&mut store, name)? {
        println!("{}", format!("Added category: {}", name.trim()).green());
    } else {
        println!("{}", format!("Category already exists: {}", name.trim()).yellow());
    }
    Ok(())
}

pub fn remove(ctx: &Context, name: &str) -> Result<()> {
    let mut store = ctx.store_for_update()?;
    if !store.remove_category(name)? {
        return Err(PesaError::UnknownCategory(name.to_string()));
    }
    store.save()?;
    println!("Removed category: {name}");
    Ok(())
}
