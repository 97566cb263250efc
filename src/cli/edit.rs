use colored::Colorize;

use crate::cli::dashboard::print_dashboard;
use crate::cli::{load_file, Context};
use crate::error::{PesaError, Result};
use crate::reviewer::ReviewSession;

/// Split `ROW=CATEGORY` into a 0-based row index and a category name.
pub(crate) fn parse_assignment(raw: &str) -> Result<(usize, String)> {
    let invalid = || PesaError::Other(format!("Expected ROW=CATEGORY, got '{raw}'"));
    let (row, category) = raw.split_once('=').ok_or_else(invalid)?;
    let row: usize = row.trim().parse().map_err(|_| invalid())?;
    let category = category.trim();
    if row == 0 || category.is_empty() {
        return Err(invalid());
    }
    Ok((row - 1, category.to_string()))
}

pub fn run(ctx: &Context, file: &str, assignments: &[String]) -> Result<()> {
    let mut store = ctx.store_for_update()?;
    let transactions = load_file(file, &store)?;
    let mut session = ReviewSession::new(transactions);

    for raw in assignments {
        let (row, category) = parse_assignment(raw)?;
        // only expense rows are numbered in `show`
        if session.transactions().get(row).is_some_and(|t| !t.is_debit()) {
            return Err(PesaError::NotAnExpense(row + 1));
        }
        session
            .edit(&store, row, &category)
            .map_err(|e| match e {
                PesaError::InvalidRow(r) => PesaError::InvalidRow(r + 1),
                other => other,
            })?;
    }

    let result = session.apply(&mut store)?;
    println!(
        "{}",
        format!(
            "{} rows recategorized, {} keywords learned",
            result.changed, result.keywords_added
        )
        .green()
    );
    println!();
    print_dashboard(session.transactions(), ctx.currency());
    Ok(())
}
