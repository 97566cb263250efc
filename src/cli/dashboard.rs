use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{load_file, Context};
use crate::error::Result;
use crate::fmt::{date, money};
use crate::models::Transaction;
use crate::reports::{expense_summary, payments_summary};

pub fn run(ctx: &Context, file: &str) -> Result<()> {
    let store = ctx.store();
    let transactions = load_file(file, &store)?;
    print_dashboard(&transactions, ctx.currency());
    Ok(())
}

fn amount_cell(amount: f64, currency: &str) -> Cell {
    Cell::new(money(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Expenses with row numbers, the per-category expense summary, then the
/// payments total and table.
pub(crate) fn print_dashboard(transactions: &[Transaction], currency: &str) {
    let mut expenses = Table::new();
    expenses.set_header(vec!["#", "Date", "Details", "Amount", "Category"]);
    for (i, txn) in transactions.iter().enumerate().filter(|(_, t)| t.is_debit()) {
        expenses.add_row(vec![
            Cell::new(i + 1),
            Cell::new(date(txn.date)),
            Cell::new(&txn.details),
            amount_cell(txn.amount, currency),
            Cell::new(&txn.category),
        ]);
    }
    println!("{}\n{expenses}", "Your Expenses".red().bold());

    let mut summary = Table::new();
    summary.set_header(vec!["Category", "Amount", "Count"]);
    for item in expense_summary(transactions) {
        summary.add_row(vec![
            Cell::new(&item.name),
            amount_cell(item.total, currency),
            Cell::new(item.count),
        ]);
    }
    println!("\n{}\n{summary}", "Expenses Summary".red().bold());

    let payments = payments_summary(transactions);
    println!("\n{}", "Payments Summary".green().bold());
    println!("Total Payments: {}", money(payments.total, currency).bold());
    if !payments.rows.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Details", "Amount", "Category"]);
        for txn in &payments.rows {
            table.add_row(vec![
                Cell::new(date(txn.date)),
                Cell::new(&txn.details),
                amount_cell(txn.amount, currency),
                Cell::new(&txn.category),
            ]);
        }
        println!("{table}");
    }
}
