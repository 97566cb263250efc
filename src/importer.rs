use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};

use crate::categorizer::categorize_transactions;
use crate::error::{PesaError, Result};
use crate::models::{Direction, Transaction};
use crate::store::CategoryStore;

pub const DATE_FORMAT: &str = "%d %b %Y";

const COL_DATE: &str = "Date";
const COL_DETAILS: &str = "Details";
const COL_AMOUNT: &str = "Amount";
const COL_DIRECTION: &str = "Debit/Credit";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strip thousands separators and parse. `"1,234.50"` -> `1234.5`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Day, abbreviated month, four-digit year: `05 Jan 2024`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

struct Columns {
    date: usize,
    details: usize,
    amount: usize,
    direction: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| PesaError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            date: find(COL_DATE)?,
            details: find(COL_DETAILS)?,
            amount: find(COL_AMOUNT)?,
            direction: find(COL_DIRECTION)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse every row of a `Date, Details, Amount, Debit/Credit` CSV. A bad date
/// or amount fails the whole file; callers never see a partial table. Rows
/// that are neither Debit nor Credit belong to no view and are skipped.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let cols = Columns::locate(rdr.headers()?)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_date = field(cols.date);
        let date = parse_date(raw_date).ok_or_else(|| PesaError::InvalidDate {
            row,
            value: raw_date.to_string(),
        })?;

        let raw_amount = field(cols.amount);
        let amount = parse_amount(raw_amount).ok_or_else(|| PesaError::InvalidAmount {
            row,
            value: raw_amount.to_string(),
        })?;

        let raw_direction = field(cols.direction);
        let Some(direction) = Direction::parse(raw_direction) else {
            warn!("row {row}: skipping Debit/Credit value '{raw_direction}'");
            continue;
        };

        rows.push(Transaction::new(
            date,
            field(cols.details).to_string(),
            amount,
            direction,
        ));
    }
    Ok(rows)
}

/// Parse and categorize against the current store.
pub fn load_transactions<R: Read>(reader: R, store: &CategoryStore) -> Result<Vec<Transaction>> {
    let mut rows = parse_transactions(reader)?;
    let result = categorize_transactions(&mut rows, store);
    info!(
        "loaded {} transactions ({} categorized, {} uncategorized)",
        rows.len(),
        result.categorized,
        result.uncategorized
    );
    Ok(rows)
}

pub fn import_file(file_path: &Path, store: &CategoryStore) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(file_path)?;
    load_transactions(file, store)
}
