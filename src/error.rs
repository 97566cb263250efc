use thiserror::Error;

#[derive(Error, Debug)]
pub enum PesaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },

    #[error("Row {row}: invalid date '{value}' (expected e.g. 05 Jan 2024)")]
    InvalidDate { row: usize, value: String },

    #[error("Row {0} is a payment; only expenses can be recategorized")]
    NotAnExpense(usize),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No transaction at row {0}")]
    InvalidRow(usize),

    #[error("'{0}' is reserved and cannot be changed")]
    ReservedCategory(String),

    #[error("Category store error: {0}")]
    Store(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PesaError>;
