use thiserror::Error;

/// The source table cannot be used at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A single row cannot be lifted into a record; the row is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("'{column}' is empty")]
    MissingIdentifier { column: String },

    #[error("'{column}' value '{value}' is not a number")]
    InvalidNumber { column: String, value: String },
}

/// A dropped source row and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub error: RowError,
}
