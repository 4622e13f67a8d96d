use thiserror::Error;

/// Errors raised when a loaded table does not have the shape a chart needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("{source_name}: missing column {column:?}")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name}: column {column:?} row {row}: {value:?} is not a number")]
    NotNumeric {
        source_name: String,
        column: String,
        row: usize,
        value: String,
    },
}
