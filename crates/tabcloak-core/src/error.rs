use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported type: {0:?}")]
    UnsupportedType(arrow::datatypes::DataType),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column {0} holds values that do not fit into a 64 bit integer")]
    ValueOutOfRange(String),
}
