use tabcloak_core::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnonymizationError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Inputs the algorithm is not defined for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("range of continuous column {column} requested on an empty partition")]
    EmptyRange { column: String },

    #[error("continuous column {column} does not hold numeric values")]
    NonNumericColumn { column: String },

    #[error("t-closeness requires a categorical sensitive column, {column} is continuous")]
    NonCategoricalSensitiveColumn { column: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("sensitive column {0} must not be a quasi identifier")]
    SensitiveColumnIsFeature(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("quasi identifier {0} listed more than once")]
    DuplicateFeatureColumn(String),

    #[error("identifier column {0} is also a quasi identifier or the sensitive column")]
    IdentifierOverlap(String),

    #[error("k must be at least 1")]
    InvalidK,

    #[error("l must be at least 1")]
    InvalidL,

    #[error("p must lie within [0, 1], got {0}")]
    InvalidP(f64),

    #[error("at least one anonymization criterion is required")]
    NoCriteria,
}

pub type Result<T, E = AnonymizationError> = std::result::Result<T, E>;
