mod agg_mean;
mod agg_range;
mod agg_string_common_prefix;
mod agg_string_join_unique;
mod randomize;

pub use agg_mean::AggMean;
pub use agg_range::AggRange;
pub use agg_string_common_prefix::{longest_common_prefix, AggStringCommonPrefix};
pub use agg_string_join_unique::{AggStringJoinUnique, CATEGORICAL_DELIMITER};
pub use randomize::Randomize;

use crate::error::Result;
use arrow::array::ArrayRef;
use tabcloak_core::{ColumnType, DataError};

/// Generalizes the values of one column within one partition. `data` holds
/// exactly the rows of the partition, the output has the same length.
pub trait ColumnTransformation: Send + Sync {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef>;
}

fn numeric_type(data: &ArrayRef) -> Result<ColumnType, DataError> {
    ColumnType::of(data.data_type())
        .filter(ColumnType::is_numeric)
        .ok_or_else(|| DataError::UnsupportedType(data.data_type().clone()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NumericAggregation {
    #[default]
    Mean,
    Range,
}

impl NumericAggregation {
    pub fn transformation(&self) -> Box<dyn ColumnTransformation> {
        match self {
            NumericAggregation::Mean => Box::new(AggMean),
            NumericAggregation::Range => Box::new(AggRange),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StringAggregation {
    #[default]
    Join,
    CommonPrefix,
}

impl StringAggregation {
    pub fn transformation(&self) -> Box<dyn ColumnTransformation> {
        match self {
            StringAggregation::Join => Box::new(AggStringJoinUnique),
            StringAggregation::CommonPrefix => Box::new(AggStringCommonPrefix),
        }
    }
}
