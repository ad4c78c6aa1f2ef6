use super::ColumnTransformation;
use crate::error::Result;
use arrow::array::{ArrayRef, StringArray};
use itertools::Itertools;
use std::sync::Arc;
use tabcloak_core::array_value;

pub const CATEGORICAL_DELIMITER: &str = "|";

/// Replaces the values of a partition by its distinct values, in order of
/// first appearance, joined with [`CATEGORICAL_DELIMITER`].
pub struct AggStringJoinUnique;

impl ColumnTransformation for AggStringJoinUnique {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef> {
        let joined = (0..data.len())
            .map(|row| array_value(data.as_ref(), row))
            .unique()
            .join(CATEGORICAL_DELIMITER);

        Ok(Arc::new(StringArray::from(vec![joined.as_str(); data.len()])))
    }
}
