use super::{numeric_type, ColumnTransformation};
use crate::error::Result;
use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array},
    compute,
    datatypes::DataType,
};
use std::sync::Arc;
use tabcloak_core::{ColumnType, DataError};

/// Replaces the values of a partition by their arithmetic mean. Integer
/// columns stay integer columns, the mean is truncated toward zero.
pub struct AggMean;

fn mean(data: &ArrayRef) -> Result<Option<f64>> {
    let floats = compute::cast(data, &DataType::Float64)?;
    let floats = floats
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::UnsupportedType(data.data_type().clone()))?;

    let present = floats.len() - floats.null_count();

    Ok(compute::sum(floats).map(|sum| sum / present as f64))
}

impl ColumnTransformation for AggMean {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef> {
        let column_type = numeric_type(&data)?;
        let mean = mean(&data)?;

        Ok(match column_type {
            ColumnType::Int => Arc::new(
                vec![mean.map(|v| v.trunc() as i64); data.len()]
                    .into_iter()
                    .collect::<Int64Array>(),
            ),
            _ => Arc::new(vec![mean; data.len()].into_iter().collect::<Float64Array>()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;

    fn aggregate(data: ArrayRef) -> ArrayRef {
        AggMean.transform_data(data).unwrap()
    }

    fn ints(array: &ArrayRef) -> Vec<Option<i64>> {
        array
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap()
            .iter()
            .collect()
    }

    #[test]
    fn integer_mean() {
        let output = aggregate(Arc::new(Int64Array::from(vec![10, 11, 12])));

        assert_eq!(ints(&output), vec![Some(11), Some(11), Some(11)]);
    }

    #[test]
    fn integer_mean_is_truncated() {
        let output = aggregate(Arc::new(Int64Array::from(vec![10, 11, 11])));

        assert_eq!(ints(&output), vec![Some(10), Some(10), Some(10)]);
    }

    #[test]
    fn float_mean_skips_missing_values() {
        let output = aggregate(Arc::new(Float64Array::from(vec![Some(1.0), None, Some(2.0)])));

        assert_eq!(
            output
                .as_any()
                .downcast_ref::<Float64Array>()
                .unwrap()
                .iter()
                .collect::<Vec<Option<f64>>>(),
            vec![Some(1.5), Some(1.5), Some(1.5)]
        );
    }

    #[test]
    fn missing_only_partition_stays_missing() {
        let output = aggregate(Arc::new(Int64Array::from(vec![None, None])));

        assert_eq!(ints(&output), vec![None, None]);
    }

    #[test]
    fn rejects_string_columns() {
        let data: ArrayRef = Arc::new(StringArray::from(vec!["Paris"]));

        assert!(AggMean.transform_data(data).is_err());
    }
}
