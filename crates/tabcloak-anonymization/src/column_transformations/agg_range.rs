use super::{numeric_type, ColumnTransformation};
use crate::error::Result;
use arrow::array::{ArrayRef, StringArray};
use std::sync::Arc;
use tabcloak_core::{numeric_range, ColumnType};

fn format_number(value: f64, column_type: ColumnType) -> String {
    match column_type {
        ColumnType::Int => format!("{}", value as i64),
        _ => format!("{}", value),
    }
}

fn aggregated_value(data: &ArrayRef, column_type: ColumnType) -> Option<String> {
    numeric_range(data.as_ref()).map(|(min, max)| {
        if min == max {
            format_number(min, column_type)
        } else {
            format!(
                "{} - {}",
                format_number(min, column_type),
                format_number(max, column_type)
            )
        }
    })
}

/// Replaces the values of a partition by the string `"min - max"`.
pub struct AggRange;

impl ColumnTransformation for AggRange {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef> {
        let column_type = numeric_type(&data)?;

        Ok(Arc::new(
            vec![aggregated_value(&data, column_type); data.len()]
                .into_iter()
                .collect::<StringArray>(),
        ))
    }
}
