use crate::split::median;
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use std::sync::Arc;
use tabcloak_core::{ColumnRef, ColumnType, DataError, Table};
use tracing::debug;

pub const MISSING_PLACEHOLDER: &str = "MISSING DATA";

fn fill_with_placeholder(column: ColumnRef<'_>) -> ArrayRef {
    Arc::new(
        (0..column.len())
            .map(|row| {
                let value = column.value(row);
                Some(if value.is_missing() {
                    MISSING_PLACEHOLDER.to_string()
                } else {
                    value.to_string()
                })
            })
            .collect::<StringArray>(),
    )
}

fn fill_with_median(column: ColumnRef<'_>) -> Option<ArrayRef> {
    let values = (0..column.len()).filter_map(|row| column.number(row)).collect();
    let median = median(values)?;

    let data = column.data().as_any();
    let filled: ArrayRef = match column.column_type() {
        ColumnType::Int => {
            let fill = median.trunc() as i64;
            Arc::new(
                data.downcast_ref::<Int64Array>()?
                    .iter()
                    .map(|v| v.or(Some(fill)))
                    .collect::<Int64Array>(),
            )
        }
        ColumnType::Float => Arc::new(
            data.downcast_ref::<Float64Array>()?
                .iter()
                .map(|v| v.or(Some(median)))
                .collect::<Float64Array>(),
        ),
        ColumnType::Utf8 => return None,
    };

    debug!(column = column.name(), fill = median, "Filling missing values with the median");

    Some(filled)
}

/// Fills the missing cells of `table`. Categorical and string columns get
/// [`MISSING_PLACEHOLDER`], turning numeric categorical columns into string
/// columns. Continuous columns get the median of their present values,
/// truncated for integer columns. Returns the number of filled cells.
pub fn replace_missing_values(table: &mut Table, categorical: &[&str]) -> Result<usize, DataError> {
    for name in categorical {
        table.column_index(name)?;
    }

    let mut filled = 0;
    for index in 0..table.num_columns() {
        let column = table.column(index);
        let missing = column.data().null_count();

        if missing == 0 {
            continue;
        }

        let is_categorical = categorical.contains(&column.name());

        let data = if is_categorical || column.column_type() == ColumnType::Utf8 {
            debug!(column = column.name(), cells = missing, "Filling missing values with placeholder");
            fill_with_placeholder(column)
        } else {
            match fill_with_median(column) {
                Some(data) => data,
                None => continue,
            }
        };

        table.replace_column(index, data)?;
        filled += missing;
    }

    Ok(filled)
}
