use crate::{
    error::{DomainError, Result},
    Dataset, Partition,
};
use arrow::compute;
use itertools::Itertools;
use tabcloak_core::numeric_range;

/// Spread of a single column over a partition: the number of distinct values
/// for categorical columns, `max - min` for continuous ones.
fn get_span(dataset: &Dataset, partition: &Partition, column: usize) -> Result<f64> {
    let data = dataset.table().column(column);

    if dataset.is_categorical(column) {
        let distinct = partition
            .rows()
            .iter()
            .map(|row| data.value(*row as usize))
            .unique()
            .count();
        return Ok(distinct as f64);
    }

    if !data.column_type().is_numeric() {
        return Err(DomainError::NonNumericColumn {
            column: dataset.column_name(column).to_string(),
        }
        .into());
    }

    if partition.is_empty() {
        return Err(DomainError::EmptyRange {
            column: dataset.column_name(column).to_string(),
        }
        .into());
    }

    let values = compute::take(data.data().as_ref(), &partition.indices(), None)?;

    // Nothing but missing values, there is no spread to speak of
    Ok(numeric_range(values.as_ref()).map_or(0.0, |(min, max)| max - min))
}

/// Computes the span of every column in `columns` over `partition`. When
/// `scale` is given (aligned with `columns`) each span is divided by it.
pub fn get_spans(
    dataset: &Dataset,
    partition: &Partition,
    columns: &[usize],
    scale: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let spans = columns
        .iter()
        .map(|column| get_span(dataset, partition, *column))
        .collect::<Result<Vec<f64>>>()?;

    Ok(match scale {
        Some(scale) => scale_spans(&spans, scale),
        None => spans,
    })
}

/// A zero scale is treated as one: a column without spread over the whole
/// table has no spread in any of its partitions either.
pub fn scale_spans(spans: &[f64], scale: &[f64]) -> Vec<f64> {
    spans
        .iter()
        .zip(scale)
        .map(|(value, scale)| if *scale > 0.0 { value / scale } else { *value })
        .collect()
}
