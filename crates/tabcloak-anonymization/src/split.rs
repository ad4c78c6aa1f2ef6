use crate::{
    error::{DomainError, Result},
    Dataset, Partition,
};
use itertools::Itertools;
use std::collections::HashMap;

/// Median of `values`, the mean of the two middle values for even counts.
pub(crate) fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let middle = values.len() / 2;
    Some(match values.len() % 2 {
        0 => (values[middle - 1] + values[middle]) / 2.0,
        _ => values[middle],
    })
}

/// Divides `partition` in two along `column`.
///
/// Categorical columns are cut at the middle of their distinct values, taken
/// in order of first appearance within the partition. Continuous columns are
/// cut at the median: rows below it go left, the rest (including missing
/// values) go right. One side may come back empty, e.g. when all values are
/// equal.
pub fn split(dataset: &Dataset, partition: &Partition, column: usize) -> Result<(Partition, Partition)> {
    let data = dataset.table().column(column);

    if dataset.is_categorical(column) {
        let positions: HashMap<_, usize> = partition
            .rows()
            .iter()
            .map(|row| data.value(*row as usize))
            .unique()
            .enumerate()
            .map(|(position, value)| (value, position))
            .collect();

        let cut = positions.len() / 2;

        let (left, right): (Vec<u32>, Vec<u32>) = partition
            .rows()
            .iter()
            .partition(|row| positions[&data.value(**row as usize)] < cut);

        return Ok((left.into(), right.into()));
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

    let values: Vec<f64> = partition
        .rows()
        .iter()
        .filter_map(|row| data.number(*row as usize))
        .collect();

    let median = match median(values) {
        Some(median) => median,
        None => return Ok((Partition::default(), partition.clone())),
    };

    let (left, right): (Vec<u32>, Vec<u32>) = partition
        .rows()
        .iter()
        .partition(|row| matches!(data.number(**row as usize), Some(v) if v < median));

    Ok((left.into(), right.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnonymizationError;
    use arrow::array::Float64Array;
    use std::sync::Arc;
    use tabcloak_core::{Column, Table};

    fn table() -> Table {
        Table::new(vec![
            Column::utf8("name", &["A", "B", "C", "D", "E", "F"]),
            Column::int("age", vec![30, 10, 50, 20, 40, 60]),
            Column::utf8(
                "city",
                &["Paris", "Lyon", "Paris", "Nice", "Lyon", "Lille"],
            ),
            Column::new(
                "score",
                Arc::new(Float64Array::from(vec![
                    Some(1.0),
                    None,
                    Some(3.0),
                    Some(2.0),
                    None,
                    Some(4.0),
                ])),
            ),
            Column::int("constant", vec![7, 7, 7, 7, 7, 7]),
        ])
        .unwrap()
    }

    fn dataset(table: &Table) -> Dataset<'_> {
        Dataset::new(
            table,
            &["age", "city", "score", "constant"],
            &["name", "city"],
            "name",
        )
        .unwrap()
    }

    #[test]
    fn median_of_even_and_odd_counts() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(vec![]), None);
    }

    #[test]
    fn continuous_split_at_median() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(table.row_indices());

        let (left, right) = split(&dataset, &partition, 1).unwrap();

        // median of 10..60 is 35
        assert_eq!(left.rows(), &[0, 1, 3]);
        assert_eq!(right.rows(), &[2, 4, 5]);
    }

    #[test]
    fn categorical_split_by_first_appearance() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(table.row_indices());

        let (left, right) = split(&dataset, &partition, 2).unwrap();

        // Paris, Lyon | Nice, Lille
        assert_eq!(left.rows(), &[0, 1, 2, 4]);
        assert_eq!(right.rows(), &[3, 5]);
    }

    #[test]
    fn categorical_split_follows_partition_order() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(vec![3, 1, 0]);

        let (left, right) = split(&dataset, &partition, 2).unwrap();

        // Nice | Lyon, Paris
        assert_eq!(left.rows(), &[3]);
        assert_eq!(right.rows(), &[1, 0]);
    }

    #[test]
    fn missing_values_go_right() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(table.row_indices());

        let (left, right) = split(&dataset, &partition, 3).unwrap();

        // median of 1, 2, 3, 4 is 2.5
        assert_eq!(left.rows(), &[0, 3]);
        assert_eq!(right.rows(), &[1, 2, 4, 5]);
    }

    #[test]
    fn equal_values_leave_one_side_empty() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(table.row_indices());

        let (left, right) = split(&dataset, &partition, 4).unwrap();

        assert!(left.is_empty());
        assert_eq!(right.len(), 6);
    }

    #[test]
    fn single_categorical_value_leaves_left_empty() {
        let table = table();
        let dataset = dataset(&table);
        let partition = Partition::new(vec![0, 2]);

        let (left, right) = split(&dataset, &partition, 2).unwrap();

        assert!(left.is_empty());
        assert_eq!(right.rows(), &[0, 2]);
    }

    #[test]
    fn empty_partition_has_no_median() {
        let table = table();
        let dataset = dataset(&table);

        let result = split(&dataset, &Partition::default(), 1);

        assert!(matches!(
            result,
            Err(AnonymizationError::Domain(DomainError::EmptyRange { column })) if column == "age"
        ));
    }

    #[test]
    fn empty_partition_splits_categorical_into_empty_sides() {
        let table = table();
        let dataset = dataset(&table);

        let (left, right) = split(&dataset, &Partition::default(), 2).unwrap();

        assert!(left.is_empty());
        assert!(right.is_empty());
    }
}
