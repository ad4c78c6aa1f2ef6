//! Estimates of how identifying the columns of a table are, based on the
//! share of distinct values (or value combinations) among all rows.

use itertools::Itertools;
use tabcloak_core::{DataError, Table};

fn unique_percentage_of(table: &Table, columns: &[usize]) -> f64 {
    if table.num_rows() == 0 {
        return 0.0;
    }

    let distinct = (0..table.num_rows())
        .map(|row| {
            columns
                .iter()
                .map(|column| table.value(row, *column))
                .collect::<Vec<_>>()
        })
        .unique()
        .count();

    100.0 * distinct as f64 / table.num_rows() as f64
}

/// Percentage of distinct values per column.
pub fn unique_percentage(table: &Table) -> Vec<(String, f64)> {
    table
        .columns()
        .enumerate()
        .map(|(index, column)| {
            (
                column.name().to_string(),
                unique_percentage_of(table, &[index]),
            )
        })
        .collect()
}

/// Percentage of distinct value tuples for every non-empty combination of
/// `columns`, smallest combinations first.
pub fn combinations_unique_percentage(
    table: &Table,
    columns: &[&str],
) -> Result<Vec<(String, f64)>, DataError> {
    let indices = columns
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<usize>, DataError>>()?;

    let mut result = vec![];
    for size in 1..=indices.len() {
        for combination in (0..indices.len()).combinations(size) {
            let name = combination.iter().map(|i| columns[*i]).join(", ");
            let combined: Vec<usize> = combination.iter().map(|i| indices[*i]).collect();

            result.push((name, unique_percentage_of(table, &combined)));
        }
    }

    Ok(result)
}
