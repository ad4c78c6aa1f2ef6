use crate::{
    column_transformations::{ColumnTransformation, Randomize},
    dataset::{ColumnKind, ColumnRole},
    error::Result,
    Dataset, Partition,
};
use arrow::{
    array::{Array, ArrayRef, UInt32Array},
    compute,
};
use tabcloak_core::{Column, Table};
use tracing::{info, warn};

fn transformation_for(dataset: &Dataset, column: usize) -> Option<Box<dyn ColumnTransformation>> {
    match dataset.role(column) {
        ColumnRole::QuasiIdentifier {
            numeric_aggregation,
            string_aggregation,
        } => Some(match dataset.kind(column) {
            ColumnKind::Categorical => string_aggregation.transformation(),
            ColumnKind::Continuous => numeric_aggregation.transformation(),
        }),
        ColumnRole::Identifier => Some(Box::new(Randomize)),
        ColumnRole::Sensitive | ColumnRole::PassThrough => None,
    }
}

/// Builds the anonymized table from the finished partitions.
///
/// Quasi identifiers are generalized per partition, identifiers are
/// randomized, every other column is copied row by row. With
/// `max_partitions` set, partitions past index `max_partitions` are not
/// emitted and their rows are left out of the result. Rows keep their
/// original order.
pub fn build_anonymized_table(
    dataset: &Dataset,
    partitions: &[Partition],
    max_partitions: Option<usize>,
) -> Result<Table> {
    let table = dataset.table();

    let limit = max_partitions.map_or(partitions.len(), |max| max.saturating_add(1));
    let emitted = &partitions[..partitions.len().min(limit)];

    if emitted.len() < partitions.len() {
        warn!(
            emitted = emitted.len(),
            dropped = partitions.len() - emitted.len(),
            "Partition limit reached, remaining partitions are dropped"
        );
    }

    // Rows in partition order, and the permutation that restores table order
    let rows: Vec<u32> = emitted
        .iter()
        .flat_map(|partition| partition.rows().iter().copied())
        .collect();

    let mut order: Vec<u32> = (0..rows.len() as u32).collect();
    order.sort_by_key(|position| rows[*position as usize]);

    let sorted_rows = UInt32Array::from(
        order
            .iter()
            .map(|position| rows[*position as usize])
            .collect::<Vec<u32>>(),
    );
    let order = UInt32Array::from(order);

    // An empty group still yields a typed, empty output column
    let groups: Vec<UInt32Array> = match emitted {
        [] => vec![Partition::default().indices()],
        _ => emitted.iter().map(Partition::indices).collect(),
    };

    let mut columns = Vec::with_capacity(table.num_columns());
    for (index, column) in table.columns().enumerate() {
        let data = match transformation_for(dataset, index) {
            Some(transformation) => {
                let pieces = groups
                    .iter()
                    .map(|indices| {
                        let values = compute::take(column.data().as_ref(), indices, None)?;
                        transformation.transform_data(values)
                    })
                    .collect::<Result<Vec<ArrayRef>>>()?;

                let pieces: Vec<&dyn Array> = pieces.iter().map(|piece| piece.as_ref()).collect();
                let generalized = compute::concat(&pieces)?;

                compute::take(generalized.as_ref(), &order, None)?
            }
            None => compute::take(column.data().as_ref(), &sorted_rows, None)?,
        };

        columns.push(Column::new(column.name(), data));
    }

    let anonymized = Table::new(columns)?;

    info!(
        partitions = emitted.len(),
        rows = anonymized.num_rows(),
        "Built anonymized table"
    );

    Ok(anonymized)
}
