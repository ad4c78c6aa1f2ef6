use crate::{
    error::Result,
    spans::get_spans,
    split::split,
    Dataset, Partition,
};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Recursively splits the table into partitions that each satisfy `is_valid`.
///
/// Partitions are processed first in, first out. For every partition the
/// feature columns are tried in order of decreasing span, scaled by the
/// spans over the whole table; the first split whose halves are both non-empty
/// and valid is accepted. A partition for which no such split exists is finished.
pub fn partition_dataset(
    dataset: &Dataset,
    is_valid: &dyn Fn(&Partition) -> bool,
) -> Result<Vec<Partition>> {
    let table = dataset.table();
    let feature_columns = dataset.feature_columns();

    if table.num_rows() == 0 {
        warn!("Table is empty, nothing to partition");
        return Ok(vec![]);
    }

    let mut partitions: VecDeque<Partition> = vec![Partition::new(table.row_indices())].into();

    let overall_spans = get_spans(dataset, &partitions[0], feature_columns, None)?;

    for (column, span) in feature_columns.iter().zip(&overall_spans) {
        if *span == 0.0 {
            warn!(
                column = dataset.column_name(*column),
                "Quasi identifier has no spread and can not be split"
            );
        }
    }

    let mut finished_partitions = vec![];
    while let Some(partition) = partitions.pop_front() {
        let spans = get_spans(
            dataset,
            &partition,
            feature_columns,
            Some(overall_spans.as_slice()),
        )?;

        let mut column_span_vec: Vec<(usize, f64)> =
            feature_columns.iter().copied().zip(spans).collect();

        // Stable, so equal spans keep the order of the feature columns
        column_span_vec.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        let mut did_split = false;
        for (column, _) in column_span_vec {
            let (lp, rp) = split(dataset, &partition, column)?;

            if lp.is_empty() || rp.is_empty() {
                continue;
            }

            if !is_valid(&lp) || !is_valid(&rp) {
                continue;
            }

            debug!(
                column = dataset.column_name(column),
                left = lp.len(),
                right = rp.len(),
                "Split partition"
            );

            partitions.push_back(lp);
            partitions.push_back(rp);

            did_split = true;
            break;
        }

        if !did_split {
            debug!(rows = partition.len(), "Finished partition");
            finished_partitions.push(partition);
        }
    }

    info!(
        partitions = finished_partitions.len(),
        rows = table.num_rows(),
        "Partitioned dataset"
    );

    Ok(finished_partitions)
}
