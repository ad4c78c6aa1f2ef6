mod aggregation;
pub mod analysis;
pub mod column_transformations;
mod criteria;
mod dataset;
mod error;
mod partition;
pub mod preprocessing;
mod scheduler;
mod spans;
mod split;

pub use crate::aggregation::build_anonymized_table;
pub use crate::column_transformations::{NumericAggregation, StringAggregation};
pub use crate::criteria::{
    diversity, is_k_anonymous, is_l_diverse, is_t_close, t_closeness, AnonymizationCriteria,
    GlobalFrequencies, PrivacyModel, Validator,
};
pub use crate::dataset::{ColumnKind, ColumnRole, Dataset};
pub use crate::error::{AnonymizationError, ConfigurationError, DomainError, Result};
pub use crate::partition::Partition;
pub use crate::scheduler::partition_dataset;
pub use crate::spans::{get_spans, scale_spans};
pub use crate::split::split;

use tabcloak_core::Table;
use tracing::{info, warn};

/// A column that is generalized during partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct QuasiIdentifier {
    pub name: String,
    pub numeric_aggregation: NumericAggregation,
    pub string_aggregation: StringAggregation,
}

impl QuasiIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric_aggregation: NumericAggregation::default(),
            string_aggregation: StringAggregation::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnonymizationSettings {
    pub quasi_identifiers: Vec<QuasiIdentifier>,
    pub categorical_columns: Vec<String>,
    pub sensitive_column: String,
    pub identifier_columns: Vec<String>,
    pub model: PrivacyModel,
    pub max_partitions: Option<usize>,
}

impl AnonymizationSettings {
    pub fn new(
        quasi_identifiers: &[&str],
        categorical_columns: &[&str],
        sensitive_column: &str,
        model: PrivacyModel,
    ) -> Self {
        Self {
            quasi_identifiers: quasi_identifiers
                .iter()
                .map(|name| QuasiIdentifier::new(*name))
                .collect(),
            categorical_columns: categorical_columns.iter().map(|c| c.to_string()).collect(),
            sensitive_column: sensitive_column.to_string(),
            identifier_columns: vec![],
            model,
            max_partitions: None,
        }
    }
}

/// Partitions `table` until no partition can be split without violating
/// the privacy model and generalizes the quasi identifiers of every
/// partition.
pub fn anonymize(table: &Table, settings: &AnonymizationSettings) -> Result<Table> {
    let dataset = Dataset::from_settings(table, settings)?;
    let validator = Validator::new(&dataset, &settings.model)?;

    let whole_table = Partition::new(table.row_indices());
    if !whole_table.is_empty() && !validator.is_valid(&whole_table) {
        warn!(
            model = ?settings.model,
            rows = table.num_rows(),
            "Table as a whole does not satisfy the privacy model"
        );
    }

    let partitions = partition_dataset(&dataset, &|partition| validator.is_valid(partition))?;
    let anonymized = build_anonymized_table(&dataset, &partitions, settings.max_partitions)?;

    info!(
        model = ?settings.model,
        partitions = partitions.len(),
        rows = anonymized.num_rows(),
        "Anonymized table"
    );

    Ok(anonymized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcloak_core::{Column, Value};

    #[test]
    fn anonymizes_with_defaults() {
        let table = Table::new(vec![
            Column::utf8("name", &["A", "A", "A", "B", "B", "B", "C", "C"]),
            Column::int("age", vec![20, 21, 22, 40, 41, 42, 60, 61]),
        ])
        .unwrap();
        let settings = AnonymizationSettings::new(
            &["age"],
            &["name"],
            "name",
            PrivacyModel::KAnonymity { k: 3 },
        );

        let anonymized = anonymize(&table, &settings).unwrap();

        assert_eq!(anonymized.num_rows(), 8);
        assert_eq!(anonymized.value(0, 1), Value::Int(25));
        assert_eq!(anonymized.value(7, 1), Value::Int(51));
        assert_eq!(anonymized.column(0), table.column(0));
    }
}
