use crate::{
    column_transformations::{NumericAggregation, StringAggregation},
    error::{ConfigurationError, DomainError, Result},
    AnonymizationSettings,
};
use std::collections::HashSet;
use tabcloak_core::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Continuous,
}

/// What happens to a column when the anonymized table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    QuasiIdentifier {
        numeric_aggregation: NumericAggregation,
        string_aggregation: StringAggregation,
    },
    Identifier,
    Sensitive,
    PassThrough,
}

/// A table together with the validated roles of its columns.
#[derive(Debug, Clone)]
pub struct Dataset<'a> {
    table: &'a Table,
    kinds: Vec<ColumnKind>,
    roles: Vec<ColumnRole>,
    feature_columns: Vec<usize>,
    sensitive_column: usize,
}

impl<'a> Dataset<'a> {
    pub fn new(
        table: &'a Table,
        feature_columns: &[&str],
        categorical_columns: &[&str],
        sensitive_column: &str,
    ) -> Result<Self> {
        let column_index = |name: &str| {
            table
                .column_index(name)
                .map_err(|_| ConfigurationError::UnknownColumn(name.to_string()))
        };

        let sensitive_column = column_index(sensitive_column)?;

        let mut kinds = vec![ColumnKind::Continuous; table.num_columns()];
        for name in categorical_columns {
            kinds[column_index(name)?] = ColumnKind::Categorical;
        }

        let mut roles = vec![ColumnRole::PassThrough; table.num_columns()];
        roles[sensitive_column] = ColumnRole::Sensitive;

        let mut features = Vec::with_capacity(feature_columns.len());
        let mut seen = HashSet::new();
        for name in feature_columns {
            let index = column_index(name)?;

            if index == sensitive_column {
                return Err(ConfigurationError::SensitiveColumnIsFeature(name.to_string()).into());
            }
            if !seen.insert(index) {
                return Err(ConfigurationError::DuplicateFeatureColumn(name.to_string()).into());
            }
            if kinds[index] == ColumnKind::Continuous && !table.column(index).column_type().is_numeric()
            {
                return Err(DomainError::NonNumericColumn {
                    column: name.to_string(),
                }
                .into());
            }

            roles[index] = ColumnRole::QuasiIdentifier {
                numeric_aggregation: NumericAggregation::default(),
                string_aggregation: StringAggregation::default(),
            };
            features.push(index);
        }

        Ok(Self {
            table,
            kinds,
            roles,
            feature_columns: features,
            sensitive_column,
        })
    }

    pub fn from_settings(table: &'a Table, settings: &AnonymizationSettings) -> Result<Self> {
        let feature_columns: Vec<&str> = settings
            .quasi_identifiers
            .iter()
            .map(|qi| qi.name.as_str())
            .collect();
        let categorical_columns: Vec<&str> = settings
            .categorical_columns
            .iter()
            .map(String::as_str)
            .collect();
        let identifier_columns: Vec<&str> = settings
            .identifier_columns
            .iter()
            .map(String::as_str)
            .collect();

        let mut dataset = Self::new(
            table,
            &feature_columns,
            &categorical_columns,
            &settings.sensitive_column,
        )?
        .with_identifier_columns(&identifier_columns)?;

        for qi in &settings.quasi_identifiers {
            dataset = dataset.with_aggregation(
                &qi.name,
                qi.numeric_aggregation,
                qi.string_aggregation,
            )?;
        }

        Ok(dataset)
    }

    /// Marks direct identifiers, which are replaced by random tokens.
    pub fn with_identifier_columns(mut self, identifier_columns: &[&str]) -> Result<Self> {
        for name in identifier_columns {
            let index = self
                .table
                .column_index(name)
                .map_err(|_| ConfigurationError::UnknownColumn(name.to_string()))?;

            if self.roles[index] != ColumnRole::PassThrough {
                return Err(ConfigurationError::IdentifierOverlap(name.to_string()).into());
            }
            self.roles[index] = ColumnRole::Identifier;
        }

        Ok(self)
    }

    pub fn with_aggregation(
        mut self,
        feature_column: &str,
        numeric_aggregation: NumericAggregation,
        string_aggregation: StringAggregation,
    ) -> Result<Self> {
        let index = self
            .feature_columns
            .iter()
            .copied()
            .find(|index| self.table.column(*index).name() == feature_column)
            .ok_or_else(|| ConfigurationError::UnknownColumn(feature_column.to_string()))?;

        self.roles[index] = ColumnRole::QuasiIdentifier {
            numeric_aggregation,
            string_aggregation,
        };

        Ok(self)
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn kind(&self, column: usize) -> ColumnKind {
        self.kinds[column]
    }

    pub fn is_categorical(&self, column: usize) -> bool {
        self.kinds[column] == ColumnKind::Categorical
    }

    pub fn role(&self, column: usize) -> ColumnRole {
        self.roles[column]
    }

    /// Feature columns as table column indices, in caller order.
    pub fn feature_columns(&self) -> &[usize] {
        &self.feature_columns
    }

    pub fn sensitive_column(&self) -> usize {
        self.sensitive_column
    }

    pub fn column_name(&self, column: usize) -> &'a str {
        self.table.column(column).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnonymizationError;
    use tabcloak_core::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::utf8("name", &["A", "B", "C"]),
            Column::int("age", vec![20, 30, 40]),
            Column::utf8("city", &["Paris", "Lyon", "Paris"]),
            Column::utf8("email", &["a@x", "b@x", "c@x"]),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_roles_and_kinds() {
        let table = table();
        let dataset = Dataset::new(&table, &["city", "age"], &["name", "city"], "name")
            .unwrap()
            .with_identifier_columns(&["email"])
            .unwrap();

        assert_eq!(dataset.feature_columns(), &[2, 1]);
        assert_eq!(dataset.sensitive_column(), 0);
        assert_eq!(dataset.kind(1), ColumnKind::Continuous);
        assert!(dataset.is_categorical(2));
        assert_eq!(dataset.role(0), ColumnRole::Sensitive);
        assert_eq!(dataset.role(3), ColumnRole::Identifier);
    }

    #[test]
    fn rejects_sensitive_feature_column() {
        let table = table();
        let result = Dataset::new(&table, &["age", "name"], &["name"], "name");

        assert!(matches!(
            result,
            Err(AnonymizationError::Configuration(
                ConfigurationError::SensitiveColumnIsFeature(_)
            ))
        ));
    }

    #[test]
    fn rejects_unknown_columns() {
        let table = table();
        let result = Dataset::new(&table, &["zip"], &["name"], "name");

        assert!(matches!(
            result,
            Err(AnonymizationError::Configuration(ConfigurationError::UnknownColumn(name))) if name == "zip"
        ));
    }

    #[test]
    fn rejects_non_numeric_continuous_column() {
        let table = table();
        let result = Dataset::new(&table, &["city"], &["name"], "name");

        assert!(matches!(
            result,
            Err(AnonymizationError::Domain(DomainError::NonNumericColumn { .. }))
        ));
    }

    #[test]
    fn rejects_identifier_overlapping_features() {
        let table = table();
        let result = Dataset::new(&table, &["age"], &["name"], "name")
            .unwrap()
            .with_identifier_columns(&["age"]);

        assert!(matches!(
            result,
            Err(AnonymizationError::Configuration(ConfigurationError::IdentifierOverlap(_)))
        ));
    }
}
