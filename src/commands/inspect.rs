use crate::{
    config::{
        ApplicationConfig, ColumnConfiguration, NumericAggregationRef, PrivacyModelRef,
        SensitiveConfig, StringAggregationRef,
    },
    io::read_csv_file,
};
use anyhow::Result;
use clap::ArgMatches;
use std::path::Path;
use tabcloak_anonymization::analysis::{combinations_unique_percentage, unique_percentage};
use tabcloak_core::{ColumnType, Table};
use tracing::info;

const DEFAULT_K: usize = 3;

/// A starting point for a configuration file: every numeric column is a
/// continuous quasi identifier, every other one a categorical quasi
/// identifier.
fn config_template(table: &Table, sensitive: &str) -> Result<ApplicationConfig> {
    let sensitive_column = table.column_by_name(sensitive)?;

    let columns = table
        .columns()
        .filter(|column| column.name() != sensitive)
        .map(|column| ColumnConfiguration::QuasiIdentifier {
            name: column.name().to_string(),
            categorical: column.column_type() == ColumnType::Utf8,
            numeric_aggregation: NumericAggregationRef::default(),
            string_aggregation: StringAggregationRef::default(),
        })
        .collect();

    Ok(ApplicationConfig {
        fill_missing: false,
        max_partitions: None,
        sensitive: SensitiveConfig {
            name: sensitive.to_string(),
            categorical: sensitive_column.column_type() == ColumnType::Utf8,
        },
        privacy: PrivacyModelRef::KAnonymity { k: DEFAULT_K },
        columns,
    })
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let input = Path::new(
        matches
            .value_of("input")
            .ok_or_else(|| anyhow::anyhow!("Missing value for 'input' argument"))?,
    );
    let table = read_csv_file(input)?;

    println!("rows: {}", table.num_rows());
    println!();
    println!("unique values per column:");
    for (column, percentage) in unique_percentage(&table) {
        println!("  {:<30} {:>6.2}%", column, percentage);
    }

    if let Some(columns) = matches.value_of("columns") {
        let columns: Vec<&str> = columns.split(',').map(str::trim).collect();

        println!();
        println!("unique value combinations:");
        for (combination, percentage) in combinations_unique_percentage(&table, &columns)? {
            println!("  {:<30} {:>6.2}%", combination, percentage);
        }
    }

    if let Some(path) = matches.value_of("write-config") {
        let sensitive = matches
            .value_of("sensitive")
            .ok_or_else(|| anyhow::anyhow!("Missing value for 'sensitive' argument"))?;

        let template = config_template(&table, sensitive)?;
        std::fs::write(path, toml::to_string(&template)?)?;
        info!(path = path, "Wrote configuration template");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcloak_core::Column;

    #[test]
    fn template_marks_string_columns_categorical() {
        let table = Table::new(vec![
            Column::int("age", vec![20]),
            Column::utf8("city", &["Paris"]),
            Column::utf8("diagnosis", &["flu"]),
        ])
        .unwrap();

        let template = config_template(&table, "diagnosis").unwrap();

        assert!(template.sensitive.categorical);
        assert_eq!(template.categorical_columns(), vec!["city", "diagnosis"]);
        assert_eq!(template.columns.len(), 2);
    }

    #[test]
    fn template_requires_known_sensitive_column() {
        let table = Table::new(vec![Column::int("age", vec![20])]).unwrap();

        assert!(config_template(&table, "diagnosis").is_err());
    }
}
