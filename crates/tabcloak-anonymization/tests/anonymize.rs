use tabcloak_anonymization::{
    anonymize, diversity, partition_dataset, t_closeness, AnonymizationError,
    AnonymizationSettings, ConfigurationError, Dataset, DomainError, GlobalFrequencies, Partition,
    PrivacyModel, QuasiIdentifier, StringAggregation, Validator,
};
use arrow::array::Float64Array;
use std::sync::Arc;
use tabcloak_core::{Column, Table, Value};

fn ages() -> Table {
    Table::new(vec![
        Column::utf8("name", &["A", "A", "A", "B", "B", "B", "C", "C"]),
        Column::int("age", vec![20, 21, 22, 40, 41, 42, 60, 61]),
    ])
    .unwrap()
}

fn patients() -> Table {
    Table::new(vec![
        Column::utf8(
            "email",
            &[
                "a@x", "b@x", "c@x", "d@x", "e@x", "f@x", "g@x", "h@x", "i@x", "j@x", "k@x", "l@x",
            ],
        ),
        Column::int(
            "age",
            vec![23, 27, 31, 35, 38, 44, 49, 52, 57, 63, 68, 71],
        ),
        Column::utf8(
            "city",
            &[
                "Paris", "Lyon", "Paris", "Nice", "Lyon", "Paris", "Nice", "Lyon", "Paris",
                "Nice", "Lyon", "Paris",
            ],
        ),
        Column::utf8(
            "diagnosis",
            &[
                "flu", "cold", "flu", "cold", "asthma", "flu", "cold", "asthma", "flu", "cold",
                "asthma", "flu",
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn median_splits_stop_once_k_would_break() {
    let table = ages();
    let dataset = Dataset::new(&table, &["age"], &["name"], "name").unwrap();
    let validator = Validator::new(&dataset, &PrivacyModel::KAnonymity { k: 3 }).unwrap();

    let partitions = partition_dataset(&dataset, &|p| validator.is_valid(p)).unwrap();

    assert_eq!(
        partitions,
        vec![Partition::new(vec![0, 1, 2, 3]), Partition::new(vec![4, 5, 6, 7])]
    );
    assert!(partitions.iter().all(|p| p.len() >= 3));
}

#[test]
fn t_closeness_of_single_valued_partition() {
    let table = ages().take(&[0, 1, 3, 4]).unwrap();
    let dataset = Dataset::new(&table, &["age"], &["name"], "name").unwrap();
    let frequencies = GlobalFrequencies::new(&table, 0);
    let only_a = Partition::new(vec![0, 1]);

    assert_eq!(frequencies.get(&Value::Str("A")), 0.5);
    assert_eq!(t_closeness(&table, &only_a, 0, &frequencies), Some(0.5));

    let strict = Validator::new(&dataset, &PrivacyModel::TCloseness { k: 1, p: 0.4 }).unwrap();
    let loose = Validator::new(&dataset, &PrivacyModel::TCloseness { k: 1, p: 0.5 }).unwrap();
    assert!(!strict.is_valid(&only_a));
    assert!(loose.is_valid(&only_a));
}

#[test]
fn categorical_join_and_truncated_mean() {
    let table = Table::new(vec![
        Column::utf8("diagnosis", &["flu", "cold", "flu"]),
        Column::utf8("city", &["Paris", "Paris", "Lyon"]),
        Column::int("age", vec![10, 11, 12]),
    ])
    .unwrap();
    let settings = AnonymizationSettings::new(
        &["city", "age"],
        &["diagnosis", "city"],
        "diagnosis",
        PrivacyModel::KAnonymity { k: 3 },
    );

    let anonymized = anonymize(&table, &settings).unwrap();

    for row in 0..3 {
        assert_eq!(anonymized.value(row, 1), Value::Str("Paris|Lyon"));
        assert_eq!(anonymized.value(row, 2), Value::Int(11));
    }
    assert_eq!(anonymized.column(0), table.column(0));
}

#[test]
fn l_diverse_partitions() {
    let table = patients();
    let dataset = Dataset::new(&table, &["age", "city"], &["city", "diagnosis"], "diagnosis").unwrap();
    let validator = Validator::new(&dataset, &PrivacyModel::LDiversity { k: 2, l: 2 }).unwrap();

    let partitions = partition_dataset(&dataset, &|p| validator.is_valid(p)).unwrap();

    assert!(partitions.len() > 1);
    for partition in &partitions {
        assert!(partition.len() >= 2);
        assert!(diversity(&table, partition, 3) >= 2);
    }
}

#[test]
fn t_close_partitions() {
    let table = patients();
    let dataset = Dataset::new(&table, &["age", "city"], &["city", "diagnosis"], "diagnosis").unwrap();
    let frequencies = GlobalFrequencies::new(&table, 3);
    let validator = Validator::new(&dataset, &PrivacyModel::TCloseness { k: 2, p: 0.3 }).unwrap();

    let partitions = partition_dataset(&dataset, &|p| validator.is_valid(p)).unwrap();

    for partition in &partitions {
        let score = t_closeness(&table, partition, 3, &frequencies).unwrap();
        assert!(score <= 0.3, "score {} above threshold", score);
    }
}

#[test]
fn full_settings_run() {
    let table = patients();
    let settings = AnonymizationSettings {
        quasi_identifiers: vec![
            QuasiIdentifier::new("age"),
            QuasiIdentifier {
                string_aggregation: StringAggregation::CommonPrefix,
                ..QuasiIdentifier::new("city")
            },
        ],
        categorical_columns: vec!["city".to_string(), "diagnosis".to_string()],
        sensitive_column: "diagnosis".to_string(),
        identifier_columns: vec!["email".to_string()],
        model: PrivacyModel::KAnonymity { k: 4 },
        max_partitions: None,
    };

    let anonymized = anonymize(&table, &settings).unwrap();

    assert_eq!(anonymized.num_rows(), table.num_rows());
    assert_eq!(anonymized.column_names(), table.column_names());
    assert_eq!(anonymized.column(3), table.column(3));
    for row in 0..table.num_rows() {
        assert_ne!(anonymized.value(row, 0), table.value(row, 0));
        match anonymized.value(row, 2) {
            Value::Str(city) => assert!(city.ends_with('*')),
            other => panic!("unexpected city {:?}", other),
        }
    }
}

#[test]
fn partition_limit_drops_rows() {
    let table = patients();
    let mut settings = AnonymizationSettings::new(
        &["age"],
        &["diagnosis"],
        "diagnosis",
        PrivacyModel::KAnonymity { k: 3 },
    );
    settings.max_partitions = Some(0);

    let anonymized = anonymize(&table, &settings).unwrap();

    // 12 rows split into four partitions of three, only the first is kept
    assert_eq!(anonymized.num_rows(), 3);
}

#[test]
fn sensitive_column_must_not_be_generalized() {
    let table = ages();
    let settings = AnonymizationSettings::new(
        &["age", "name"],
        &["name"],
        "name",
        PrivacyModel::KAnonymity { k: 2 },
    );

    assert!(matches!(
        anonymize(&table, &settings),
        Err(AnonymizationError::Configuration(
            ConfigurationError::SensitiveColumnIsFeature(name)
        )) if name == "name"
    ));
}

#[test]
fn t_closeness_needs_categorical_sensitive_column() {
    let table = Table::new(vec![
        Column::utf8("city", &["Paris", "Lyon"]),
        Column::new("income", Arc::new(Float64Array::from(vec![Some(10.0), Some(20.0)]))),
    ])
    .unwrap();
    let settings = AnonymizationSettings::new(
        &["city"],
        &["city"],
        "income",
        PrivacyModel::TCloseness { k: 1, p: 0.2 },
    );

    assert!(matches!(
        anonymize(&table, &settings),
        Err(AnonymizationError::Domain(
            DomainError::NonCategoricalSensitiveColumn { column }
        )) if column == "income"
    ));
}

#[test]
fn k_above_row_count_returns_one_partition() {
    let table = ages();
    let settings = AnonymizationSettings::new(
        &["age"],
        &["name"],
        "name",
        PrivacyModel::KAnonymity { k: 20 },
    );

    let anonymized = anonymize(&table, &settings).unwrap();

    // (20 + 21 + 22 + 40 + 41 + 42 + 60 + 61) / 8 = 38.375
    for row in 0..8 {
        assert_eq!(anonymized.value(row, 1), Value::Int(38));
    }
}
