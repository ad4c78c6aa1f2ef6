use crate::{
    error::{ConfigurationError, DomainError, Result},
    Dataset, Partition,
};
use itertools::Itertools;
use std::collections::HashMap;
use tabcloak_core::{Table, Value};

pub fn is_k_anonymous(partition: &Partition, k: usize) -> bool {
    partition.len() >= k
}

/// Number of distinct values of `column` within `partition`.
pub fn diversity(table: &Table, partition: &Partition, column: usize) -> usize {
    partition
        .rows()
        .iter()
        .map(|row| table.value(*row as usize, column))
        .unique()
        .count()
}

pub fn is_l_diverse(table: &Table, partition: &Partition, sensitive_column: usize, l: usize) -> bool {
    diversity(table, partition, sensitive_column) >= l
}

/// Share of every distinct value of a column over the whole table.
#[derive(Debug, Clone)]
pub struct GlobalFrequencies<'a> {
    frequencies: HashMap<Value<'a>, f64>,
}

impl<'a> GlobalFrequencies<'a> {
    pub fn new(table: &'a Table, column: usize) -> Self {
        let total_count = table.num_rows() as f64;

        let frequencies = (0..table.num_rows())
            .map(|row| table.value(row, column))
            .counts()
            .into_iter()
            .map(|(value, count)| (value, count as f64 / total_count))
            .collect();

        Self { frequencies }
    }

    pub fn get(&self, value: &Value) -> f64 {
        self.frequencies.get(value).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// The largest absolute difference between the share of a value within
/// `partition` and its share over the whole table. `None` for an empty
/// partition.
pub fn t_closeness(
    table: &Table,
    partition: &Partition,
    column: usize,
    global_frequencies: &GlobalFrequencies,
) -> Option<f64> {
    let total_count = partition.len() as f64;

    partition
        .rows()
        .iter()
        .map(|row| table.value(*row as usize, column))
        .counts()
        .into_iter()
        .map(|(value, count)| (count as f64 / total_count - global_frequencies.get(&value)).abs())
        .max_by(|a, b| a.total_cmp(b))
}

/// Fails for a continuous sensitive column, t-closeness is only defined over
/// categorical values here.
pub fn is_t_close(
    dataset: &Dataset,
    partition: &Partition,
    global_frequencies: &GlobalFrequencies,
    p: f64,
) -> Result<bool> {
    let sensitive_column = dataset.sensitive_column();
    ensure_categorical_sensitive_column(dataset)?;

    Ok(
        t_closeness(dataset.table(), partition, sensitive_column, global_frequencies)
            .map_or(false, |score| score <= p),
    )
}

fn ensure_categorical_sensitive_column(dataset: &Dataset) -> Result<(), DomainError> {
    let sensitive_column = dataset.sensitive_column();

    if !dataset.is_categorical(sensitive_column) {
        return Err(DomainError::NonCategoricalSensitiveColumn {
            column: dataset.column_name(sensitive_column).to_string(),
        });
    }

    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnonymizationCriteria {
    KAnonymous { k: usize },
    LDiverse { l: usize },
    TClose { p: f64 },
}

impl AnonymizationCriteria {
    fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::KAnonymous { k } if *k == 0 => Err(ConfigurationError::InvalidK),
            Self::LDiverse { l } if *l == 0 => Err(ConfigurationError::InvalidL),
            Self::TClose { p } if !(0.0..=1.0).contains(p) => Err(ConfigurationError::InvalidP(*p)),
            _ => Ok(()),
        }
    }
}

/// The privacy guarantee a run has to achieve. Every model includes
/// k-anonymity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrivacyModel {
    KAnonymity { k: usize },
    LDiversity { k: usize, l: usize },
    TCloseness { k: usize, p: f64 },
}

impl PrivacyModel {
    pub fn criteria(&self) -> Vec<AnonymizationCriteria> {
        match *self {
            Self::KAnonymity { k } => vec![AnonymizationCriteria::KAnonymous { k }],
            Self::LDiversity { k, l } => vec![
                AnonymizationCriteria::KAnonymous { k },
                AnonymizationCriteria::LDiverse { l },
            ],
            Self::TCloseness { k, p } => vec![
                AnonymizationCriteria::KAnonymous { k },
                AnonymizationCriteria::TClose { p },
            ],
        }
    }
}

/// Checks partitions against a conjunction of criteria. All inputs that are
/// shared across a run (the global frequency table in particular) are
/// computed once on construction.
#[derive(Debug)]
pub struct Validator<'a> {
    table: &'a Table,
    sensitive_column: usize,
    criteria: Vec<AnonymizationCriteria>,
    global_frequencies: Option<GlobalFrequencies<'a>>,
}

impl<'a> Validator<'a> {
    pub fn new(dataset: &Dataset<'a>, model: &PrivacyModel) -> Result<Self> {
        Self::with_criteria(dataset, model.criteria())
    }

    pub fn with_criteria(dataset: &Dataset<'a>, criteria: Vec<AnonymizationCriteria>) -> Result<Self> {
        if criteria.is_empty() {
            return Err(ConfigurationError::NoCriteria.into());
        }

        for criterium in &criteria {
            criterium.validate()?;
        }

        let needs_frequencies = criteria
            .iter()
            .any(|criterium| matches!(criterium, AnonymizationCriteria::TClose { .. }));

        let global_frequencies = if needs_frequencies {
            ensure_categorical_sensitive_column(dataset)?;
            Some(GlobalFrequencies::new(
                dataset.table(),
                dataset.sensitive_column(),
            ))
        } else {
            None
        };

        Ok(Self {
            table: dataset.table(),
            sensitive_column: dataset.sensitive_column(),
            criteria,
            global_frequencies,
        })
    }

    pub fn criteria(&self) -> &[AnonymizationCriteria] {
        &self.criteria
    }

    fn satisfies(&self, criterium: &AnonymizationCriteria, partition: &Partition) -> bool {
        match criterium {
            AnonymizationCriteria::KAnonymous { k } => is_k_anonymous(partition, *k),
            AnonymizationCriteria::LDiverse { l } => {
                is_l_diverse(self.table, partition, self.sensitive_column, *l)
            }
            AnonymizationCriteria::TClose { p } => match &self.global_frequencies {
                Some(global_frequencies) => {
                    t_closeness(self.table, partition, self.sensitive_column, global_frequencies)
                        .map_or(false, |score| score <= *p)
                }
                None => false,
            },
        }
    }

    /// True if `partition` meets every criterium.
    pub fn is_valid(&self, partition: &Partition) -> bool {
        self.criteria
            .iter()
            .all(|criterium| self.satisfies(criterium, partition))
    }
}
