use ::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabcloak_anonymization::{
    AnonymizationSettings, NumericAggregation, PrivacyModel, QuasiIdentifier, StringAggregation,
};

const DEFAULT_STRING_AGG: StringAggregationRef = StringAggregationRef::Join;
const DEFAULT_NUMERIC_AGG: NumericAggregationRef = NumericAggregationRef::Mean;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericAggregationRef {
    Mean,
    Range,
}

impl From<NumericAggregationRef> for NumericAggregation {
    fn from(def: NumericAggregationRef) -> NumericAggregation {
        match def {
            NumericAggregationRef::Mean => NumericAggregation::Mean,
            NumericAggregationRef::Range => NumericAggregation::Range,
        }
    }
}

impl Default for NumericAggregationRef {
    fn default() -> Self {
        DEFAULT_NUMERIC_AGG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringAggregationRef {
    Join,
    CommonPrefix,
}

impl From<StringAggregationRef> for StringAggregation {
    fn from(def: StringAggregationRef) -> StringAggregation {
        match def {
            StringAggregationRef::Join => StringAggregation::Join,
            StringAggregationRef::CommonPrefix => StringAggregation::CommonPrefix,
        }
    }
}

impl Default for StringAggregationRef {
    fn default() -> Self {
        DEFAULT_STRING_AGG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
#[serde(rename_all = "snake_case")]
pub enum PrivacyModelRef {
    KAnonymity { k: usize },
    LDiversity { k: usize, l: usize },
    TCloseness { k: usize, p: f64 },
}

impl From<PrivacyModelRef> for PrivacyModel {
    fn from(def: PrivacyModelRef) -> PrivacyModel {
        match def {
            PrivacyModelRef::KAnonymity { k } => PrivacyModel::KAnonymity { k },
            PrivacyModelRef::LDiversity { k, l } => PrivacyModel::LDiversity { k, l },
            PrivacyModelRef::TCloseness { k, p } => PrivacyModel::TCloseness { k, p },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ColumnConfiguration {
    Identifier {
        name: String,
    },
    QuasiIdentifier {
        name: String,
        #[serde(default)]
        categorical: bool,
        #[serde(default)]
        numeric_aggregation: NumericAggregationRef,
        #[serde(default)]
        string_aggregation: StringAggregationRef,
    },
}

fn default_categorical() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveConfig {
    pub name: String,
    #[serde(default = "default_categorical")]
    pub categorical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default)]
    pub fill_missing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_partitions: Option<usize>,
    pub sensitive: SensitiveConfig,
    pub privacy: PrivacyModelRef,
    pub columns: Vec<ColumnConfiguration>,
}

impl ApplicationConfig {
    pub fn categorical_columns(&self) -> Vec<String> {
        let mut categorical: Vec<String> = self
            .columns
            .iter()
            .filter_map(|column| match column {
                ColumnConfiguration::QuasiIdentifier {
                    name,
                    categorical: true,
                    ..
                } => Some(name.clone()),
                _ => None,
            })
            .collect();

        if self.sensitive.categorical {
            categorical.push(self.sensitive.name.clone());
        }

        categorical
    }

    pub fn settings(&self) -> AnonymizationSettings {
        let mut quasi_identifiers = vec![];
        let mut identifier_columns = vec![];

        for column in &self.columns {
            match column {
                ColumnConfiguration::Identifier { name } => identifier_columns.push(name.clone()),
                ColumnConfiguration::QuasiIdentifier {
                    name,
                    numeric_aggregation,
                    string_aggregation,
                    ..
                } => quasi_identifiers.push(QuasiIdentifier {
                    name: name.clone(),
                    numeric_aggregation: (*numeric_aggregation).into(),
                    string_aggregation: (*string_aggregation).into(),
                }),
            }
        }

        AnonymizationSettings {
            quasi_identifiers,
            categorical_columns: self.categorical_columns(),
            sensitive_column: self.sensitive.name.clone(),
            identifier_columns,
            model: self.privacy.into(),
            max_partitions: self.max_partitions,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ApplicationConfig, ConfigError> {
    let mut s = config::Config::default();
    s.merge(config::File::from(path))?;
    s.try_into()
}

pub fn parse_config(contents: &str) -> Result<ApplicationConfig, ConfigError> {
    let mut s = config::Config::default();
    s.merge(config::File::from_str(contents, config::FileFormat::Toml))?;
    s.try_into()
}
