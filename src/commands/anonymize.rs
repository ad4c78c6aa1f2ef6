use crate::{
    config::load_config,
    io::{read_csv_file, write_csv},
};
use anyhow::Result;
use clap::ArgMatches;
use std::{fs::File, io::BufWriter, path::Path};
use tabcloak_anonymization::{anonymize, preprocessing::replace_missing_values};
use tracing::info;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config_file_path = Path::new(
        matches
            .value_of("config")
            .ok_or_else(|| anyhow::anyhow!("Missing value for 'config' argument"))?,
    );
    let config_file_path = std::env::current_dir()?.join(config_file_path);
    let config = load_config(&config_file_path)?;

    let input = Path::new(
        matches
            .value_of("input")
            .ok_or_else(|| anyhow::anyhow!("Missing value for 'input' argument"))?,
    );
    let mut table = read_csv_file(input)?;

    if config.fill_missing {
        let categorical = config.categorical_columns();
        let categorical: Vec<&str> = categorical.iter().map(String::as_str).collect();

        let filled = replace_missing_values(&mut table, &categorical)?;
        info!(cells = filled, "Filled missing values");
    }

    let anonymized = anonymize(&table, &config.settings())?;

    match matches.value_of("output") {
        Some(output) => {
            write_csv(BufWriter::new(File::create(output)?), &anonymized)?;
            info!(path = output, "Wrote anonymized table");
        }
        None => write_csv(std::io::stdout().lock(), &anonymized)?,
    }

    Ok(())
}
