mod commands;
mod config;
mod io;

use anyhow::Result;
use clap::{Arg, Command};
use std::str::FromStr;
use tracing::{subscriber::set_global_default, Level};

fn main() -> Result<()> {
    let matches = Command::new("tabcloak")
        .version("0.1.0")
        .about("Anonymizes tabular data with k-anonymity, l-diversity or t-closeness")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .takes_value(true)
                .default_value("INFO")
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("anonymize")
                .about("Anonymizes a CSV file")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .takes_value(true)
                        .default_value("./tabcloak.toml")
                        .help("Path to the config file to use"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .takes_value(true)
                        .help("Where to write the anonymized CSV, defaults to stdout"),
                )
                .arg(Arg::new("input").required(true).help("CSV file to anonymize")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Prints how identifying the columns of a CSV file are")
                .arg(
                    Arg::new("columns")
                        .long("columns")
                        .takes_value(true)
                        .help("Comma separated columns whose combinations are analyzed"),
                )
                .arg(
                    Arg::new("write-config")
                        .long("write-config")
                        .takes_value(true)
                        .requires("sensitive")
                        .help("Writes a configuration template to the given path"),
                )
                .arg(
                    Arg::new("sensitive")
                        .long("sensitive")
                        .takes_value(true)
                        .help("Sensitive column of the configuration template"),
                )
                .arg(Arg::new("input").required(true).help("CSV file to inspect")),
        )
        .get_matches();

    let tracing_level = Level::from_str(matches.value_of("verbosity").unwrap_or("INFO"))?;

    let collector = tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(std::io::stderr)
        .finish();

    set_global_default(collector)?;

    match matches.subcommand() {
        Some(("anonymize", matches)) => commands::anonymize::execute(matches),
        Some(("inspect", matches)) => commands::inspect::execute(matches),
        Some((name, _)) => Err(anyhow::anyhow!("Unknown subcommand: {}", name)),
        None => Err(anyhow::anyhow!("Missing subcommand")),
    }
}
