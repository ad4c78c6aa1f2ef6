use anyhow::Result;
use arrow::{csv, record_batch::RecordBatch};
use std::{
    fs::File,
    io::{Read, Seek, Write},
    path::Path,
};
use tabcloak_core::Table;
use tracing::debug;

const SCHEMA_INFERENCE_RECORDS: usize = 100;

pub fn read_csv<R: Read + Seek>(reader: R) -> Result<Table> {
    let reader = csv::ReaderBuilder::new()
        .has_header(true)
        .infer_schema(Some(SCHEMA_INFERENCE_RECORDS))
        .build(reader)?;

    let batches = reader.collect::<Result<Vec<RecordBatch>, _>>()?;
    let table = Table::try_from_batches(&batches)?;

    debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "Loaded table"
    );

    Ok(table)
}

pub fn read_csv_file(path: &Path) -> Result<Table> {
    read_csv(File::open(path)?)
}

pub fn write_csv<W: Write>(writer: W, table: &Table) -> Result<()> {
    let batch = table.to_record_batch()?;

    let mut writer = csv::Writer::new(writer);
    writer.write(&batch)?;

    Ok(())
}
