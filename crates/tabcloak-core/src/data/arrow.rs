use super::{Column, ColumnType, Table};
use crate::DataError;
use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, Float64Array, GenericStringArray, LargeStringArray,
        StringArray,
    },
    compute,
    datatypes::DataType,
    record_batch::RecordBatch,
};
use std::{convert::TryFrom, sync::Arc};

/// Brings an array into one of the representations a [`Table`] holds:
/// integers widen to `Int64`, floats to `Float64` with NaN read as missing,
/// and booleans and large strings become `Utf8`.
pub(crate) fn normalize(
    column: &str,
    array: &ArrayRef,
) -> Result<(ArrayRef, ColumnType), DataError> {
    match array.data_type() {
        DataType::Int64 => Ok((array.clone(), ColumnType::Int)),

        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => Ok((compute::cast(array, &DataType::Int64)?, ColumnType::Int)),

        DataType::UInt64 => {
            let cast = compute::cast(array, &DataType::Int64)?;
            if cast.null_count() != array.null_count() {
                return Err(DataError::ValueOutOfRange(column.to_string()));
            }
            Ok((cast, ColumnType::Int))
        }

        DataType::Float32 | DataType::Float64 => {
            let cast = compute::cast(array, &DataType::Float64)?;
            Ok((nan_to_null(&cast)?, ColumnType::Float))
        }

        DataType::Utf8 => Ok((array.clone(), ColumnType::Utf8)),
        DataType::LargeUtf8 => Ok((large_utf8_to_utf8(array)?, ColumnType::Utf8)),
        DataType::Boolean => Ok((boolean_to_utf8(array)?, ColumnType::Utf8)),

        other => Err(DataError::UnsupportedType(other.clone())),
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef) -> Result<&'a T, DataError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DataError::UnsupportedType(array.data_type().clone()))
}

fn nan_to_null(array: &ArrayRef) -> Result<ArrayRef, DataError> {
    let floats = downcast::<Float64Array>(array)?;

    if !floats.iter().flatten().any(f64::is_nan) {
        return Ok(array.clone());
    }

    Ok(Arc::new(
        floats
            .iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect::<Float64Array>(),
    ))
}

fn large_utf8_to_utf8(array: &ArrayRef) -> Result<ArrayRef, DataError> {
    Ok(Arc::new(
        downcast::<LargeStringArray>(array)?
            .iter()
            .collect::<StringArray>(),
    ))
}

fn boolean_to_utf8(array: &ArrayRef) -> Result<ArrayRef, DataError> {
    Ok(Arc::new(
        downcast::<BooleanArray>(array)?
            .iter()
            .map(|value| value.map(|v| v.to_string()))
            .collect::<GenericStringArray<i32>>(),
    ))
}

impl TryFrom<&RecordBatch> for Table {
    type Error = DataError;

    fn try_from(batch: &RecordBatch) -> Result<Self, Self::Error> {
        let schema = batch.schema();

        let columns = batch
            .columns()
            .iter()
            .zip(schema.fields())
            .map(|(array, field)| Column::new(field.name().as_str(), array.clone()))
            .collect();

        Table::new(columns)
    }
}

impl Table {
    /// Concatenates several batches sharing one schema, as produced by the
    /// arrow csv reader.
    pub fn try_from_batches(batches: &[RecordBatch]) -> Result<Self, DataError> {
        let first = match batches.first() {
            Some(batch) => batch,
            None => return Ok(Table::default()),
        };

        let schema = first.schema();

        let columns = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| -> Result<Column, DataError> {
                let parts = batches
                    .iter()
                    .map(|batch| batch.column(index).as_ref())
                    .collect::<Vec<&dyn Array>>();

                Ok(Column::new(field.name().as_str(), compute::concat(&parts)?))
            })
            .collect::<Result<Vec<Column>, DataError>>()?;

        Table::new(columns)
    }
}
