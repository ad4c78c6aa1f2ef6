use super::{arrow::normalize, Value};
use crate::DataError;
use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array, StringArray, UInt32Array},
    compute,
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use std::{collections::HashSet, sync::Arc};

/// The three representations every table column is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Utf8,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnType::Int => DataType::Int64,
            ColumnType::Float => DataType::Float64,
            ColumnType::Utf8 => DataType::Utf8,
        }
    }

    pub fn of(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Int64 => Some(ColumnType::Int),
            DataType::Float64 => Some(ColumnType::Float),
            DataType::Utf8 => Some(ColumnType::Utf8),
            _ => None,
        }
    }
}

/// The value at `row` of an `Int64`, `Float64` or `Utf8` array. Any other
/// array type reads as missing.
pub fn array_value(array: &dyn Array, row: usize) -> Value<'_> {
    if array.is_null(row) {
        return Value::Missing;
    }

    let any = array.as_any();
    if let Some(array) = any.downcast_ref::<Int64Array>() {
        return Value::Int(array.value(row));
    }
    if let Some(array) = any.downcast_ref::<Float64Array>() {
        return Value::Float(array.value(row));
    }
    if let Some(array) = any.downcast_ref::<StringArray>() {
        return Value::Str(array.value(row));
    }

    Value::Missing
}

/// The numeric value at `row`, `None` for missing cells and string arrays.
pub fn array_number(array: &dyn Array, row: usize) -> Option<f64> {
    array_value(array, row).as_f64()
}

/// Smallest and largest present value of an `Int64` or `Float64` array.
pub fn numeric_range(array: &dyn Array) -> Option<(f64, f64)> {
    let any = array.as_any();

    if let Some(array) = any.downcast_ref::<Int64Array>() {
        return compute::min(array)
            .zip(compute::max(array))
            .map(|(min, max)| (min as f64, max as f64));
    }
    if let Some(array) = any.downcast_ref::<Float64Array>() {
        return compute::min(array).zip(compute::max(array));
    }

    None
}

/// A named array, the unit tables are built from.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data: ArrayRef,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ArrayRef) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, Arc::new(Int64Array::from(values)))
    }

    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, Arc::new(Float64Array::from(values)))
    }

    pub fn utf8(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, Arc::new(StringArray::from(values.to_vec())))
    }
}

/// A column borrowed from a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRef<'a> {
    field: &'a Field,
    data: &'a ArrayRef,
    column_type: ColumnType,
}

impl<'a> ColumnRef<'a> {
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    pub fn data(&self) -> &'a ArrayRef {
        self.data
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn value(&self, row: usize) -> Value<'a> {
        array_value(self.data.as_ref(), row)
    }

    pub fn number(&self, row: usize) -> Option<f64> {
        array_number(self.data.as_ref(), row)
    }
}

/// Arrow arrays sharing one schema. Every column is normalized to `Int64`,
/// `Float64` or `Utf8` on construction and rows are addressed by their `u32`
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
    column_types: Vec<ColumnType>,
    num_rows: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            schema: Arc::new(Schema::empty()),
            columns: vec![],
            column_types: vec![],
            num_rows: 0,
        }
    }
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, DataError> {
        let num_rows = columns.first().map_or(0, |column| column.data.len());

        let mut names = HashSet::new();
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        let mut column_types = Vec::with_capacity(columns.len());

        for column in columns {
            if !names.insert(column.name.clone()) {
                return Err(DataError::DuplicateColumn(column.name));
            }

            if column.data.len() != num_rows {
                return Err(DataError::LengthMismatch {
                    column: column.name,
                    expected: num_rows,
                    actual: column.data.len(),
                });
            }

            let (data, column_type) = normalize(&column.name, &column.data)?;

            fields.push(Field::new(&column.name, column_type.data_type(), true));
            arrays.push(data);
            column_types.push(column_type);
        }

        Ok(Self {
            schema: Arc::new(Schema::new(fields)),
            columns: arrays,
            column_types,
            num_rows,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn column(&self, index: usize) -> ColumnRef<'_> {
        ColumnRef {
            field: self.schema.field(index),
            data: &self.columns[index],
            column_type: self.column_types[index],
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = ColumnRef<'_>> + '_ {
        (0..self.num_columns()).map(move |index| self.column(index))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns().map(|column| column.name()).collect()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.schema
            .fields()
            .iter()
            .position(|field| field.name() == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    pub fn column_by_name(&self, name: &str) -> Result<ColumnRef<'_>, DataError> {
        self.column_index(name).map(|index| self.column(index))
    }

    pub fn value(&self, row: usize, column: usize) -> Value<'_> {
        array_value(self.columns[column].as_ref(), row)
    }

    /// Indices of every row, in order.
    pub fn row_indices(&self) -> Vec<u32> {
        (0..self.num_rows).map(|i| i as u32).collect()
    }

    /// Replaces the data of a column, keeping its name. The type of the
    /// column follows the new data.
    pub fn replace_column(&mut self, index: usize, data: ArrayRef) -> Result<(), DataError> {
        let name = self.schema.field(index).name().clone();

        if data.len() != self.num_rows {
            return Err(DataError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }

        let (data, column_type) = normalize(&name, &data)?;

        let mut fields = self.schema.fields().clone();
        fields[index] = Field::new(&name, column_type.data_type(), true);

        self.schema = Arc::new(Schema::new(fields));
        self.columns[index] = data;
        self.column_types[index] = column_type;

        Ok(())
    }

    /// A new table holding only `rows`, in the given order.
    pub fn take(&self, rows: &[u32]) -> Result<Table, DataError> {
        let indices = UInt32Array::from(rows.to_vec());

        let columns = self
            .columns
            .iter()
            .map(|column| compute::take(column.as_ref(), &indices, None))
            .collect::<Result<Vec<ArrayRef>, _>>()?;

        Ok(Table {
            schema: self.schema.clone(),
            columns,
            column_types: self.column_types.clone(),
            num_rows: rows.len(),
        })
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, DataError> {
        Ok(RecordBatch::try_new(self.schema.clone(), self.columns.clone())?)
    }
}
