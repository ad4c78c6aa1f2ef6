pub mod data;
mod error;

pub use crate::data::{
    array_number, array_value, numeric_range, Column, ColumnRef, ColumnType, Table, Value,
};
pub use crate::error::DataError;
