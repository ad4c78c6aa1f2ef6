mod arrow;
mod table;
mod value;

pub use table::{array_number, array_value, numeric_range, Column, ColumnRef, ColumnType, Table};
pub use value::Value;
