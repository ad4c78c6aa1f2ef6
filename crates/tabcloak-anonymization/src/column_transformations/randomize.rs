use super::ColumnTransformation;
use crate::error::Result;
use arrow::array::{Array, ArrayRef, StringArray};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use std::sync::Arc;

const TOKEN_LENGTH: usize = 30;

fn random_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Replaces every present value by a random alphanumeric token.
pub struct Randomize;

impl ColumnTransformation for Randomize {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef> {
        Ok(Arc::new(
            (0..data.len())
                .map(|row| (!data.is_null(row)).then(random_token))
                .collect::<StringArray>(),
        ))
    }
}
