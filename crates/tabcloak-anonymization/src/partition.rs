use arrow::array::UInt32Array;

/// A set of row indices into a table. Partitions are never modified after
/// creation, splitting one produces two new partitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition(Vec<u32>);

impl Partition {
    pub fn new(rows: Vec<u32>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_rows(self) -> Vec<u32> {
        self.0
    }

    /// The rows as an index array for `arrow::compute::take`.
    pub fn indices(&self) -> UInt32Array {
        UInt32Array::from(self.0.clone())
    }
}

impl From<Vec<u32>> for Partition {
    fn from(rows: Vec<u32>) -> Self {
        Self(rows)
    }
}
