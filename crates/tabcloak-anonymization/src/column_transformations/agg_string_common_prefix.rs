use super::ColumnTransformation;
use crate::error::Result;
use arrow::array::{ArrayRef, StringArray};
use std::sync::Arc;
use tabcloak_core::{array_value, Value};

pub fn longest_common_prefix<'a>(strings: &[&'a str]) -> &'a str {
    let first = match strings.first() {
        Some(first) => *first,
        None => return "",
    };

    let mut len = first.len();
    for other in &strings[1..] {
        len = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((index, a), b)| *index < len && a == b)
            .last()
            .map_or(0, |((index, a), _)| index + a.len_utf8());
    }

    &first[..len]
}

/// Replaces the values of a partition by their longest common prefix
/// followed by `*`.
pub struct AggStringCommonPrefix;

impl ColumnTransformation for AggStringCommonPrefix {
    fn transform_data(&self, data: ArrayRef) -> Result<ArrayRef> {
        let strings: Vec<String> = (0..data.len())
            .map(|row| match array_value(data.as_ref(), row) {
                Value::Missing => String::new(),
                value => value.to_string(),
            })
            .collect();
        let strings: Vec<&str> = strings.iter().map(String::as_str).collect();

        let prefix = format!("{}*", longest_common_prefix(&strings));

        Ok(Arc::new(StringArray::from(vec![prefix.as_str(); data.len()])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_aggregation() {
        let data: ArrayRef = Arc::new(StringArray::from(vec!["Berlin", "Berlin", "Bern", "Bergen"]));

        let output = AggStringCommonPrefix.transform_data(data).unwrap();

        assert_eq!(
            output
                .as_any()
                .downcast_ref::<StringArray>()
                .unwrap()
                .iter()
                .collect::<Vec<Option<&str>>>(),
            vec![Some("Ber*"); 4]
        );
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        assert_eq!(longest_common_prefix(&["Müller", "Münster"]), "Mü");
        assert_eq!(longest_common_prefix(&["Ärzte", "Äbte"]), "Ä");
        assert_eq!(longest_common_prefix(&["Paris", "Lyon"]), "");
        assert_eq!(longest_common_prefix(&["Paris"]), "Paris");
        assert_eq!(longest_common_prefix(&[]), "");
    }
}
