//! YAML decoding for front matter and cell metadata blocks.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("metadata must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

/// Decodes a YAML block that must be a mapping.
///
/// An empty (or comment-only) block decodes to an empty mapping.
pub fn decode_mapping(yaml: &str) -> Result<Mapping, MetadataError> {
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(MetadataError::NotAMapping {
            found: kind_name(&other),
        }),
    }
}

/// Encodes a value as block YAML, always ending in a newline.
pub fn encode<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    let mut yaml = serde_yaml::to_string(value)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(yaml)
}

pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_block_is_empty_mapping() {
        assert!(decode_mapping("").unwrap().is_empty());
        assert!(decode_mapping("# only a comment").unwrap().is_empty());
    }

    #[test]
    fn mapping_keeps_key_order() {
        let mapping = decode_mapping("zeta: 1\nalpha: 2\nmid: 3").unwrap();

        let keys: Vec<_> = mapping.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[rstest]
    #[case("just a string", "string")]
    #[case("- a\n- b", "sequence")]
    #[case("42", "number")]
    #[case("true", "boolean")]
    fn rejects_non_mapping(#[case] yaml: &str, #[case] expected: &str) {
        match decode_mapping(yaml) {
            Err(MetadataError::NotAMapping { found }) => assert_eq!(found, expected),
            other => panic!("expected NotAMapping, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(matches!(
            decode_mapping("key: [unclosed"),
            Err(MetadataError::Yaml(_))
        ));
    }

    #[test]
    fn encode_ends_with_newline() {
        let mapping = decode_mapping("title: Demo").unwrap();
        assert_eq!(encode(&mapping).unwrap(), "title: Demo\n");
    }
}
