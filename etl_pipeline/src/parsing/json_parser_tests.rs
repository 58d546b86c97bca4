#[cfg(test)]
mod tests {
    use crate::error::EtlError;
    use crate::parsing::json_parser::{extract_from_json, extract_from_json_str};
    use polars::prelude::*;
    use std::io::Write;

    const SCORES_JSON: &str = r#"{
        "0": {"name": "A", "gender": "female", "scores": {"math": 80, "reading": 90, "writing": null}},
        "1": {"name": "B", "gender": "male", "scores": {"math": null, "reading": 70, "writing": 60}},
        "2": {"name": "C", "scores": {"math": 90, "reading": 75, "writing": 80}}
    }"#;

    /// Test parsing index-oriented JSON from a file
    #[test]
    fn test_extract_json_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, "{}", SCORES_JSON).unwrap();

        let result = extract_from_json(temp_file.path());
        assert!(result.is_ok(), "Should parse JSON: {:?}", result.err());

        let dataset = result.unwrap();
        assert_eq!(dataset.shape(), (3, 3));
        assert_eq!(dataset.column_names(), vec!["name", "gender", "scores"]);
    }

    /// Keys become the row index; numeric keys give an integer index
    #[test]
    fn test_extract_json_numeric_keys() {
        let dataset = extract_from_json_str(SCORES_JSON).unwrap();

        assert!(!dataset.has_positional_index());
        let index = dataset.index_values();
        assert_eq!(index.dtype(), &DataType::Int64);
        assert_eq!(index.i64().unwrap().get(2), Some(2));
    }

    /// Non-numeric keys are kept as text labels
    #[test]
    fn test_extract_json_text_keys() {
        let json = r#"{"s1": {"name": "A"}, "s2": {"name": "B"}}"#;
        let dataset = extract_from_json_str(json).unwrap();

        let index = dataset.index_values();
        assert_eq!(index.str().unwrap().get(1), Some("s2"));
    }

    /// Missing fields become absent values
    #[test]
    fn test_extract_json_missing_field_is_null() {
        let dataset = extract_from_json_str(SCORES_JSON).unwrap();
        let gender = dataset.column("gender").unwrap();
        assert_eq!(gender.null_count(), 1);
    }

    /// Nested objects are read as struct columns
    #[test]
    fn test_extract_json_nested_struct() {
        let dataset = extract_from_json_str(SCORES_JSON).unwrap();
        let scores = dataset.column("scores").unwrap();
        assert!(matches!(scores.dtype(), DataType::Struct(_)));
    }

    /// An array of records is the wrong shape
    #[test]
    fn test_extract_json_rejects_array() {
        let json = r#"[{"name": "A"}, {"name": "B"}]"#;
        let result = extract_from_json_str(json);

        match result {
            Err(EtlError::Extraction(msg)) => assert!(msg.contains("array")),
            other => panic!("Expected extraction error, got {:?}", other.map(|d| d.shape())),
        }
    }

    /// Rows must be objects
    #[test]
    fn test_extract_json_rejects_scalar_rows() {
        let json = r#"{"0": 42}"#;
        assert!(matches!(
            extract_from_json_str(json),
            Err(EtlError::Extraction(_))
        ));
    }

    /// Malformed JSON is an extraction error
    #[test]
    fn test_extract_json_malformed() {
        let result = extract_from_json_str(r#"{"0": {"name": "A""#);
        assert!(matches!(result, Err(EtlError::Extraction(_))));
    }

    /// An empty object yields an empty dataset
    #[test]
    fn test_extract_json_empty_object() {
        let dataset = extract_from_json_str("{}").unwrap();
        assert_eq!(dataset.shape(), (0, 0));
    }

    /// Rows without fields still count as rows
    #[test]
    fn test_extract_json_empty_rows() {
        let dataset = extract_from_json_str(r#"{"0": {}, "1": {}}"#).unwrap();
        assert_eq!(dataset.shape(), (2, 0));

        let ids = dataset.index_values();
        assert_eq!(ids.i64().unwrap().get(1), Some(1));
    }
}
