#[cfg(test)]
mod tests {
    use crate::error::EtlError;
    use crate::parsing::parquet_parser::{extract_from_parquet, PARQUET_INDEX_COLUMN};
    use polars::prelude::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to write a frame to a temp Parquet file
    fn create_temp_parquet(df: &mut DataFrame) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let file = File::create(temp_file.path()).unwrap();
        ParquetWriter::new(file).finish(df).unwrap();
        temp_file
    }

    /// Test decoding a plain Parquet file
    #[test]
    fn test_extract_parquet_basic() {
        let mut df = df!(
            "School Name" => ["Alpha High", "Beta High"],
            "Student Enrollment" => [1200i64, 800],
            "Percent Black" => [Some("10%"), None],
        )
        .unwrap();

        let temp_file = create_temp_parquet(&mut df);
        let result = extract_from_parquet(temp_file.path());

        assert!(result.is_ok(), "Should decode Parquet: {:?}", result.err());
        let dataset = result.unwrap();
        assert_eq!(dataset.shape(), (2, 3));
        assert!(dataset.has_positional_index());
        assert_eq!(dataset.null_count(), 1);
    }

    /// The stored index column is moved back into the row index
    #[test]
    fn test_extract_parquet_restores_index() {
        let mut df = df!(
            PARQUET_INDEX_COLUMN => ["a", "b"],
            "math" => [80i64, 90],
        )
        .unwrap();

        let temp_file = create_temp_parquet(&mut df);
        let dataset = extract_from_parquet(temp_file.path()).unwrap();

        assert!(!dataset.has_positional_index());
        assert_eq!(dataset.column_names(), vec!["math"]);
        assert_eq!(dataset.index_values().str().unwrap().get(0), Some("a"));
    }

    /// Files that are not Parquet fail to decode
    #[test]
    fn test_extract_parquet_corrupt_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        write!(temp_file, "not a parquet file").unwrap();

        let result = extract_from_parquet(temp_file.path());
        assert!(matches!(result, Err(EtlError::Extraction(_))));
    }

    /// Missing files surface as extraction errors
    #[test]
    fn test_extract_parquet_missing_file() {
        let result = extract_from_parquet(Path::new("/nonexistent/scores.parquet"));
        assert!(matches!(result, Err(EtlError::Extraction(_))));
    }
}
