#[cfg(test)]
mod tests {
    use crate::error::EtlError;
    use crate::parsing::csv_parser::extract_from_csv;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    /// Test parsing a CSV file with a header row
    #[test]
    fn test_extract_csv_basic() {
        let csv_content = "School Name,Student Enrollment,Percent Tested\nAlpha High,1200,95.5%\nBeta High,800,\n";

        let temp_file = create_temp_csv(csv_content);
        let result = extract_from_csv(temp_file.path());

        assert!(result.is_ok(), "Should parse basic CSV: {:?}", result.err());
        let dataset = result.unwrap();
        assert_eq!(dataset.shape(), (2, 3));
        assert!(dataset.has_positional_index());
        assert_eq!(
            dataset.column_names(),
            vec!["School Name", "Student Enrollment", "Percent Tested"]
        );
    }

    /// Percentage strings stay textual so the transform can convert them
    #[test]
    fn test_extract_csv_keeps_percentages_as_text() {
        let csv_content = "School Name,Percent Tested\nAlpha High,95.5%\n";

        let temp_file = create_temp_csv(csv_content);
        let dataset = extract_from_csv(temp_file.path()).unwrap();

        let tested = dataset.column("Percent Tested").unwrap().str().unwrap();
        assert_eq!(tested.get(0), Some("95.5%"));
    }

    /// Empty fields are read as absent values
    #[test]
    fn test_extract_csv_empty_field_is_null() {
        let csv_content = "School Name,Percent Tested\nAlpha High,95.5%\nBeta High,\n";

        let temp_file = create_temp_csv(csv_content);
        let dataset = extract_from_csv(temp_file.path()).unwrap();

        assert_eq!(dataset.null_count(), 1);
    }

    /// A leading unlabeled column is restored as the row index
    #[test]
    fn test_extract_csv_with_index_column() {
        let csv_content = ",name,math\n0,A,80\n1,B,90\n";

        let temp_file = create_temp_csv(csv_content);
        let dataset = extract_from_csv(temp_file.path()).unwrap();

        assert!(!dataset.has_positional_index());
        assert_eq!(dataset.column_names(), vec!["name", "math"]);
        assert_eq!(dataset.index_values().i64().unwrap().get(1), Some(1));
    }

    /// Missing files surface as extraction errors
    #[test]
    fn test_extract_csv_missing_file() {
        let result = extract_from_csv(Path::new("/nonexistent/scores.csv"));

        assert!(matches!(result, Err(EtlError::Extraction(_))));
    }
}
