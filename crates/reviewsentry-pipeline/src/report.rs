//! CSV report reading and writing
//!
//! The input report is the uploaded review export (`Title, Body, Author,
//! Variation, URL` columns); the output report is one row per confirmed
//! violation. Writes overwrite the destination and always emit the header
//! row, so a clean run still produces a readable (empty) report.

use reviewsentry_core::{Error, Result, Review, ViolationRecord};
use std::path::Path;
use tracing::debug;

/// Column headers of the output report, in write order.
const OUTPUT_HEADERS: [&str; 5] = [
    "review_id",
    "review",
    "violation_category",
    "flagged_reason",
    "email_body",
];

/// Read the uploaded review report.
pub fn read_reviews(path: impl AsRef<Path>) -> Result<Vec<Review>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::read(format!("{}: {}", path.display(), e)))?;

    let mut reviews = Vec::new();
    for row in reader.deserialize() {
        let review: Review =
            row.map_err(|e| Error::read(format!("{}: {}", path.display(), e)))?;
        reviews.push(review);
    }

    debug!(path = %path.display(), count = reviews.len(), "read review report");
    Ok(reviews)
}

/// Write the violation report, overwriting any existing file.
pub fn write_violations(path: impl AsRef<Path>, records: &[ViolationRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::write(format!("{}: {}", path.display(), e)))?;

    writer
        .write_record(OUTPUT_HEADERS)
        .map_err(|e| Error::write(format!("{}: {}", path.display(), e)))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| Error::write(format!("{}: {}", path.display(), e)))?;
    }

    writer
        .flush()
        .map_err(|e| Error::write(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), count = records.len(), "wrote violation report");
    Ok(())
}

/// Read a previously written violation report back.
pub fn read_violations(path: impl AsRef<Path>) -> Result<Vec<ViolationRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::read(format!("{}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ViolationRecord =
            row.map_err(|e| Error::read(format!("{}: {}", path.display(), e)))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(n: u32) -> ViolationRecord {
        ViolationRecord {
            review_id: format!("R{n}"),
            review: format!("review body {n}"),
            violation_category: "External links".to_string(),
            flagged_reason: "User included an external link.".to_string(),
            email_body: format!("Dear Community Help, ... ({n})"),
        }
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_output.csv");

        let records = vec![sample_record(1), sample_record(2), sample_record(3)];
        write_violations(&path, &records).unwrap();

        let read_back = read_violations(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_output.csv");

        write_violations(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "review_id,review,violation_category,flagged_reason,email_body"
        );
        assert!(read_violations(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_output.csv");

        write_violations(&path, &[sample_record(1), sample_record(2)]).unwrap();
        write_violations(&path, &[sample_record(9)]).unwrap();

        let read_back = read_violations(&path).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].review_id, "R9");
    }

    #[test]
    fn test_read_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(
            &path,
            "Title,Body,Author,Variation,URL\n\
             Great,I love it,buyer-1,B0001,https://www.amazon.com/a/b/c/R1/e\n\
             Bad,Visit www.spam.example,buyer-2,B0002,https://www.amazon.com/a/b/c/R2/e\n",
        )
        .unwrap();

        let reviews = read_reviews(&path).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].title, "Great");
        assert_eq!(reviews[1].author, "buyer-2");
        assert_eq!(reviews[1].review_id().unwrap(), "R2");
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let err = read_reviews("/nonexistent/reviews.csv").unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }

    #[test]
    fn test_read_malformed_row_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, "Title,Body\nonly,two columns\n").unwrap();

        let err = read_reviews(&path).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }
}
