use std::fmt;

use crate::redactor::FilterResult;

/// Human-readable rendering of a [`FilterResult`]
pub struct FilterReport<'a>(pub &'a FilterResult);

impl fmt::Display for FilterReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let summary = &result.summary;

        writeln!(f, "Content Filtering Report")?;
        writeln!(f, "{}", "=".repeat(50))?;
        write!(f, "\nTotal Detections: {}", summary.total_detections)?;

        if summary.total_detections == 0 {
            return write!(f, "\n\nNo sensitive information detected.");
        }

        write!(f, "\n\nDetections by Type:")?;
        for (detector, count) in &summary.by_type {
            write!(f, "\n  - {}: {}", detector, count)?;
        }
        write!(f, "\n\nOriginal Length: {} chars", result.original_length)?;
        write!(f, "\nFiltered Length: {} chars", result.redacted_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redactor::Redactor;

    #[test]
    fn test_report_with_detections() {
        let result = Redactor::default().filter("SSN: 123-45-6789, email john@x.com", None);
        let report = FilterReport(&result).to_string();

        assert!(report.starts_with("Content Filtering Report\n=================================================="));
        assert!(report.contains("Total Detections: 2"));
        assert!(report.contains("  - ssn: 1\n  - email: 1"));
        assert!(report.contains("Original Length: 34 chars"));
        assert!(report.ends_with("Filtered Length: 40 chars"));
    }

    #[test]
    fn test_report_without_detections() {
        let result = Redactor::default().filter("nothing to see", None);
        let report = FilterReport(&result).to_string();

        assert!(report.contains("Total Detections: 0"));
        assert!(report.ends_with("No sensitive information detected."));
        assert!(!report.contains("Original Length"));
    }
}
